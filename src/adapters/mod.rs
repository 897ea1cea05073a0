//! External system integrations.
//!
//! - [`http`] - transport-neutral request/response values and the pluggable
//!   [`http::HttpExecutor`] with its reqwest implementation
//! - [`athena`] - authentication, encoding, decoding and error translation
//!   for the athenaNet API, composed by [`athena::Connection`]
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the core can be
//! exercised with stub executors in tests.
//!
//! ```rust,no_run
//! use athena_sdk::adapters::athena::Connection;
//! use athena_sdk::adapters::http::{HttpExecutor, ReqwestExecutor};
//! use athena_sdk::config::load_config;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("athena.toml")?;
//! let executor: Arc<dyn HttpExecutor> = Arc::new(ReqwestExecutor::new(&config.api)?);
//! let connection = Connection::with_executor(&config.api, executor)?;
//! # Ok(())
//! # }
//! ```

pub mod athena;
pub mod http;
