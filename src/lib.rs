// athena-sdk - athenaNet practice-management API client
// Copyright (c) 2025 athena-sdk Contributors
// Licensed under the MIT License

//! # athena-sdk - typed async client for the athenaNet API
//!
//! Callers work with appointments, patients, providers, practices and
//! reference data without handling OAuth2 tokens, query encoding or response
//! decoding themselves.
//!
//! ## Architecture
//!
//! - [`clients`] - per-resource facades and the [`clients::AthenaClient`] aggregate
//! - [`adapters`] - the request pipeline (token manager, encoder, decoder,
//!   translator, connection) and the pluggable HTTP executor
//! - [`models`] - request filters, response payloads and wire enums
//! - [`domain`] - identifiers, API versions and the error taxonomy
//! - [`config`] - TOML configuration with environment overrides
//! - [`logging`] - structured logging
//! - [`cli`] - the `athena` command-line interface
//!
//! Every call flows facade → [`adapters::athena::Connection`] → encoder →
//! token manager → executor → decoder → translator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use athena_sdk::clients::AthenaClient;
//! use athena_sdk::config::load_config;
//! use athena_sdk::models::request::GetPatientsFilter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("athena.toml")?;
//!     let client = AthenaClient::from_config(&config.api)?;
//!
//!     let filter = GetPatientsFilter {
//!         last_name: Some("Smith".into()),
//!         limit: Some(50),
//!         ..Default::default()
//!     };
//!     let found = client.patients().search(&filter).await?;
//!     println!("{} patients", found.totalcount);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`domain::Result`]. Hard failures are typed
//! [`domain::AthenaError`] variants; writes that report `success: false`
//! inside a 200 come back as decoded values for the caller to inspect.
//!
//! ```rust,no_run
//! use athena_sdk::clients::AthenaClient;
//! use athena_sdk::domain::AthenaError;
//!
//! # async fn example(client: AthenaClient) {
//! match client.patients().patient(1, None).await {
//!     Ok(patient) => println!("{:?}", patient.lastname),
//!     Err(AthenaError::NotFound { message }) => println!("{message}"),
//!     Err(e) => eprintln!("request failed: {e}"),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! The SDK emits `tracing` events; each call runs in an `athena_call` span
//! carrying a request id. Use [`logging::init_logging`] or install your own
//! subscriber.

pub mod adapters;
pub mod cli;
pub mod clients;
pub mod config;
pub mod domain;
pub mod logging;
pub mod models;
