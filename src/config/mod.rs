//! Configuration management for the SDK.
//!
//! # Overview
//!
//! Configuration is read from a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ATHENA_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use athena_sdk::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("athena.toml")?;
//! println!("Practice: {}", config.api.practice_id);
//! println!("Token endpoint: {}", config.api.token_endpoint());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ApiConfig`] - Host, version, practice and OAuth2 credentials
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "development"
//!
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "https://api.preview.platform.athenahealth.com"
//! version = "preview1"
//! practice_id = 195900
//! client_id = "${ATHENA_CLIENT_ID}"
//! client_secret = "${ATHENA_CLIENT_SECRET}"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{ApiConfig, ApplicationConfig, AthenaConfig, Environment, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
