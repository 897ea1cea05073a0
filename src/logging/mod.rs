//! Logging and observability
//!
//! Structured logging via `tracing`, with a console layer and optional
//! rotating JSON files. Bearer tokens and client secrets are never logged.
//!
//! # Example
//!
//! ```no_run
//! use athena_sdk::logging::init_logging;
//! use athena_sdk::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of an API call
///
/// # Example
///
/// ```no_run
/// use athena_sdk::log_api_call;
/// use std::time::Duration;
///
/// log_api_call!("GET", "/patients/1", 200u16, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_api_call {
    ($method:expr, $path:expr, $status:expr, $elapsed:expr) => {
        tracing::debug!(
            method = %$method,
            path = %$path,
            status = $status,
            elapsed_ms = $elapsed.as_millis() as u64,
            "API call completed"
        );
    };
}

/// Log the single re-authentication retry after a rejected token
///
/// # Example
///
/// ```no_run
/// use athena_sdk::log_auth_retry;
///
/// log_auth_retry!("/patients/1", 401u16);
/// ```
#[macro_export]
macro_rules! log_auth_retry {
    ($path:expr, $status:expr) => {
        tracing::warn!(
            path = %$path,
            status = ?$status,
            "Token rejected, refreshing and retrying once"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use athena_sdk::log_error_with_context;
/// use athena_sdk::domain::AthenaError;
///
/// let error = AthenaError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
