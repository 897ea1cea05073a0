//! Domain error types
//!
//! This module defines the error taxonomy surfaced to callers of the SDK.
//! Every failure an API call can produce maps to exactly one variant, and no
//! variant exposes third-party HTTP client types.

use thiserror::Error;

/// Main SDK error type
///
/// Hard failures (transport problems, rejected credentials, non-2xx statuses,
/// undecodable payloads) are reported through this enum. Soft business
/// outcomes delivered inside a 2xx body (`success: false`) are never promoted
/// to errors; callers inspect the decoded body for those.
#[derive(Debug, Error)]
pub enum AthenaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No response was obtained from the server
    #[error("Transport error: {0}")]
    Transport(String),

    /// Rejected credentials (401/403) or a failed token exchange
    #[error("Authentication failed: {message}")]
    Auth {
        /// HTTP status, absent when the exchange never produced a response
        status: Option<u16>,
        /// Human-readable message
        message: String,
    },

    /// 400 response carrying a structured list of missing fields
    #[error("Validation error: {message} (missing fields: {})", .missing_fields.join(", "))]
    Validation {
        /// Message from the `error` member of the payload
        message: String,
        /// Contents of the `missingfields` member of the payload
        missing_fields: Vec<String>,
    },

    /// 404 response
    #[error("Not found: {message}")]
    NotFound {
        /// Message extracted from the payload
        message: String,
    },

    /// 409 response
    #[error("Conflict: {message}")]
    Conflict {
        /// Message extracted from the payload
        message: String,
    },

    /// Any other non-2xx response
    #[error("Server error: {status} - {message}")]
    Server {
        /// HTTP status
        status: u16,
        /// Raw response body
        message: String,
    },

    /// Payload did not match the requested shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request shape could not be encoded
    #[error("Encode error: {0}")]
    Encode(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl AthenaError {
    /// HTTP status associated with the error, if a response was obtained
    pub fn status(&self) -> Option<u16> {
        match self {
            AthenaError::Auth { status, .. } => *status,
            AthenaError::Validation { .. } => Some(400),
            AthenaError::NotFound { .. } => Some(404),
            AthenaError::Conflict { .. } => Some(409),
            AthenaError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403 responses and failed token exchanges
    pub fn is_auth(&self) -> bool {
        matches!(self, AthenaError::Auth { .. })
    }

    /// True when the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, AthenaError::NotFound { .. })
    }

    /// Missing field names of a validation failure, empty otherwise
    pub fn missing_fields(&self) -> &[String] {
        match self {
            AthenaError::Validation { missing_fields, .. } => missing_fields,
            _ => &[],
        }
    }

    /// Shorthand for a not-found error raised on the client side
    pub fn not_found(message: impl Into<String>) -> Self {
        AthenaError::NotFound {
            message: message.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AthenaError {
    fn from(err: std::io::Error) -> Self {
        AthenaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AthenaError {
    fn from(err: serde_json::Error) -> Self {
        AthenaError::Decode(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AthenaError {
    fn from(err: toml::de::Error) -> Self {
        AthenaError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_athena_error_display() {
        let err = AthenaError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_validation_error_display_lists_fields() {
        let err = AthenaError::Validation {
            message: "Additional fields are required.".to_string(),
            missing_fields: vec!["notetext".to_string(), "patientid".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Validation error: Additional fields are required. (missing fields: notetext, patientid)"
        );
        assert_eq!(err.missing_fields().len(), 2);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AthenaError::not_found("x").status(), Some(404));
        assert_eq!(
            AthenaError::Conflict {
                message: "dup".to_string()
            }
            .status(),
            Some(409)
        );
        assert_eq!(
            AthenaError::Server {
                status: 503,
                message: String::new()
            }
            .status(),
            Some(503)
        );
        assert_eq!(AthenaError::Transport("reset".to_string()).status(), None);
        assert_eq!(
            AthenaError::Auth {
                status: None,
                message: "exchange failed".to_string()
            }
            .status(),
            None
        );
    }

    #[test]
    fn test_auth_predicate() {
        let err = AthenaError::Auth {
            status: Some(401),
            message: "expired".to_string(),
        };
        assert!(err.is_auth());
        assert!(!AthenaError::not_found("x").is_auth());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: AthenaError = io_err.into();
        assert!(matches!(err, AthenaError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: AthenaError = json_err.into();
        assert!(matches!(err, AthenaError::Decode(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: AthenaError = toml_err.into();
        assert!(matches!(err, AthenaError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_athena_error_implements_std_error() {
        let err = AthenaError::Decode("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
