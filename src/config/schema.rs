//! Configuration schema types
//!
//! This module defines the configuration structure read from `athena.toml`.

use crate::config::SecretString;
use crate::domain::{ApiVersion, PracticeId};
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main SDK configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthenaConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// API connection and credentials
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AthenaConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate(&self.environment)?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API host (no version segment)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OAuth2 token endpoint; derived from `base_url` when absent
    #[serde(default)]
    pub token_url: Option<String>,

    /// API version prefix
    #[serde(default)]
    pub version: ApiVersion,

    /// Practice every request is scoped to
    pub practice_id: PracticeId,

    /// OAuth2 client identifier
    pub client_id: String,

    /// OAuth2 client secret
    /// Stored securely in memory and automatically zeroized on drop
    pub client_secret: SecretString,

    /// OAuth2 scope requested during the client-credentials exchange
    #[serde(default = "default_scope")]
    pub scope: Option<String>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: disabling verification exposes the client to
    /// man-in-the-middle attacks. Validation rejects `false` in production.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// A cached token is treated as expired this many seconds early
    #[serde(default = "default_token_refresh_margin_seconds")]
    pub token_refresh_margin_seconds: u64,

    /// Fail decoding when a payload carries members the target type lacks
    ///
    /// Off by default; turn it on to find schema drift.
    #[serde(default)]
    pub strict_decoding: bool,
}

impl ApiConfig {
    /// Token endpoint, explicit or derived from the base URL
    pub fn token_endpoint(&self) -> String {
        match &self.token_url {
            Some(url) => url.clone(),
            None => format!("{}/oauth2/v1/token", self.base_url.trim_end_matches('/')),
        }
    }

    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| format!("api.base_url is not a valid URL: {e}"))?;

        if let Some(ref token_url) = self.token_url {
            url::Url::parse(token_url)
                .map_err(|e| format!("api.token_url is not a valid URL: {e}"))?;
        }

        if self.client_id.trim().is_empty() {
            return Err("api.client_id cannot be empty".to_string());
        }

        if self.client_secret.expose_secret().is_empty() {
            return Err("api.client_secret cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        if self.token_refresh_margin_seconds > 600 {
            return Err(format!(
                "api.token_refresh_margin_seconds must be at most 600, got {}",
                self.token_refresh_margin_seconds
            ));
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'tls_verify = true' or use 'environment = \"development\"' for local testing."
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_url: None,
            version: ApiVersion::default(),
            practice_id: PracticeId::SANDBOX,
            client_id: String::new(),
            client_secret: crate::config::secret_string(String::new()),
            scope: default_scope(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            tls_verify: true,
            token_refresh_margin_seconds: default_token_refresh_margin_seconds(),
            strict_decoding: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON log files in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// File rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.preview.platform.athenahealth.com".to_string()
}

fn default_scope() -> Option<String> {
    Some("athena/service/Athenanet.MDP.*".to_string())
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_connect_timeout_seconds() -> u64 {
    30
}

fn default_token_refresh_margin_seconds() -> u64 {
    60
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn api_config() -> ApiConfig {
        ApiConfig {
            client_id: "client".to_string(),
            client_secret: secret_string("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
        };
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_config_validation() {
        let config = api_config();
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_api_config_requires_credentials() {
        let mut config = api_config();
        config.client_id = " ".to_string();
        assert!(config
            .validate(&Environment::Development)
            .unwrap_err()
            .contains("client_id"));

        let mut config = api_config();
        config.client_secret = secret_string(String::new());
        assert!(config
            .validate(&Environment::Development)
            .unwrap_err()
            .contains("client_secret"));
    }

    #[test]
    fn test_api_config_rejects_bad_urls() {
        let mut config = api_config();
        config.base_url = "ftp://example.com".to_string();
        assert!(config.validate(&Environment::Development).is_err());

        let mut config = api_config();
        config.token_url = Some("not a url".to_string());
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_tls_verification_in_production() {
        let mut config = api_config();
        config.tls_verify = false;

        let result = config.validate(&Environment::Production);
        assert!(result
            .unwrap_err()
            .contains("TLS certificate verification cannot be disabled in production"));

        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Staging).is_ok());
    }

    #[test]
    fn test_token_endpoint_derivation() {
        let mut config = api_config();
        config.base_url = "https://api.example.com/".to_string();
        assert_eq!(
            config.token_endpoint(),
            "https://api.example.com/oauth2/v1/token"
        );

        config.token_url = Some("https://auth.example.com/token".to_string());
        assert_eq!(config.token_endpoint(), "https://auth.example.com/token");
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        let config = ApiConfig::default();
        assert_eq!(config.version, ApiVersion::V1);
        assert_eq!(config.practice_id, PracticeId::SANDBOX);
        assert_eq!(config.timeout_seconds, 60);
        assert_eq!(config.token_refresh_margin_seconds, 60);
        assert!(config.tls_verify);
        assert!(!config.strict_decoding);
        assert_eq!(config.scope.as_deref(), Some("athena/service/Athenanet.MDP.*"));
    }
}
