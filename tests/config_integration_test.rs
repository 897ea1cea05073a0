//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use athena_sdk::config::{load_config, Environment};
use athena_sdk::domain::{ApiVersion, AthenaError};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "ATHENA_APPLICATION_LOG_LEVEL",
        "ATHENA_ENVIRONMENT",
        "ATHENA_API_PRACTICE_ID",
        "ATHENA_API_VERSION",
        "ATHENA_API_CLIENT_SECRET",
        "ATHENA_API_STRICT_DECODING",
        "ATHENA_API_TLS_VERIFY",
        "TEST_ATHENA_CLIENT_SECRET",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let file = write_config(
        r#"
environment = "staging"

[application]
log_level = "debug"

[api]
base_url = "https://api.platform.athenahealth.com"
token_url = "https://api.platform.athenahealth.com/oauth2/v1/token"
version = "v1"
practice_id = 1959
client_id = "client"
client_secret = "secret"
scope = "athena/service/Athenanet.MDP.*"
timeout_seconds = 30
connect_timeout_seconds = 5
tls_verify = true
token_refresh_margin_seconds = 120
strict_decoding = true

[logging]
local_enabled = true
local_path = "/var/log/athena"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.environment, Environment::Staging);
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.api.version, ApiVersion::V1);
    assert_eq!(config.api.practice_id.get(), 1959);
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.api.token_refresh_margin_seconds, 120);
    assert!(config.api.strict_decoding);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let file = write_config(
        r#"
[api]
practice_id = 195900
client_id = "client"
client_secret = "secret"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.api.base_url, "https://api.preview.platform.athenahealth.com");
    assert_eq!(
        config.api.token_endpoint(),
        "https://api.preview.platform.athenahealth.com/oauth2/v1/token"
    );
    assert_eq!(config.api.timeout_seconds, 60);
    assert!(config.api.tls_verify);
    assert!(!config.api.strict_decoding);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_ATHENA_CLIENT_SECRET", "from-env");

    let file = write_config(
        r#"
[api]
practice_id = 195900
client_id = "client"
client_secret = "${TEST_ATHENA_CLIENT_SECRET}"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");
    assert_eq!(config.api.client_secret.expose_secret().as_str(), "from-env");

    cleanup_env_vars();
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("ATHENA_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("ATHENA_API_PRACTICE_ID", "1959");
    std::env::set_var("ATHENA_API_STRICT_DECODING", "true");

    let file = write_config(
        r#"
[application]
log_level = "info"

[api]
practice_id = 195900
client_id = "client"
client_secret = "secret"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.api.practice_id.get(), 1959);
    assert!(config.api.strict_decoding);

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let file = write_config(
        r#"
[api]
practice_id = 195900
client_id = "client"
client_secret = "${TEST_ATHENA_CLIENT_SECRET}"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, AthenaError::Configuration(ref msg) if msg.contains("TEST_ATHENA_CLIENT_SECRET")));
}

#[test]
fn test_tls_cannot_be_disabled_in_production() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let file = write_config(
        r#"
environment = "production"

[api]
practice_id = 195900
client_id = "client"
client_secret = "secret"
tls_verify = false
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TLS certificate verification"));
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    let file = write_config(
        r#"
[application]
log_level = "invalid_level"

[api]
practice_id = 195900
client_id = "client"
client_secret = "secret"
"#,
    );

    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_missing_file() {
    let err = load_config("/nonexistent/athena.toml").unwrap_err();
    assert!(matches!(err, AthenaError::Configuration(_)));
}
