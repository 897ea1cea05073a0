//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AthenaConfig, Environment};
use crate::config::secret_string;
use crate::domain::errors::AthenaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AthenaConfig
/// 4. Applies environment variable overrides (ATHENA_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`AthenaError::Configuration`] if the file cannot be read, a
/// referenced variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use athena_sdk::config::loader::load_config;
///
/// let config = load_config("athena.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AthenaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AthenaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AthenaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from an in-memory TOML document
///
/// Runs the same substitution, override and validation steps as
/// [`load_config`].
pub fn parse_config(contents: &str) -> Result<AthenaConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: AthenaConfig = toml::from_str(&contents)
        .map_err(|e| AthenaError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AthenaError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AthenaError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        // Placeholders inside comments are left alone
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AthenaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the ATHENA_* prefix
///
/// Environment variables follow the pattern `ATHENA_<SECTION>_<KEY>`,
/// for example `ATHENA_API_PRACTICE_ID` or `ATHENA_LOGGING_LOCAL_PATH`.
fn apply_env_overrides(config: &mut AthenaConfig) -> Result<()> {
    if let Ok(val) = std::env::var("ATHENA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("ATHENA_ENVIRONMENT") {
        config.environment = match val.to_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(AthenaError::Configuration(format!(
                    "Invalid ATHENA_ENVIRONMENT '{other}'"
                )))
            }
        };
    }

    // API overrides
    if let Ok(val) = std::env::var("ATHENA_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("ATHENA_API_TOKEN_URL") {
        config.api.token_url = Some(val);
    }
    if let Ok(val) = std::env::var("ATHENA_API_VERSION") {
        config.api.version = val.parse().map_err(AthenaError::Configuration)?;
    }
    if let Ok(val) = std::env::var("ATHENA_API_PRACTICE_ID") {
        config.api.practice_id = val.parse().map_err(AthenaError::Configuration)?;
    }
    if let Ok(val) = std::env::var("ATHENA_API_CLIENT_ID") {
        config.api.client_id = val;
    }
    if let Ok(val) = std::env::var("ATHENA_API_CLIENT_SECRET") {
        config.api.client_secret = secret_string(val);
    }
    if let Ok(val) = std::env::var("ATHENA_API_SCOPE") {
        config.api.scope = if val.is_empty() { None } else { Some(val) };
    }
    if let Ok(val) = std::env::var("ATHENA_API_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.api.timeout_seconds = secs;
        }
    }
    if let Ok(val) = std::env::var("ATHENA_API_TLS_VERIFY") {
        config.api.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("ATHENA_API_STRICT_DECODING") {
        config.api.strict_decoding = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ATHENA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ATHENA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ATHENA_LOADER_TEST_VAR", "test_value");
        let input = "client_secret = \"${ATHENA_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim_end(), "client_secret = \"test_value\"");
        std::env::remove_var("ATHENA_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ATHENA_LOADER_MISSING_VAR");
        let input = "client_secret = \"${ATHENA_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("ATHENA_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# client_secret = \"${ATHENA_LOADER_NEVER_SET}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-athena.toml");
        assert!(matches!(result, Err(AthenaError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
environment = "staging"

[application]
log_level = "debug"

[api]
base_url = "https://api.preview.platform.athenahealth.com"
version = "preview1"
practice_id = 195900
client_id = "client"
client_secret = "secret"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.api.practice_id.get(), 195900);
        assert_eq!(config.api.client_secret.expose_secret(), "secret");
        assert!(!config.api.strict_decoding);
    }

    #[test]
    fn test_parse_config_rejects_zero_practice() {
        let toml_content = r#"
[api]
practice_id = 0
client_id = "client"
client_secret = "secret"
"#;
        assert!(parse_config(toml_content).is_err());
    }
}
