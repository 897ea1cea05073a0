//! Fetch command implementation
//!
//! Sends one authenticated GET through a [`Connection`] and prints the
//! decoded JSON, or writes the raw body to a file.

use crate::adapters::athena::Connection;
use crate::config::load_config;
use crate::domain::PracticeId;
use clap::Args;
use serde_json::Value;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Resource path below `{version}/{practiceid}/`, e.g. `departments`
    pub path: String,

    /// Query parameter as key=value (repeatable)
    #[arg(short, long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Override the configured practice
    #[arg(long)]
    pub practice_id: Option<u32>,

    /// Write the raw response body to this file instead of printing JSON
    #[arg(short, long)]
    pub output: Option<String>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

impl FetchArgs {
    /// Execute the fetch command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, path = %self.path, "Fetching resource");

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let connection = match Connection::from_config(&config.api) {
            Ok(connection) => connection,
            Err(e) => {
                eprintln!("❌ Failed to create connection: {e}");
                return Ok(2);
            }
        };

        if let Some(id) = self.practice_id {
            match PracticeId::new(id) {
                Ok(practice_id) => connection.set_practice_id(practice_id),
                Err(e) => {
                    eprintln!("❌ {e}");
                    return Ok(2);
                }
            }
        }

        let mut call = connection.fetch(self.path.as_str());
        for (key, value) in &self.params {
            call = call.param(key, value.as_str());
        }

        match &self.output {
            Some(output) => match call.send_bytes().await {
                Ok(bytes) => {
                    tokio::fs::write(output, &bytes).await?;
                    println!("✅ Wrote {} bytes to {output}", bytes.len());
                    Ok(0)
                }
                Err(e) => Ok(report_failure(&e)),
            },
            None => match call.send::<Value>().await {
                Ok(value) => {
                    println!("{}", serde_json::to_string_pretty(&value)?);
                    Ok(0)
                }
                Err(e) => Ok(report_failure(&e)),
            },
        }
    }
}

fn report_failure(error: &crate::domain::AthenaError) -> i32 {
    crate::log_error_with_context!(error, "fetch command failed");
    eprintln!("❌ Request failed: {error}");
    if !error.missing_fields().is_empty() {
        eprintln!("   Missing fields: {}", error.missing_fields().join(", "));
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("departmentid=1", ("departmentid", "1"); "simple pair")]
    #[test_case("name=a=b", ("name", "a=b"); "value keeps later equals signs")]
    #[test_case("showall=", ("showall", ""); "empty value")]
    fn test_parse_key_value(raw: &str, expected: (&str, &str)) {
        let (key, value) = parse_key_value(raw).unwrap();
        assert_eq!((key.as_str(), value.as_str()), expected);
    }

    #[test]
    fn test_parse_key_value_rejects_missing_key() {
        assert!(parse_key_value("=1").is_err());
        assert!(parse_key_value("novalue").is_err());
    }

    #[tokio::test]
    async fn test_missing_config_exit_code() {
        let args = FetchArgs {
            path: "departments".to_string(),
            params: Vec::new(),
            practice_id: None,
            output: None,
        };
        let code = args.execute("does-not-exist.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
