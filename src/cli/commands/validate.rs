//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the athena configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after substitution and overrides
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  API Base URL: {}", config.api.base_url);
        println!("  Token Endpoint: {}", config.api.token_endpoint());
        println!("  API Version: {}", config.api.version);
        println!("  Practice ID: {}", config.api.practice_id);
        println!("  Client ID: {}", config.api.client_id);
        println!("  Strict Decoding: {}", config.api.strict_decoding);
        println!("  TLS Verify: {}", config.api.tls_verify);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
