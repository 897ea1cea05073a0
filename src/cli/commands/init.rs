//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "athena.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing athena configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your practice id", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set ATHENA_CLIENT_ID and ATHENA_CLIENT_SECRET");
                println!("  3. Validate configuration: athena validate-config");
                println!("  4. Try a request: athena fetch departments");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# athena configuration file

environment = "development"  # development | staging | production

[application]
log_level = "info"

[api]
base_url = "https://api.preview.platform.athenahealth.com"
version = "preview1"
practice_id = 195900
client_id = "${ATHENA_CLIENT_ID}"
client_secret = "${ATHENA_CLIENT_SECRET}"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# athena configuration file
#
# Values of the form ${VAR} are read from the environment (and from .env).
# Any key can also be overridden with ATHENA_<SECTION>_<KEY>, for example
# ATHENA_API_PRACTICE_ID=1959.

# Runtime environment: development | staging | production
# TLS verification cannot be disabled in production.
environment = "development"

[application]
# trace | debug | info | warn | error
log_level = "info"

[api]
# API host without the version segment
base_url = "https://api.preview.platform.athenahealth.com"

# OAuth2 token endpoint; defaults to {base_url}/oauth2/v1/token
# token_url = "https://api.preview.platform.athenahealth.com/oauth2/v1/token"

# v1 | preview1
version = "preview1"

# Practice every request is scoped to (195900 is the preview sandbox)
practice_id = 195900

# OAuth2 client credentials
client_id = "${ATHENA_CLIENT_ID}"
client_secret = "${ATHENA_CLIENT_SECRET}"

# Scope requested with the client-credentials grant
scope = "athena/service/Athenanet.MDP.*"

# Timeouts in seconds
timeout_seconds = 60
connect_timeout_seconds = 30

# Verify the server certificate
tls_verify = true

# Refresh a cached token this many seconds before it expires (max 600)
token_refresh_margin_seconds = 60

# Reject response members the SDK does not know about (diagnostic)
strict_decoding = false

[logging]
# Write JSON logs to rotating files in addition to the console
local_enabled = false
local_path = "./logs"

# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
