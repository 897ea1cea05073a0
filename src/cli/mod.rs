//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the `athena` binary using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// athena - athenaNet API client
#[derive(Parser, Debug)]
#[command(name = "athena")]
#[command(version, about, long_about = None)]
#[command(author = "athena-sdk Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "athena.toml", env = "ATHENA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ATHENA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send an authenticated GET to a practice-scoped path
    Fetch(commands::fetch::FetchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
