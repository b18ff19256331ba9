//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bdsaas - place and inspect calls through the bdsaas telephony API
#[derive(Debug, Parser)]
#[command(name = "bdsaas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "BDSAAS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Application key (supports `env::VAR` and `pass::path` references)
    #[arg(long, env = "BDSAAS_APP_KEY", hide_env_values = true, global = true)]
    pub app_key: Option<String>,

    /// Service origin
    #[arg(long, env = "BDSAAS_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List seat phone numbers available for outbound calls
    Seats,

    /// Place a call from a seat to a phone number
    Call {
        /// Seat phone number placing the call
        from: String,

        /// Destination phone number
        to: String,

        /// Origin IP reported to the service
        #[arg(long)]
        ip: Option<String>,

        /// Notes stored with the call record
        #[arg(long)]
        notes: Option<String>,
    },

    /// Look up call records by session ID
    Query {
        /// Session IDs returned by `call`
        #[arg(required = true)]
        session_ids: Vec<String>,
    },

    /// Download the recording of a call
    Download {
        /// Session ID of the call
        session_id: String,

        /// Output file (defaults to `<session-id>.mp3`)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
