//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Richpanel connector CLI
#[derive(Parser, Debug)]
#[command(name = "richpanel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key (overrides config file and RICHPANEL_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL (overrides config file and RICHPANEL_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test the API key against the API
    Check,

    /// Run an operation over one or more input records
    Run {
        /// Resource (conversation, customer, order, subscription, user, tag, channel)
        resource: String,

        /// Operation (e.g. create, get, getMany)
        operation: String,

        /// Parameters shared by every record (JSON object)
        #[arg(short, long)]
        params: Option<String>,

        /// File holding the shared parameters (JSON object)
        #[arg(long, conflicts_with = "params")]
        params_file: Option<PathBuf>,

        /// Input records: a JSON array or JSON Lines file
        #[arg(short, long)]
        items: Option<PathBuf>,

        /// Emit an error item for a failed record and keep going
        #[arg(long)]
        continue_on_fail: bool,

        /// Records processed at the same time
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// List resources and their operations
    Operations,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
