//! CLI module
//!
//! Command-line interface for running Richpanel operations.
//!
//! # Commands
//!
//! - `check` - Test the API key
//! - `run` - Run an operation over input records
//! - `operations` - List supported resources and operations

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{merge_params, parse_items, parse_params, Runner};
