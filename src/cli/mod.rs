//! CLI module for person-api
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - schemas: Print record specs
//! - check: One-shot validation of a JSON object

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, load_config, run, run_command, schemas, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_json};
