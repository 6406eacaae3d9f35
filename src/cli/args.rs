//! CLI argument definitions using clap
//!
//! Commands:
//! - person-api serve [--config <path>] [--host <host>] [--port <port>]
//! - person-api schemas [<name>]
//! - person-api check --spec <name> [--input <path>] [--spec-file <path>]...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// person-api - request validation across path, query, body, form, header,
/// cookie and file inputs
#[derive(Parser, Debug)]
#[command(name = "person-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print record specs as JSON
    Schemas {
        /// Print only this record spec
        name: Option<String>,
    },

    /// Validate a JSON object against a record spec and exit
    Check {
        /// Record spec name
        #[arg(long)]
        spec: String,

        /// JSON input file (default: stdin)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Extra record spec files to load first
        #[arg(long = "spec-file")]
        spec_files: Vec<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
