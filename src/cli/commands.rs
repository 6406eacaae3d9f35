//! CLI command implementations
//!
//! `serve` owns the tokio runtime; `schemas` and `check` are synchronous
//! and never touch the network.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::init_logging;
use crate::schema::{Catalog, ValidatedRecord, ValidationError};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_json};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => serve(config.as_deref(), host, port),
        Command::Schemas { name } => schemas(name.as_deref()),
        Command::Check {
            spec,
            input,
            spec_files,
        } => check(&spec, input.as_deref(), &spec_files),
    }
}

/// Load the server configuration and apply command line overrides
pub fn load_config(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<HttpServerConfig> {
    let mut config = match config_path {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    };

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    config.validate()?;
    Ok(config)
}

/// Start the HTTP server and block until it shuts down
pub fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let config = load_config(config_path, host, port)?;
    init_logging(&config.log_filter, config.log_format);

    let server = HttpServer::with_config(config)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Print every record spec, or only `name`
pub fn schemas(name: Option<&str>) -> CliResult<()> {
    let catalog = Catalog::standard()?;
    write_json(&describe_catalog(&catalog, name)?)
}

fn describe_catalog(catalog: &Catalog, name: Option<&str>) -> CliResult<Value> {
    match name {
        Some(name) => {
            let spec = catalog.get(name).ok_or_else(|| CliError::unknown_spec(name))?;
            Ok(serde_json::to_value(spec)?)
        }
        None => {
            let specs = catalog
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(specs))
        }
    }
}

/// Validate one JSON object against a catalog spec.
///
/// The outcome is printed either way; an invalid input also returns an
/// error so the process exits non-zero.
pub fn check(spec_name: &str, input: Option<&Path>, spec_files: &[PathBuf]) -> CliResult<()> {
    let mut catalog = Catalog::standard()?;
    for path in spec_files {
        catalog.load_file(path)?;
    }

    let value = read_input(input)?;
    let outcome = check_value(&catalog, spec_name, value)?;

    match outcome {
        Ok(record) => write_json(&json!({ "valid": true, "record": record.to_json() })),
        Err(err) => {
            write_json(&json!({ "valid": false, "errors": err.errors() }))?;
            Err(CliError::validation_failed(err.len()))
        }
    }
}

fn check_value(
    catalog: &Catalog,
    spec_name: &str,
    value: Value,
) -> CliResult<Result<ValidatedRecord, ValidationError>> {
    let spec = catalog
        .get(spec_name)
        .ok_or_else(|| CliError::unknown_spec(spec_name))?;

    let Value::Object(raw) = value else {
        return Err(CliError::invalid_input("Input must be a JSON object"));
    };

    Ok(spec.validate(&raw))
}
