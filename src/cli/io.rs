//! JSON I/O handling for CLI
//!
//! - Input: one JSON document from a file or stdin
//! - Output: pretty JSON on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read one JSON document from `path`, or from stdin when `None`
pub fn read_input(path: Option<&Path>) -> CliResult<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
        })?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    parse_input(&content)
}

fn parse_input(content: &str) -> CliResult<Value> {
    if content.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(serde_json::from_str(content)?)
}

/// Write a JSON value to stdout
pub fn write_json(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
