//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit status.

use std::fmt;
use std::io;

use crate::http_server::ConfigError;
use crate::schema::SpecError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/files)
    IoError,
    /// Record spec could not be built or loaded
    SpecError,
    /// Record spec name not in the catalog
    UnknownSpec,
    /// Input is not a JSON object
    InvalidInput,
    /// Input failed validation
    ValidationFailed,
    /// Server could not start or crashed
    ServeFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PERSON_API_CONFIG_ERROR",
            Self::IoError => "PERSON_API_IO_ERROR",
            Self::SpecError => "PERSON_API_SPEC_ERROR",
            Self::UnknownSpec => "PERSON_API_UNKNOWN_SPEC",
            Self::InvalidInput => "PERSON_API_INVALID_INPUT",
            Self::ValidationFailed => "PERSON_API_VALIDATION_FAILED",
            Self::ServeFailed => "PERSON_API_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn unknown_spec(name: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownSpec,
            format!("Record spec '{}' not found. Run 'person-api schemas' to list them.", name),
        )
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    pub fn validation_failed(count: usize) -> Self {
        Self::new(
            CliErrorCode::ValidationFailed,
            format!("Input failed validation on {} field(s)", count),
        )
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<SpecError> for CliError {
    fn from(e: SpecError) -> Self {
        Self::new(CliErrorCode::SpecError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
