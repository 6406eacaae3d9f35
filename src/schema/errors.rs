//! Schema error types
//!
//! Two families:
//! - `ValidationError`: a payload violated a record spec. Carries every
//!   per-field failure found in one pass. Always recoverable by the client.
//! - `SpecError`: a record spec itself is malformed. Raised at startup or
//!   when loading spec files.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Why a single field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    /// Required field absent
    Missing,
    /// Fewer characters than `min_length`
    TooShort,
    /// More characters than `max_length`
    TooLong,
    /// Outside the exclusive `gt`/`lt` bounds
    OutOfRange,
    /// Not a member of the enum's values
    NotInEnum,
    /// Could not be coerced to the declared type, or malformed email
    BadFormat,
}

impl ErrorReason {
    /// Stable code used in responses
    pub fn code(&self) -> &'static str {
        match self {
            ErrorReason::Missing => "missing",
            ErrorReason::TooShort => "too_short",
            ErrorReason::TooLong => "too_long",
            ErrorReason::OutOfRange => "out_of_range",
            ErrorReason::NotInEnum => "not_in_enum",
            ErrorReason::BadFormat => "bad_format",
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One field's validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: ErrorReason,
    /// Human-readable explanation
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: ErrorReason, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason,
            message: message.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ErrorReason::Missing, "field required")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {} ({})", self.field, self.message, self.reason)
    }
}

/// Every field failure found while validating one payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the reason reported for `field`, if it failed
    pub fn reason_for(&self, field: &str) -> Option<ErrorReason> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.reason)
    }
}

/// Malformed record spec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("record '{record}', field '{field}': {reason}")]
    InvalidRecordField {
        record: String,
        field: String,
        reason: String,
    },

    #[error("record '{record}' declares field '{field}' more than once")]
    DuplicateField { record: String, field: String },

    #[error("record '{0}' is already registered")]
    DuplicateRecord(String),

    #[error("malformed spec source '{source_name}': {reason}")]
    Malformed { source_name: String, reason: String },
}

impl SpecError {
    /// Attaches the owning record name to a field-level error
    pub fn in_record(self, record: &str) -> Self {
        match self {
            SpecError::InvalidField { field, reason } => SpecError::InvalidRecordField {
                record: record.to_string(),
                field,
                reason,
            },
            other => other,
        }
    }

    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        SpecError::Malformed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for spec declaration and loading
pub type SpecResult<T> = Result<T, SpecError>;

/// Result type for payload validation
pub type ValidationResult<T> = Result<T, ValidationError>;
