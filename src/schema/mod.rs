//! Schema validation subsystem
//!
//! Record specs declare typed fields with constraints. Raw key/value input
//! from any request location is validated against a spec into either a
//! `ValidatedRecord` or a `ValidationError` listing every failing field.
//!
//! # Design Principles
//!
//! - Specs are immutable once registered
//! - All field failures are reported in one pass
//! - At most one failure per field
//! - Validation is pure and deterministic

pub mod catalog;
mod errors;
mod record;
mod types;
mod validator;

pub use catalog::Catalog;
pub use errors::{
    ErrorReason, FieldError, SpecError, SpecResult, ValidationError, ValidationResult,
};
pub use record::{Resolved, ValidatedRecord};
pub use types::{FieldSpec, FieldType, RecordSpec};
pub use validator::{raw_from_strings, validate, RawRecord};
