//! Field and record declarations
//!
//! Supported field types:
//! - string: UTF-8 string, optional length bounds
//! - integer: 64-bit signed integer, optional strict bounds
//! - boolean
//! - enum: closed set of string literals
//! - email: string in `local@domain.tld` shape, optional length bounds

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{SpecError, SpecResult};

/// Supported field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Integer,
    /// Boolean
    Boolean,
    /// One of a fixed set of string literals
    Enum {
        /// Allowed literals, matched exactly
        values: Vec<String>,
    },
    /// Email address
    Email,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Enum { .. } => "enum",
            FieldType::Email => "email",
        }
    }

    /// Whether length bounds apply to this type
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::String | FieldType::Email)
    }
}

/// Declarative constraint set for one input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, as it appears in the raw input
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether the field must be present
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Exclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<i64>,
    /// Exclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<i64>,
    /// Value substituted when an optional field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            min_length: None,
            max_length: None,
            gt: None,
            lt: None,
            default: None,
            description: None,
        }
    }

    /// Create a required string field
    pub fn required_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, true)
    }

    /// Create an optional string field
    pub fn optional_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String, false)
    }

    /// Create a required integer field
    pub fn required_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer, true)
    }

    /// Create an optional integer field
    pub fn optional_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer, false)
    }

    /// Create a required boolean field
    pub fn required_bool(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean, true)
    }

    /// Create an optional boolean field
    pub fn optional_bool(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean, false)
    }

    /// Create a required enum field
    pub fn required_enum<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(name, FieldType::Enum { values }, true)
    }

    /// Create an optional enum field
    pub fn optional_enum<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(name, FieldType::Enum { values }, false)
    }

    /// Create a required email field
    pub fn required_email(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Email, true)
    }

    /// Create an optional email field
    pub fn optional_email(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Email, false)
    }

    /// Inclusive length bounds, counted in characters
    pub fn with_length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Value must be strictly greater than `bound`
    pub fn greater_than(mut self, bound: i64) -> Self {
        self.gt = Some(bound);
        self
    }

    /// Value must be strictly less than `bound`
    pub fn less_than(mut self, bound: i64) -> Self {
        self.lt = Some(bound);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the declaration itself (not a value)
    pub fn validate_structure(&self) -> SpecResult<()> {
        let invalid = |reason: &str| SpecError::InvalidField {
            field: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.is_empty() {
            return Err(invalid("field name must not be empty"));
        }

        if (self.min_length.is_some() || self.max_length.is_some())
            && !self.field_type.is_textual()
        {
            return Err(invalid("length bounds only apply to string and email fields"));
        }

        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(invalid("min_length exceeds max_length"));
            }
        }

        if (self.gt.is_some() || self.lt.is_some()) && self.field_type != FieldType::Integer {
            return Err(invalid("numeric bounds only apply to integer fields"));
        }

        if let (Some(gt), Some(lt)) = (self.gt, self.lt) {
            // gt < v < lt must admit at least one integer
            if gt.saturating_add(1) >= lt {
                return Err(invalid("bounds admit no value"));
            }
        }

        if let FieldType::Enum { values } = &self.field_type {
            if values.is_empty() {
                return Err(invalid("enum must declare at least one value"));
            }
        }

        if let Some(default) = &self.default {
            if self.required {
                return Err(invalid("required fields cannot declare a default"));
            }
            super::validator::check_value(self, default).map_err(|reason| {
                invalid(&format!("default value is invalid: {}", reason.code()))
            })?;
        }

        Ok(())
    }
}

/// Ordered collection of field declarations for one endpoint input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSpec {
    /// Unique record name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field declarations, validated in this order
    pub fields: Vec<FieldSpec>,
}

impl RecordSpec {
    /// Create a new record spec
    pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Looks up a field declaration by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns a copy of this spec without the named fields.
    pub fn without(&self, name: impl Into<String>, excluded: &[&str]) -> Self {
        Self {
            name: name.into(),
            description: self.description.clone(),
            fields: self
                .fields
                .iter()
                .filter(|f| !excluded.contains(&f.name.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Validates the record structure itself (not a payload)
    pub fn validate_structure(&self) -> SpecResult<()> {
        if self.name.is_empty() {
            return Err(SpecError::Malformed {
                source_name: "<in-memory>".into(),
                reason: "record name must not be empty".into(),
            });
        }

        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SpecError::DuplicateField {
                    record: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            field.validate_structure().map_err(|e| e.in_record(&self.name))?;
        }

        Ok(())
    }
}
