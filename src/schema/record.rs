//! Validated records
//!
//! A `ValidatedRecord` holds one entry per declared field, in declaration
//! order. Optional fields resolve to one of three states so callers can tell
//! an explicit value from a substituted default from nothing at all.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::types::RecordSpec;

/// Resolution of a single declared field
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// Supplied by the caller and valid
    Present(Value),
    /// Absent, replaced by the declared default
    Defaulted(Value),
    /// Absent with no default
    Absent,
}

impl Resolved {
    /// The effective value, if any
    pub fn value(&self) -> Option<&Value> {
        match self {
            Resolved::Present(v) | Resolved::Defaulted(v) => Some(v),
            Resolved::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Resolved::Present(_))
    }
}

/// Output of a successful validation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedRecord {
    entries: Vec<(String, Resolved)>,
}

impl ValidatedRecord {
    pub(crate) fn new(entries: Vec<(String, Resolved)>) -> Self {
        Self { entries }
    }

    /// Resolution state for `name`, or `None` if the field is not declared
    pub fn resolved(&self, name: &str) -> Option<&Resolved> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    /// Effective value for `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.resolved(name).and_then(Resolved::value)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolved)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Keeps only the fields declared by `spec`, in `spec` order.
    ///
    /// Fields `spec` declares that this record lacks resolve to `Absent`.
    pub fn project(&self, spec: &RecordSpec) -> ValidatedRecord {
        let entries = spec
            .fields
            .iter()
            .map(|field| {
                let resolved = self.resolved(&field.name).cloned().unwrap_or(Resolved::Absent);
                (field.name.clone(), resolved)
            })
            .collect();
        ValidatedRecord { entries }
    }

    /// JSON object view; absent fields render as `null`
    pub fn to_json(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|(name, resolved)| {
                (name.clone(), resolved.value().cloned().unwrap_or(Value::Null))
            })
            .collect();
        Value::Object(map)
    }
}

impl Serialize for ValidatedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, resolved) in &self.entries {
            map.serialize_entry(name, &resolved.value().unwrap_or(&Value::Null))?;
        }
        map.end()
    }
}
