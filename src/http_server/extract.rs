//! Raw value extraction per request location
//!
//! Each location yields a `RawRecord` that is validated against its record
//! spec. Failures are tagged with the location so that errors from several
//! locations of one request can be merged into a single response.

use std::collections::HashMap;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::schema::{raw_from_strings, ErrorReason, RawRecord, RecordSpec, ValidatedRecord};

use super::errors::{ApiError, ErrorDetail};

/// Where a raw value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
    Body,
    Form,
    Header,
    Cookie,
    File,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Path => "path",
            Location::Query => "query",
            Location::Body => "body",
            Location::Form => "form",
            Location::Header => "header",
            Location::Cookie => "cookie",
            Location::File => "file",
        }
    }
}

/// Outcome of validating one location
pub type LocatedResult<T> = Result<T, Vec<ErrorDetail>>;

/// Validates `raw` from `location` against `spec`.
pub fn check(location: Location, spec: &RecordSpec, raw: &RawRecord) -> LocatedResult<ValidatedRecord> {
    spec.validate(raw).map_err(|err| {
        err.into_errors()
            .into_iter()
            .map(|e| ErrorDetail::located(location, e))
            .collect()
    })
}

/// Combines two location results, keeping every error from both.
pub fn join<A, B>(a: LocatedResult<A>, b: LocatedResult<B>) -> LocatedResult<(A, B)> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(errors), Ok(_)) | (Ok(_), Err(errors)) => Err(errors),
        (Err(mut first), Err(second)) => {
            first.extend(second);
            Err(first)
        }
    }
}

/// Path segments, query pairs or form pairs
pub fn string_map(values: HashMap<String, String>) -> RawRecord {
    raw_from_strings(values)
}

/// JSON body, which must be an object
pub fn body_object(body: Result<Json<Value>, JsonRejection>) -> Result<RawRecord, ApiError> {
    let Json(value) = body?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_request("request body must be a JSON object")),
    }
}

/// Validates the headers named by the fields `spec` declares.
///
/// A field named `user_info` is read from the `user-info` header. A value
/// that is not UTF-8 is `bad_format` for its field.
pub fn check_headers(spec: &RecordSpec, headers: &HeaderMap) -> LocatedResult<ValidatedRecord> {
    let mut raw = RawRecord::new();
    let mut undecodable = Vec::new();

    for field in &spec.fields {
        let header_name = field.name.replace('_', "-");
        let Some(value) = headers.get(header_name.as_str()) else {
            continue;
        };
        match std::str::from_utf8(value.as_bytes()) {
            Ok(text) => {
                raw.insert(field.name.clone(), Value::String(text.to_string()));
            }
            Err(_) => undecodable.push(ErrorDetail::new(
                Location::Header,
                field.name.as_str(),
                ErrorReason::BadFormat,
                "header value is not valid UTF-8",
            )),
        }
    }

    let checked = check(Location::Header, spec, &raw);
    if undecodable.is_empty() {
        return checked;
    }

    // An undecodable header also reads as absent; keep one error per field
    let mut errors = checked.err().unwrap_or_default();
    errors.retain(|e| undecodable.iter().all(|u| u.field != e.field));
    errors.extend(undecodable);
    errors.sort_by_key(|e| spec.fields.iter().position(|f| f.name == e.field));
    Err(errors)
}

/// `name=value` pairs from every `Cookie` header; first occurrence wins.
pub fn cookie_values(headers: &HeaderMap) -> RawRecord {
    let mut raw = RawRecord::new();
    for value in headers.get_all(header::COOKIE) {
        let Ok(text) = value.to_str() else {
            continue;
        };
        for pair in text.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() || raw.contains_key(name) {
                continue;
            }
            let value = value.trim().trim_matches('"');
            raw.insert(name.to_string(), Value::String(value.to_string()));
        }
    }
    raw
}

/// Integer a validated record is known to hold
pub fn require_i64(record: &ValidatedRecord, location: Location, name: &str) -> Result<i64, ApiError> {
    record
        .get_i64(name)
        .ok_or_else(|| ApiError::Validation(vec![ErrorDetail::missing(location, name)]))
}
