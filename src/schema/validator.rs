//! Payload validation against a record spec
//!
//! Fields are checked in declaration order:
//! 1. presence (required / default / absent)
//! 2. coercion to the declared type
//! 3. constraints, first failure wins per field
//!
//! Failures accumulate across fields; a payload with N bad fields yields N
//! errors. Undeclared keys are ignored. Validation is pure and deterministic.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::errors::{ErrorReason, FieldError, ValidationError, ValidationResult};
use super::record::{Resolved, ValidatedRecord};
use super::types::{FieldSpec, FieldType, RecordSpec};

/// Untyped input: field name to raw value
pub type RawRecord = Map<String, Value>;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("email pattern compiles")
    })
}

/// Validates `raw` against `spec`.
///
/// # Errors
///
/// Returns a `ValidationError` listing one `FieldError` per failing field.
pub fn validate(spec: &RecordSpec, raw: &RawRecord) -> ValidationResult<ValidatedRecord> {
    let mut entries = Vec::with_capacity(spec.fields.len());
    let mut errors = Vec::new();

    for field in &spec.fields {
        match resolve(field, raw.get(&field.name)) {
            Ok(resolved) => entries.push((field.name.clone(), resolved)),
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        Ok(ValidatedRecord::new(entries))
    } else {
        Err(ValidationError::new(errors))
    }
}

impl RecordSpec {
    /// Validates `raw` against this spec. See [`validate`].
    pub fn validate(&self, raw: &RawRecord) -> ValidationResult<ValidatedRecord> {
        validate(self, raw)
    }
}

/// Builds a raw record from string pairs (query, form, path, header, cookie).
pub fn raw_from_strings<I, K, V>(pairs: I) -> RawRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect()
}

fn resolve(field: &FieldSpec, raw: Option<&Value>) -> Result<Resolved, FieldError> {
    match raw {
        None | Some(Value::Null) if !field.required => Ok(match &field.default {
            Some(default) => Resolved::Defaulted(default.clone()),
            None => Resolved::Absent,
        }),
        None => Err(FieldError::missing(&field.name)),
        Some(Value::Null) => Err(FieldError::new(
            &field.name,
            ErrorReason::BadFormat,
            "null is not an allowed value",
        )),
        Some(value) => check_value(field, value)
            .map(Resolved::Present)
            .map_err(|reason| {
                FieldError::new(&field.name, reason, describe(field, reason, value))
            }),
    }
}

/// Coerces `raw` to the field's type and applies its constraints.
pub(crate) fn check_value(field: &FieldSpec, raw: &Value) -> Result<Value, ErrorReason> {
    match &field.field_type {
        FieldType::String => {
            let text = as_text(raw)?;
            check_length(field, text)?;
            Ok(Value::String(text.to_owned()))
        }
        FieldType::Email => {
            let text = as_text(raw)?;
            check_length(field, text)?;
            if !is_email(text) {
                return Err(ErrorReason::BadFormat);
            }
            Ok(Value::String(text.to_owned()))
        }
        FieldType::Enum { values } => {
            let text = as_text(raw)?;
            if values.iter().any(|v| v == text) {
                Ok(Value::String(text.to_owned()))
            } else {
                Err(ErrorReason::NotInEnum)
            }
        }
        FieldType::Integer => match coerce_int(raw)? {
            Integral::Fits(n) => {
                check_bounds(field, n)?;
                Ok(Value::from(n))
            }
            // Outside the i64 range, whatever the declared bounds
            Integral::Overflow => Err(ErrorReason::OutOfRange),
        },
        FieldType::Boolean => coerce_bool(raw).map(Value::Bool),
    }
}

fn as_text(raw: &Value) -> Result<&str, ErrorReason> {
    raw.as_str().ok_or(ErrorReason::BadFormat)
}

/// An integral input, which may not fit in an `i64`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Integral {
    Fits(i64),
    Overflow,
}

fn coerce_int(raw: &Value) -> Result<Integral, ErrorReason> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Integral::Fits(i));
            }
            if n.as_u64().is_some() {
                return Ok(Integral::Overflow);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => {
                    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                        Ok(Integral::Fits(f as i64))
                    } else {
                        Ok(Integral::Overflow)
                    }
                }
                _ => Err(ErrorReason::BadFormat),
            }
        }
        Value::String(s) => parse_decimal(s.trim()),
        _ => Err(ErrorReason::BadFormat),
    }
}

/// Optional sign followed by ASCII digits only
fn parse_decimal(text: &str) -> Result<Integral, ErrorReason> {
    let digits = match text.as_bytes().first() {
        Some(b'-' | b'+') => &text[1..],
        _ => text,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErrorReason::BadFormat);
    }
    Ok(text
        .parse()
        .map(Integral::Fits)
        .unwrap_or(Integral::Overflow))
}

fn coerce_bool(raw: &Value) -> Result<bool, ErrorReason> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(ErrorReason::BadFormat),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" | "on" => Ok(true),
            "false" | "f" | "0" | "no" | "n" | "off" => Ok(false),
            _ => Err(ErrorReason::BadFormat),
        },
        _ => Err(ErrorReason::BadFormat),
    }
}

fn check_length(field: &FieldSpec, text: &str) -> Result<(), ErrorReason> {
    let len = text.chars().count();
    if field.min_length.is_some_and(|min| len < min) {
        return Err(ErrorReason::TooShort);
    }
    if field.max_length.is_some_and(|max| len > max) {
        return Err(ErrorReason::TooLong);
    }
    Ok(())
}

fn check_bounds(field: &FieldSpec, n: i64) -> Result<(), ErrorReason> {
    if field.gt.is_some_and(|gt| n <= gt) || field.lt.is_some_and(|lt| n >= lt) {
        return Err(ErrorReason::OutOfRange);
    }
    Ok(())
}

/// `local@domain` with at least one `.` in the domain
fn is_email(text: &str) -> bool {
    if text.len() > 254 {
        return false;
    }
    match text.split_once('@') {
        Some((local, _)) if local.len() > 64 => false,
        Some(_) => email_pattern().is_match(text),
        None => false,
    }
}

fn describe(field: &FieldSpec, reason: ErrorReason, raw: &Value) -> String {
    match reason {
        ErrorReason::Missing => "field required".to_string(),
        ErrorReason::TooShort => format!(
            "ensure this value has at least {} characters",
            field.min_length.unwrap_or_default()
        ),
        ErrorReason::TooLong => format!(
            "ensure this value has at most {} characters",
            field.max_length.unwrap_or_default()
        ),
        ErrorReason::OutOfRange if matches!(coerce_int(raw), Ok(Integral::Overflow)) => {
            "ensure this value fits in a 64-bit integer".to_string()
        }
        ErrorReason::OutOfRange => match (field.gt, field.lt) {
            (Some(gt), Some(lt)) => {
                format!("ensure this value is greater than {} and less than {}", gt, lt)
            }
            (Some(gt), None) => format!("ensure this value is greater than {}", gt),
            (None, Some(lt)) => format!("ensure this value is less than {}", lt),
            (None, None) => "value out of range".to_string(),
        },
        ErrorReason::NotInEnum => match &field.field_type {
            FieldType::Enum { values } => format!(
                "value is not a valid enumeration member; permitted: {}",
                values
                    .iter()
                    .map(|v| format!("'{}'", v))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            _ => "value is not a valid enumeration member".to_string(),
        },
        ErrorReason::BadFormat => match field.field_type {
            FieldType::Email => "value is not a valid email address".to_string(),
            ref other => format!("value is not a valid {}", other.type_name()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person_spec() -> RecordSpec {
        RecordSpec::new(
            "person",
            vec![
                FieldSpec::required_string("first_name").with_length(1, 50),
                FieldSpec::required_int("age").greater_than(0).less_than(115),
                FieldSpec::optional_enum("hair_color", ["white", "black", "red"]),
                FieldSpec::optional_bool("is_married"),
                FieldSpec::required_email("email"),
            ],
        )
    }

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    fn valid_person() -> Value {
        json!({
            "first_name": "Eduardo",
            "age": 23,
            "hair_color": "black",
            "is_married": false,
            "email": "morales-martines19@hotmail.com"
        })
    }

    #[test]
    fn test_valid_payload_passes() {
        let record = validate(&person_spec(), &raw(valid_person())).unwrap();
        assert_eq!(record.get_str("first_name"), Some("Eduardo"));
        assert_eq!(record.get_i64("age"), Some(23));
        assert_eq!(record.get_str("hair_color"), Some("black"));
        assert_eq!(record.get_bool("is_married"), Some(false));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_missing_required_field() {
        let mut payload = raw(valid_person());
        payload.remove("email");

        let err = validate(&person_spec(), &payload).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.reason_for("email"), Some(ErrorReason::Missing));
    }

    #[test]
    fn test_optional_fields_resolve_absent() {
        let mut payload = raw(valid_person());
        payload.remove("hair_color");
        payload.insert("is_married".into(), Value::Null);

        let record = validate(&person_spec(), &payload).unwrap();
        assert_eq!(record.resolved("hair_color"), Some(&Resolved::Absent));
        assert_eq!(record.resolved("is_married"), Some(&Resolved::Absent));
    }

    #[test]
    fn test_optional_field_takes_default() {
        let spec = RecordSpec::new(
            "login_out",
            vec![
                FieldSpec::required_string("username"),
                FieldSpec::optional_string("message").with_default("Created succesfully"),
            ],
        );
        let record = validate(&spec, &raw(json!({"username": "eduardo"}))).unwrap();
        assert_eq!(
            record.resolved("message"),
            Some(&Resolved::Defaulted(json!("Created succesfully")))
        );
    }

    #[test]
    fn test_null_on_required_field_is_bad_format() {
        let mut payload = raw(valid_person());
        payload.insert("first_name".into(), Value::Null);

        let err = validate(&person_spec(), &payload).unwrap_err();
        assert_eq!(err.reason_for("first_name"), Some(ErrorReason::BadFormat));
    }

    #[test]
    fn test_string_length_bounds() {
        let spec = RecordSpec::new(
            "name",
            vec![FieldSpec::required_string("name").with_length(2, 4)],
        );
        let check = |s: &str| validate(&spec, &raw(json!({ "name": s })));

        assert_eq!(check("a").unwrap_err().reason_for("name"), Some(ErrorReason::TooShort));
        assert!(check("ab").is_ok());
        assert!(check("abcd").is_ok());
        assert_eq!(check("abcde").unwrap_err().reason_for("name"), Some(ErrorReason::TooLong));
        // counted in characters, not bytes
        assert!(check("ññññ").is_ok());
    }

    #[test]
    fn test_integer_bounds_are_exclusive() {
        let spec = person_spec();
        let check = |age: Value| {
            let mut payload = raw(valid_person());
            payload.insert("age".into(), age);
            validate(&spec, &payload)
        };

        assert_eq!(check(json!(0)).unwrap_err().reason_for("age"), Some(ErrorReason::OutOfRange));
        assert!(check(json!(1)).is_ok());
        assert!(check(json!(114)).is_ok());
        assert_eq!(check(json!(115)).unwrap_err().reason_for("age"), Some(ErrorReason::OutOfRange));
    }

    #[test]
    fn test_integer_coercion() {
        let spec = person_spec();
        let check = |age: Value| {
            let mut payload = raw(valid_person());
            payload.insert("age".into(), age);
            validate(&spec, &payload)
        };

        assert_eq!(check(json!("42")).unwrap().get_i64("age"), Some(42));
        assert_eq!(check(json!(42.0)).unwrap().get_i64("age"), Some(42));
        assert_eq!(check(json!("4x")).unwrap_err().reason_for("age"), Some(ErrorReason::BadFormat));
        assert_eq!(check(json!(4.5)).unwrap_err().reason_for("age"), Some(ErrorReason::BadFormat));
        assert_eq!(check(json!(true)).unwrap_err().reason_for("age"), Some(ErrorReason::BadFormat));
        assert_eq!(
            check(json!("200")).unwrap_err().reason_for("age"),
            Some(ErrorReason::OutOfRange)
        );
        assert_eq!(check(json!(" -3 ")).unwrap_err().reason_for("age"), Some(ErrorReason::OutOfRange));
        assert_eq!(check(json!("+1_0")).unwrap_err().reason_for("age"), Some(ErrorReason::BadFormat));
        assert_eq!(check(json!("-")).unwrap_err().reason_for("age"), Some(ErrorReason::BadFormat));
    }

    #[test]
    fn test_integer_overflow_is_out_of_range() {
        let spec = person_spec();
        let check = |age: Value| {
            let mut payload = raw(valid_person());
            payload.insert("age".into(), age);
            validate(&spec, &payload).unwrap_err()
        };

        for age in [
            json!("99999999999999999999"),
            json!("-99999999999999999999"),
            json!(1e20),
            json!(u64::MAX),
        ] {
            let err = check(age.clone());
            assert_eq!(err.reason_for("age"), Some(ErrorReason::OutOfRange), "{}", age);
            assert_eq!(err.errors()[0].message, "ensure this value fits in a 64-bit integer");
        }

        let err = check(json!(200));
        assert_eq!(
            err.errors()[0].message,
            "ensure this value is greater than 0 and less than 115"
        );
    }

    #[test]
    fn test_boolean_coercion() {
        let spec = RecordSpec::new("flag", vec![FieldSpec::required_bool("flag")]);
        let check = |v: Value| validate(&spec, &raw(json!({ "flag": v })));

        assert_eq!(check(json!(true)).unwrap().get_bool("flag"), Some(true));
        assert_eq!(check(json!("Yes")).unwrap().get_bool("flag"), Some(true));
        assert_eq!(check(json!("off")).unwrap().get_bool("flag"), Some(false));
        assert_eq!(check(json!(0)).unwrap().get_bool("flag"), Some(false));
        assert_eq!(check(json!("t")).unwrap().get_bool("flag"), Some(true));
        assert_eq!(check(json!("Y")).unwrap().get_bool("flag"), Some(true));
        assert_eq!(check(json!("f")).unwrap().get_bool("flag"), Some(false));
        assert_eq!(check(json!("n")).unwrap().get_bool("flag"), Some(false));
        assert!(check(json!(2)).is_err());
        assert!(check(json!("maybe")).is_err());
    }

    #[test]
    fn test_enum_membership_is_literal() {
        let spec = person_spec();
        let check = |color: &str| {
            let mut payload = raw(valid_person());
            payload.insert("hair_color".into(), json!(color));
            validate(&spec, &payload)
        };

        assert!(check("red").is_ok());
        assert_eq!(
            check("Red").unwrap_err().reason_for("hair_color"),
            Some(ErrorReason::NotInEnum)
        );
        assert_eq!(
            check("blonde").unwrap_err().reason_for("hair_color"),
            Some(ErrorReason::NotInEnum)
        );
    }

    #[test]
    fn test_email_format() {
        assert!(is_email("morales-martines19@hotmail.com"));
        assert!(is_email("a.b+tag@mail.example.org"));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("user@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user@.com"));
        assert!(!is_email("user@example."));
        assert!(!is_email("us er@example.com"));
    }

    #[test]
    fn test_email_local_part_dots() {
        assert!(is_email("a.b.c@x.com"));
        assert!(!is_email(".a@x.com"));
        assert!(!is_email("a.@x.com"));
        assert!(!is_email("a..b@x.com"));
    }

    #[test]
    fn test_email_length_checked_before_format() {
        let spec = RecordSpec::new(
            "contact",
            vec![FieldSpec::required_email("email").with_max_length(5)],
        );
        let err = validate(&spec, &raw(json!({"email": "not-an-email"}))).unwrap_err();
        assert_eq!(err.reason_for("email"), Some(ErrorReason::TooLong));
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let payload = raw(json!({
            "first_name": "",
            "age": 200,
            "hair_color": "green",
            "is_married": "perhaps",
            "email": "nope"
        }));

        let err = validate(&person_spec(), &payload).unwrap_err();
        let fields: Vec<_> = err.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["first_name", "age", "hair_color", "is_married", "email"]
        );
    }

    #[test]
    fn test_one_error_per_field() {
        let spec = RecordSpec::new(
            "short",
            vec![FieldSpec::required_email("email").with_min_length(50)],
        );
        let err = validate(&spec, &raw(json!({"email": "x"}))).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.reason_for("email"), Some(ErrorReason::TooShort));
    }

    #[test]
    fn test_undeclared_keys_ignored() {
        let mut payload = raw(valid_person());
        payload.insert("nickname".into(), json!("Lalo"));

        let record = validate(&person_spec(), &payload).unwrap();
        assert_eq!(record.get("nickname"), None);
    }

    #[test]
    fn test_string_fields_reject_non_strings() {
        let mut payload = raw(valid_person());
        payload.insert("first_name".into(), json!(123));

        let err = validate(&person_spec(), &payload).unwrap_err();
        assert_eq!(err.reason_for("first_name"), Some(ErrorReason::BadFormat));
        assert_eq!(err.errors()[0].message, "value is not a valid string");
    }

    #[test]
    fn test_messages_describe_constraints() {
        let mut payload = raw(valid_person());
        payload.insert("age".into(), json!(200));
        payload.insert("hair_color".into(), json!("green"));

        let err = validate(&person_spec(), &payload).unwrap_err();
        assert_eq!(
            err.errors()[0].message,
            "ensure this value is greater than 0 and less than 115"
        );
        assert!(err.errors()[1].message.contains("'white', 'black', 'red'"));
    }

    #[test]
    fn test_raw_from_strings() {
        let raw = raw_from_strings([("age", "30"), ("name", "Ana")]);
        assert_eq!(raw.get("age"), Some(&json!("30")));
        assert_eq!(raw.len(), 2);
    }
}
