//! Schema Invariant Tests
//!
//! Validation behavior of the standard catalog:
//! - All failing fields are reported, not just the first
//! - Validation is deterministic
//! - Defaults fill absent optional fields
//! - Structurally invalid specs never enter the catalog

use person_api::schema::catalog::names;
use person_api::schema::{
    raw_from_strings, Catalog, ErrorReason, FieldSpec, RawRecord, RecordSpec, Resolved,
    SpecError,
};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn catalog() -> Catalog {
    Catalog::standard().unwrap()
}

fn object(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

fn valid_person() -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "age": 36,
        "hair_color": "black",
        "is_married": true,
        "email": "ada@example.com",
        "password": "analytical"
    })
}

fn person_with(key: &str, value: Value) -> RawRecord {
    let mut raw = object(valid_person());
    raw.insert(key.to_string(), value);
    raw
}

// =============================================================================
// Range and Format Tests
// =============================================================================

#[test]
fn test_age_out_of_range() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();

    let err = spec.validate(&person_with("age", json!("200"))).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.reason_for("age"), Some(ErrorReason::OutOfRange));
}

#[test]
fn test_age_bounds_are_exclusive() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();

    for age in [0, 115] {
        let err = spec.validate(&person_with("age", json!(age))).unwrap_err();
        assert_eq!(err.reason_for("age"), Some(ErrorReason::OutOfRange));
    }
    for age in [1, 114] {
        assert!(spec.validate(&person_with("age", json!(age))).is_ok());
    }
}

#[test]
fn test_bad_email() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();

    let err = spec
        .validate(&person_with("email", json!("not-an-email")))
        .unwrap_err();
    assert_eq!(err.reason_for("email"), Some(ErrorReason::BadFormat));
}

#[test]
fn test_hair_color_must_be_listed() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();

    let err = spec
        .validate(&person_with("hair_color", json!("blue")))
        .unwrap_err();
    assert_eq!(err.reason_for("hair_color"), Some(ErrorReason::NotInEnum));
}

#[test]
fn test_name_length_limits() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();

    let err = spec
        .validate(&person_with("first_name", json!("")))
        .unwrap_err();
    assert_eq!(err.reason_for("first_name"), Some(ErrorReason::TooShort));

    let err = spec
        .validate(&person_with("last_name", json!("x".repeat(51))))
        .unwrap_err();
    assert_eq!(err.reason_for("last_name"), Some(ErrorReason::TooLong));
}

#[test]
fn test_contact_message_too_short() {
    let catalog = catalog();
    let spec = catalog.get(names::CONTACT_FORM).unwrap();

    let raw = raw_from_strings([
        ("first_name", "Ada"),
        ("last_name", "Lovelace"),
        ("message", "too short"),
        ("email", "ada@example.com"),
    ]);
    let err = spec.validate(&raw).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.reason_for("message"), Some(ErrorReason::TooShort));
}

// =============================================================================
// Accumulation Tests
// =============================================================================

/// Two invalid fields produce two errors.
#[test]
fn test_errors_accumulate() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();

    let mut raw = person_with("age", json!(200));
    raw.insert("email".into(), json!("nope"));

    let err = spec.validate(&raw).unwrap_err();
    assert_eq!(err.len(), 2);
    assert_eq!(err.reason_for("age"), Some(ErrorReason::OutOfRange));
    assert_eq!(err.reason_for("email"), Some(ErrorReason::BadFormat));
}

/// Every missing required field is reported.
#[test]
fn test_empty_input_reports_all_required() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();

    let err = spec.validate(&RawRecord::new()).unwrap_err();
    let missing: Vec<_> = err
        .errors()
        .iter()
        .filter(|e| e.reason == ErrorReason::Missing)
        .map(|e| e.field.as_str())
        .collect();
    assert_eq!(
        missing,
        vec!["first_name", "last_name", "age", "email", "password"]
    );
}

/// Same input fails the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();
    let raw = person_with("age", json!("abc"));

    let first = spec.validate(&raw).unwrap_err();
    for _ in 0..50 {
        assert_eq!(spec.validate(&raw).unwrap_err(), first);
    }
}

// =============================================================================
// Defaults and Optional Fields
// =============================================================================

#[test]
fn test_login_out_default_message() {
    let catalog = catalog();
    let spec = catalog.get(names::LOGIN_OUT).unwrap();

    let record = spec.validate(&raw_from_strings([("username", "ada")])).unwrap();
    assert_eq!(record.get_str("message"), Some("Created succesfully"));
    assert!(matches!(
        record.resolved("message"),
        Some(Resolved::Defaulted(_))
    ));
}

#[test]
fn test_optional_fields_may_be_absent() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();

    let mut raw = object(valid_person());
    raw.remove("hair_color");
    raw.remove("is_married");

    let record = spec.validate(&raw).unwrap();
    assert_eq!(record.resolved("hair_color"), Some(&Resolved::Absent));
    assert_eq!(record.get("is_married"), None);
}

#[test]
fn test_undeclared_keys_ignored() {
    let catalog = catalog();
    let spec = catalog.get(names::PERSON).unwrap();

    let record = spec
        .validate(&person_with("nickname", json!("Countess")))
        .unwrap();
    assert!(record.get("nickname").is_none());
}

#[test]
fn test_person_out_drops_password() {
    let catalog = catalog();
    let person = catalog.get(names::PERSON).unwrap();
    let person_out = catalog.get(names::PERSON_OUT).unwrap();

    let record = person.validate(&object(valid_person())).unwrap();
    let out = record.project(person_out).to_json();
    assert!(out.get("password").is_none());
    assert_eq!(out["email"], "ada@example.com");
}

// =============================================================================
// Catalog Structure Tests
// =============================================================================

#[test]
fn test_catalog_rejects_bad_default() {
    let mut catalog = Catalog::new();
    let spec = RecordSpec::new(
        "bad",
        vec![FieldSpec::optional_string("code")
            .with_max_length(2)
            .with_default("toolong")],
    );
    assert!(catalog.register(spec).is_err());
    assert!(!catalog.contains("bad"));
}

#[test]
fn test_catalog_rejects_duplicate_record() {
    let mut catalog = catalog();
    let again = RecordSpec::new(names::PERSON, vec![FieldSpec::required_string("x")]);
    assert!(matches!(
        catalog.register(again),
        Err(SpecError::DuplicateRecord(name)) if name == names::PERSON
    ));
}
