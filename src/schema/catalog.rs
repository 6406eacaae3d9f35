//! Record spec catalog
//!
//! Holds every record spec the routes validate against. Built once at
//! startup and shared read-only afterwards. Extra specs can be loaded from
//! JSON files: one file holds either a single spec or an array of specs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::{SpecError, SpecResult};
use super::types::{FieldSpec, RecordSpec};

/// Record names used by the routes
pub mod names {
    pub const PERSON: &str = "person";
    pub const PERSON_OUT: &str = "person_out";
    pub const PERSON_QUERY: &str = "person_query";
    pub const PERSON_ID: &str = "person_id";
    pub const LOGIN_FORM: &str = "login_form";
    pub const LOGIN_OUT: &str = "login_out";
    pub const CONTACT_FORM: &str = "contact_form";
    pub const CONTACT_HEADERS: &str = "contact_headers";
    pub const CONTACT_COOKIES: &str = "contact_cookies";
}

pub const HAIR_COLORS: [&str; 3] = ["white", "black", "red"];

/// Registry of record specs indexed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    specs: BTreeMap<String, RecordSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecFile {
    Many(Vec<RecordSpec>),
    One(RecordSpec),
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the catalog used by the HTTP routes.
    pub fn standard() -> SpecResult<Self> {
        let mut catalog = Self::new();

        let person = RecordSpec::new(
            names::PERSON,
            vec![
                FieldSpec::required_string("first_name").with_length(1, 50),
                FieldSpec::required_string("last_name").with_length(1, 50),
                FieldSpec::required_int("age").greater_than(0).less_than(115),
                FieldSpec::optional_enum("hair_color", HAIR_COLORS),
                FieldSpec::optional_bool("is_married"),
                FieldSpec::required_email("email"),
                FieldSpec::required_string("password"),
            ],
        );
        let person_out = person.without(names::PERSON_OUT, &["password"]);

        catalog.register(person)?;
        catalog.register(person_out)?;

        catalog.register(RecordSpec::new(
            names::PERSON_QUERY,
            vec![
                FieldSpec::optional_string("name")
                    .with_length(1, 50)
                    .with_description("This is the person name. Its optional"),
                FieldSpec::required_string("age")
                    .with_description("This is the person age. Its required"),
            ],
        ))?;

        catalog.register(RecordSpec::new(
            names::PERSON_ID,
            vec![FieldSpec::required_int("person_id")
                .greater_than(0)
                .with_description("This is the person id. Its required")],
        ))?;

        catalog.register(RecordSpec::new(
            names::LOGIN_FORM,
            vec![
                FieldSpec::required_string("username"),
                FieldSpec::required_string("password"),
            ],
        ))?;

        catalog.register(RecordSpec::new(
            names::LOGIN_OUT,
            vec![
                FieldSpec::required_string("username"),
                FieldSpec::optional_string("message").with_default("Created succesfully"),
            ],
        ))?;

        catalog.register(RecordSpec::new(
            names::CONTACT_FORM,
            vec![
                FieldSpec::required_string("first_name"),
                FieldSpec::required_string("last_name"),
                FieldSpec::required_string("message").with_min_length(20),
                FieldSpec::required_email("email"),
            ],
        ))?;

        catalog.register(RecordSpec::new(
            names::CONTACT_HEADERS,
            vec![FieldSpec::optional_string("user_info")],
        ))?;

        catalog.register(RecordSpec::new(
            names::CONTACT_COOKIES,
            vec![FieldSpec::optional_string("ads")],
        ))?;

        Ok(catalog)
    }

    /// Registers a spec after checking its structure.
    ///
    /// Names are unique; registering an existing name is an error.
    pub fn register(&mut self, spec: RecordSpec) -> SpecResult<()> {
        spec.validate_structure()?;

        if self.specs.contains_key(&spec.name) {
            return Err(SpecError::DuplicateRecord(spec.name));
        }

        self.specs.insert(spec.name.clone(), spec);
        Ok(())
    }

    /// Loads one spec file and registers every spec in it.
    ///
    /// Returns the number of specs registered.
    pub fn load_file(&mut self, path: &Path) -> SpecResult<usize> {
        let source = path.display().to_string();

        let content = fs::read_to_string(path)
            .map_err(|e| SpecError::malformed(&source, format!("failed to read file: {}", e)))?;

        let specs = match serde_json::from_str(&content)
            .map_err(|e| SpecError::malformed(&source, format!("invalid JSON: {}", e)))?
        {
            SpecFile::Many(specs) => specs,
            SpecFile::One(spec) => vec![spec],
        };

        let count = specs.len();
        for spec in specs {
            self.register(spec)?;
        }
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Option<&RecordSpec> {
        self.specs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Registered record names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
