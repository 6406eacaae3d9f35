//! Shared application state
//!
//! Immutable after startup; handlers receive it as `Arc<AppState>`.

use crate::people::PeopleDirectory;
use crate::schema::catalog::names;
use crate::schema::{Catalog, RecordSpec, SpecError, SpecResult};

/// Record specs the routes use, resolved from the catalog once.
#[derive(Debug, Clone)]
pub struct RouteSpecs {
    pub person: RecordSpec,
    pub person_out: RecordSpec,
    pub person_query: RecordSpec,
    pub person_id: RecordSpec,
    pub login_form: RecordSpec,
    pub login_out: RecordSpec,
    pub contact_form: RecordSpec,
    pub contact_headers: RecordSpec,
    pub contact_cookies: RecordSpec,
}

impl RouteSpecs {
    pub fn from_catalog(catalog: &Catalog) -> SpecResult<Self> {
        let get = |name: &str| {
            catalog.get(name).cloned().ok_or_else(|| {
                SpecError::malformed("catalog", format!("record '{}' is not registered", name))
            })
        };

        Ok(Self {
            person: get(names::PERSON)?,
            person_out: get(names::PERSON_OUT)?,
            person_query: get(names::PERSON_QUERY)?,
            person_id: get(names::PERSON_ID)?,
            login_form: get(names::LOGIN_FORM)?,
            login_out: get(names::LOGIN_OUT)?,
            contact_form: get(names::CONTACT_FORM)?,
            contact_headers: get(names::CONTACT_HEADERS)?,
            contact_cookies: get(names::CONTACT_COOKIES)?,
        })
    }
}

/// State shared across handlers
#[derive(Debug)]
pub struct AppState {
    pub catalog: Catalog,
    pub specs: RouteSpecs,
    pub people: PeopleDirectory,
}

impl AppState {
    pub fn new(catalog: Catalog, people: PeopleDirectory) -> SpecResult<Self> {
        let specs = RouteSpecs::from_catalog(&catalog)?;
        Ok(Self {
            catalog,
            specs,
            people,
        })
    }

    /// Standard catalog and the default people set
    pub fn standard() -> SpecResult<Self> {
        Self::new(Catalog::standard()?, PeopleDirectory::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_state() {
        let state = AppState::standard().unwrap();
        assert_eq!(state.specs.person.name, names::PERSON);
        assert_eq!(state.specs.contact_cookies.name, names::CONTACT_COOKIES);
        assert!(state.people.contains(5));
    }

    #[test]
    fn test_incomplete_catalog_rejected() {
        let err = AppState::new(Catalog::new(), PeopleDirectory::default()).unwrap_err();
        assert!(err.to_string().contains("person"));
    }
}
