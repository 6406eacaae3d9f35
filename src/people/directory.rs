use std::collections::BTreeSet;

use super::errors::NotFoundError;

/// Identifiers known when no configuration overrides them
pub const DEFAULT_PEOPLE: [i64; 5] = [1, 2, 3, 4, 5];

/// Immutable set of known person identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeopleDirectory {
    known: BTreeSet<i64>,
}

impl PeopleDirectory {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            known: ids.into_iter().collect(),
        }
    }

    /// Returns `id` if it is known.
    ///
    /// # Errors
    ///
    /// `NotFoundError` when `id` is not in the set.
    pub fn lookup(&self, id: i64) -> Result<i64, NotFoundError> {
        if self.known.contains(&id) {
            Ok(id)
        } else {
            Err(NotFoundError { id })
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.known.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.known.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl Default for PeopleDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_PEOPLE)
    }
}
