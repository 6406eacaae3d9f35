//! People directory
//!
//! A fixed set of known person identifiers. Used only to signal the
//! not-found path; no person data is stored.

mod directory;
mod errors;

pub use directory::{PeopleDirectory, DEFAULT_PEOPLE};
pub use errors::{NotFoundError, NOT_FOUND_MESSAGE};
