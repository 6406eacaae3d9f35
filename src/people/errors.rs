use thiserror::Error;

/// Message returned to clients for unknown identifiers
pub const NOT_FOUND_MESSAGE: &str = "This person doesnt exist";

/// Referenced identifier is not in the known set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("This person doesnt exist")]
pub struct NotFoundError {
    /// The identifier that was looked up
    pub id: i64,
}
