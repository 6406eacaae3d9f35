//! person-api - typed request validation over HTTP
//!
//! Record specs describe the fields a request carries; the validator checks
//! raw input against them and reports every failing field at once.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod people;
pub mod schema;
