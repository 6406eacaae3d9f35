//! Observability
//!
//! Logging setup for the CLI and server. Request-level spans come from
//! `tower_http::trace::TraceLayer` in the HTTP server.

mod logger;

pub use logger::{env_filter, init_logging, LogFormat};
