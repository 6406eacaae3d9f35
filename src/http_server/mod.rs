//! # HTTP Server Module
//!
//! Hosts the validation routes on axum. Raw values are pulled from each
//! request location, validated against the catalog's record specs, and
//! echoed back on success.
//!
//! # Endpoints
//!
//! - `/`, `/health` - Greeting and health check
//! - `/person/*` - Body, query and path parameters
//! - `/login`, `/contact` - Form, header and cookie parameters
//! - `/post-image` - Multipart file upload

pub mod config;
pub mod errors;
pub mod extract;
pub mod form_routes;
pub mod observability_routes;
pub mod person_routes;
pub mod server;
pub mod state;
pub mod upload_routes;

pub use config::{ConfigError, HttpServerConfig};
pub use errors::{ApiError, ErrorDetail};
pub use extract::Location;
pub use server::HttpServer;
pub use state::{AppState, RouteSpecs};
