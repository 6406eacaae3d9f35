//! Observability HTTP Routes
//!
//! Root greeting and health check.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check and root routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
}

async fn home_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "Hello": "World" })))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
