//! Person HTTP Routes
//!
//! Body, query and path validation. Handlers echo what they validated.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    http::{header::HeaderName, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{Map, Value};

use crate::schema::ValidatedRecord;

use super::errors::ApiError;
use super::extract::{body_object, check, join, require_i64, string_map, Location};
use super::state::AppState;

/// Create person routes
pub fn person_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/person/new", post(create_person_handler))
        .route("/person/detail", get(show_person_handler))
        .route("/person/detail/:person_id", get(show_person_by_id_handler))
        .route("/person/:person_id", put(update_person_handler))
        .with_state(state)
}

/// POST /person/new: 201 with the person minus its password
async fn create_person_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ValidatedRecord>), ApiError> {
    let raw = body_object(body)?;
    let person = check(Location::Body, &state.specs.person, &raw)?;

    Ok((StatusCode::CREATED, Json(person.project(&state.specs.person_out))))
}

/// GET /person/detail?name=&age=: `{name: age}`. Deprecated endpoint.
async fn show_person_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let record = check(Location::Query, &state.specs.person_query, &string_map(query))?;

    let name = record.get_str("name").unwrap_or("null").to_string();
    let age = record.get("age").cloned().unwrap_or(Value::Null);

    let mut body = Map::new();
    body.insert(name, age);

    Ok((
        [(HeaderName::from_static("deprecation"), "true")],
        Json(Value::Object(body)),
    ))
}

/// GET /person/detail/:person_id: 404 unless the id is known
async fn show_person_by_id_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<HashMap<String, String>>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(path) = path?;
    let record = check(Location::Path, &state.specs.person_id, &string_map(path))?;
    let id = require_i64(&record, Location::Path, "person_id")?;

    let id = state.people.lookup(id)?;

    let mut body = Map::new();
    body.insert(id.to_string(), Value::from("its exist"));
    Ok(Json(Value::Object(body)))
}

/// PUT /person/:person_id: path and body errors are reported together
async fn update_person_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<HashMap<String, String>>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ValidatedRecord>, ApiError> {
    let Path(path) = path?;
    let raw_body = body_object(body)?;

    let (_, person) = join(
        check(Location::Path, &state.specs.person_id, &string_map(path)),
        check(Location::Body, &state.specs.person, &raw_body),
    )?;

    Ok(Json(person))
}
