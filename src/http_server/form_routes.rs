//! Form HTTP Routes
//!
//! URL-encoded form bodies, plus header and cookie parameters on /contact.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::rejection::FormRejection,
    extract::State,
    http::HeaderMap,
    routing::post,
    Form, Json, Router,
};
use serde_json::Value;

use crate::schema::{RawRecord, ValidatedRecord};

use super::errors::ApiError;
use super::extract::{check, check_headers, cookie_values, join, string_map, Location};
use super::state::AppState;

/// Create form routes
pub fn form_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .route("/contact", post(contact_handler))
        .with_state(state)
}

/// POST /login: echoes the username with the default message
async fn login_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Json<ValidatedRecord>, ApiError> {
    let Form(form) = form?;
    let login = check(Location::Form, &state.specs.login_form, &string_map(form))?;

    let mut out = RawRecord::new();
    if let Some(username) = login.get("username") {
        out.insert("username".to_string(), username.clone());
    }
    let response = check(Location::Form, &state.specs.login_out, &out)?;

    Ok(Json(response))
}

/// POST /contact: returns the `user-info` header, or null
async fn contact_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Json<Value>, ApiError> {
    let Form(form) = form?;
    let specs = &state.specs;

    let form = check(Location::Form, &specs.contact_form, &string_map(form));
    let header_record = check_headers(&specs.contact_headers, &headers);
    let cookies = check(Location::Cookie, &specs.contact_cookies, &cookie_values(&headers));

    let ((_, header_record), _) = join(join(form, header_record), cookies)?;

    Ok(Json(header_record.get("user_info").cloned().unwrap_or(Value::Null)))
}
