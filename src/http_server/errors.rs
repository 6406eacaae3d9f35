//! HTTP error responses
//!
//! - `Validation` -> 422 `{"detail": [{"loc", "field", "reason", "msg"}, ...]}`
//! - `NotFound`   -> 404 `{"detail": "This person doesnt exist"}`
//! - `Transport`  -> the framework's status (400, 413, 415) `{"detail": msg}`
//!
//! Every error response carries an `x-correlation-id` header.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{header::HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::people::NotFoundError;
use crate::schema::{ErrorReason, FieldError};

use super::extract::Location;

const CORRELATION_HEADER: &str = "x-correlation-id";

/// One located field failure, as sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    /// `[location, field]`
    pub loc: [String; 2],
    pub field: String,
    pub reason: ErrorReason,
    pub msg: String,
}

impl ErrorDetail {
    pub fn new(
        location: Location,
        field: impl Into<String>,
        reason: ErrorReason,
        msg: impl Into<String>,
    ) -> Self {
        let field = field.into();
        Self {
            loc: [location.as_str().to_string(), field.clone()],
            field,
            reason,
            msg: msg.into(),
        }
    }

    pub fn missing(location: Location, field: impl Into<String>) -> Self {
        Self::new(location, field, ErrorReason::Missing, "field required")
    }

    pub fn located(location: Location, error: FieldError) -> Self {
        Self::new(location, error.field, error.reason, error.message)
    }
}

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<ErrorDetail>),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Malformed transport data rejected before validation
    #[error("{message}")]
    Transport { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Transport { status, .. } => *status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::Transport {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<Vec<ErrorDetail>> for ApiError {
    fn from(details: Vec<ErrorDetail>) -> Self {
        ApiError::Validation(details)
    }
}

macro_rules! transport_error_from {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    ApiError::Transport {
                        status: rejection.status(),
                        message: rejection.body_text(),
                    }
                }
            }
        )*
    };
}

transport_error_from!(
    JsonRejection,
    FormRejection,
    QueryRejection,
    PathRejection,
    MultipartRejection,
    MultipartError,
);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let correlation_id = Uuid::new_v4().to_string();

        let body = match &self {
            ApiError::Validation(details) => {
                tracing::debug!(
                    correlation_id = %correlation_id,
                    errors = details.len(),
                    "request validation failed"
                );
                json!({ "detail": details })
            }
            ApiError::NotFound(err) => {
                tracing::debug!(correlation_id = %correlation_id, id = err.id, "person not found");
                json!({ "detail": err.to_string() })
            }
            ApiError::Transport { message, .. } => {
                tracing::debug!(
                    correlation_id = %correlation_id,
                    status = status.as_u16(),
                    "malformed request: {}",
                    message
                );
                json!({ "detail": message })
            }
        };

        let mut response = (status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&correlation_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(CORRELATION_HEADER), value);
        }
        response
    }
}
