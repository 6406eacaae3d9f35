//! Upload HTTP Routes
//!
//! Multipart file upload. The file is read fully into memory; the request
//! body limit configured on the server bounds its size.

use axum::{
    body::Bytes,
    extract::multipart::{Multipart, MultipartRejection},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use crate::schema::ErrorReason;

use super::errors::{ApiError, ErrorDetail};
use super::extract::Location;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file part read from a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    /// Size in KiB rounded to two decimals, ties to even
    pub fn size_kb(&self) -> f64 {
        (self.data.len() as f64 / 1024.0 * 100.0).round_ties_even() / 100.0
    }
}

/// Create upload routes
pub fn upload_routes() -> Router {
    Router::new().route("/post-image", post(post_image_handler))
}

/// POST /post-image: name, content type and size of the `image` part
async fn post_image_handler(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut multipart = multipart?;
    let image = read_file_field(&mut multipart, "image").await?;

    tracing::info!(
        filename = %image.filename,
        bytes = image.data.len(),
        "image received"
    );

    Ok(Json(json!({
        "File-name": image.filename,
        "content-type": image.content_type,
        "size(kb)": image.size_kb(),
    })))
}

/// Reads the first part named `name`, which must carry a filename.
async fn read_file_field(multipart: &mut Multipart, name: &str) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(name) {
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_owned) else {
            return Err(ApiError::Validation(vec![ErrorDetail::new(
                Location::File,
                name,
                ErrorReason::BadFormat,
                "expected an uploaded file",
            )]));
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await?;

        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    Err(ApiError::Validation(vec![ErrorDetail::missing(Location::File, name)]))
}
