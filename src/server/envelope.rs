//! Uniform response envelope.
//!
//! Every endpoint answers with one of two shapes:
//!
//! ```text
//! Success: { "success": true,  "data": <payload>, "message": <string> }
//! Error:   { "success": false, "error": <string>, "code": <int> }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::catalog::CatalogError;

pub fn success<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    Json(json!({
        "success": true,
        "data": data,
        "message": message.into(),
    }))
    .into_response()
}

pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": data,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message,
            "code": status.as_u16(),
        })),
    )
        .into_response()
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
            CatalogError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, &msg),
            CatalogError::Conflict(msg) => error_response(StatusCode::CONFLICT, &msg),
            CatalogError::Storage(err) => {
                // Full detail goes to the log, the client gets a
                // sanitized message.
                error!("Storage failure: {:#}", err);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
