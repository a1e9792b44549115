//! HTTP request handlers for the mock server.

pub mod auth;
pub mod resources;

pub use auth::*;
pub use resources::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// A JSON-API error document with a single error object.
pub(crate) fn error_response(status: StatusCode, title: &str, detail: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "errors": [{
                "status": status.as_u16().to_string(),
                "title": title,
                "detail": detail
            }]
        })),
    )
        .into_response()
}
