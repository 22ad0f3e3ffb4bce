//! Application error type mapping to HTTP responses.
//!
//! Web clients read the `status` field of the body, so input rejections keep
//! HTTP 200 and carry `status: "error"` with a message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sewage_types::error::QueryError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The chat question was missing or blank.
    Query(QueryError),
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::Query(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Query(e) => (StatusCode::OK, e.to_string()),
        };

        tracing::debug!(%status, %message, "request rejected");

        let body = json!({
            "status": "error",
            "message": message,
            "timestamp": chrono::Utc::now().timestamp_millis(),
        });

        (status, Json(body)).into_response()
    }
}
