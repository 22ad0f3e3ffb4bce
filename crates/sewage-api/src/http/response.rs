//! HTTP rendering of the result envelope.
//!
//! ```json
//! { "status": "success", "data": ... }   // 200
//! { "status": "error" }                  // 500
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use sewage_types::envelope::Envelope;

/// Wrapper that renders an [`Envelope`] with a status code matching its tag.
#[derive(Debug)]
pub struct EnvelopeResponse<T>(pub Envelope<T>);

impl<T> From<Envelope<T>> for EnvelopeResponse<T> {
    fn from(envelope: Envelope<T>) -> Self {
        Self(envelope)
    }
}

impl<T: Serialize> IntoResponse for EnvelopeResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.0.is_success() {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_is_ok_with_data() {
        let response = EnvelopeResponse(Envelope::success(vec![1, 2])).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"status": "success", "data": [1, 2]})
        );
    }

    #[tokio::test]
    async fn test_error_is_500_without_data() {
        let response = EnvelopeResponse(Envelope::<String>::error()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, serde_json::json!({"status": "error"}));
    }
}
