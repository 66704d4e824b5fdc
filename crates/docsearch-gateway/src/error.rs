//! API error types mapped to HTTP status codes.
//!
//! Each [`ApiError`] variant produces a JSON body `{"error": "message"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docsearch_core::error::DocSearchError;
use serde_json::json;

/// Handler error type.
///
/// - `BadRequest` → 400
/// - `Internal` → 500
#[derive(Debug)]
pub enum ApiError {
    /// Missing or invalid request field (400).
    BadRequest(String),
    /// Anything that went wrong while handling the request (500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<DocSearchError> for ApiError {
    fn from(err: DocSearchError) -> Self {
        match err {
            DocSearchError::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let resp = ApiError::BadRequest("Query is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = ApiError::Internal("boom".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_core_error() {
        let api: ApiError = DocSearchError::Api {
            status: 503,
            body: "overloaded".into(),
        }
        .into();
        match api {
            ApiError::Internal(msg) => assert_eq!(msg, "API error: 503 - overloaded"),
            other => panic!("unexpected {other:?}"),
        }

        let api: ApiError = DocSearchError::Validation("Message is required".into()).into();
        assert!(matches!(api, ApiError::BadRequest(_)));
    }
}
