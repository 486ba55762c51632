use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Content type of the config document.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// All three directives together; edge platforms honour different subsets.
pub const NO_STORE: &str = "no-store, no-cache, must-revalidate";

/// Build a response from pre-serialized JSON that no cache may reuse.
pub fn no_store_json(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, JSON_UTF8), (header::CACHE_CONTROL, NO_STORE)],
        body,
    )
        .into_response()
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub deployment_id: String,
    pub override_provider: String,
    pub default_categories: usize,
    pub uptime_secs: u64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            code: code.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ErrorResponse::new(message, "INTERNAL_ERROR")
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CACHE_CONTROL, NO_STORE)],
            Json(self),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_store_json_headers() {
        let resp = no_store_json(StatusCode::OK, b"{}".to_vec());

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], JSON_UTF8);
        assert_eq!(resp.headers()[header::CACHE_CONTROL], NO_STORE);
    }

    #[test]
    fn test_error_response_serialization() {
        let resp = ErrorResponse::internal_error("boom");
        let json = serde_json::to_string(&resp).unwrap();

        assert_eq!(json, r#"{"error":"boom","code":"INTERNAL_ERROR"}"#);
    }

    #[test]
    fn test_error_response_is_500_and_uncached() {
        let resp = ErrorResponse::internal_error("boom").into_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.headers()[header::CACHE_CONTROL], NO_STORE);
    }
}
