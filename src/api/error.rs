use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failures surfaced by the route handlers. Bodies are `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Unauthorized,
    BadRequest(&'static str),
    Internal(&'static str),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, *msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, *msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
