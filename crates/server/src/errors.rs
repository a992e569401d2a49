use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::warn;

/// Every failed request, whatever the cause, answers 400 `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub String);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError(e.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.0;
        warn!(error = %msg, "request failed");
        (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
