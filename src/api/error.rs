//! Mapping of store errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::error::FolioError;

/// An error body of the form `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        let status = match &err {
            FolioError::NotFound { .. } => StatusCode::NOT_FOUND,
            FolioError::Validation { .. } | FolioError::InvalidKind(_) => StatusCode::BAD_REQUEST,
            FolioError::Conflict { .. } => StatusCode::CONFLICT,
            FolioError::Storage { .. }
            | FolioError::Config(_)
            | FolioError::PasswordHash(_)
            | FolioError::Io(_)
            | FolioError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %err, "request failed");
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
