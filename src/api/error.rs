use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use super::validation::FieldError;

/// Errors surfaced to the caller as structured HTTP responses. Nothing here
/// is fatal to the process; every variant maps to exactly one response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
}

impl ApiError {
    #[must_use]
    pub fn movie_not_found() -> Self {
        Self::NotFound("Movie not found".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            Self::Validation(errors) => {
                tracing::debug!(count = errors.len(), "request body failed validation");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": errors }))).into_response()
            }
        }
    }
}
