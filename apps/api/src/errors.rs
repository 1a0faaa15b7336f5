use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::import::parser::ImportError;
use crate::resume::store::PersistenceError;
use crate::resume::validation::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Nothing here is fatal: every variant is a no-op (or, for persistence, an
/// in-memory-only change) with a message the UI can show.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate skill: {0}")]
    DuplicateSkill(String),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<ImportError> for AppError {
    fn from(e: ImportError) -> Self {
        AppError::ImportFailed(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::DuplicateSkill(msg) => (StatusCode::CONFLICT, "DUPLICATE_SKILL", msg.clone()),
            AppError::ImportFailed(msg) => {
                tracing::warn!("Import failed: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "IMPORT_FAILED",
                    "Could not import, check format".to_string(),
                )
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PERSISTENCE_ERROR",
                    "Failed to save data. Your change is kept for this session but may not survive a reload."
                        .to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
