use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::import::ingest::{
    confirm_import, parse_and_preview, ImportConfirmRequest, ImportConfirmResponse,
    ImportPreviewResponse, ImportRequest,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub size_bytes: usize,
    pub status: &'static str,
    pub message: String,
}

/// POST /api/v1/import
pub async fn handle_import(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportPreviewResponse>, AppError> {
    let preview = parse_and_preview(&req, &state.parser, &state.resume).await?;
    Ok(Json(preview))
}

/// POST /api/v1/import/confirm
pub async fn handle_import_confirm(
    State(state): State<AppState>,
    Json(req): Json<ImportConfirmRequest>,
) -> Result<Json<ImportConfirmResponse>, AppError> {
    let response = confirm_import(req, &state.resume).await?;
    Ok(Json(response))
}

/// POST /api/v1/import/upload
///
/// Accepts the first file field and reports its name. File contents are not
/// parsed here; they need conversion to text first.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        if data.len() > state.config.max_import_bytes {
            return Err(AppError::Validation(format!(
                "File is {} bytes; the limit is {} bytes.",
                data.len(),
                state.config.max_import_bytes
            )));
        }

        info!("Received upload '{filename}' ({} bytes)", data.len());
        return Ok(Json(UploadResponse {
            message: format!(
                "File \"{filename}\" received. Its contents require further processing before they can be imported; paste the text instead."
            ),
            filename,
            size_bytes: data.len(),
            status: "requires_further_processing",
        }));
    }

    Err(AppError::Validation("No file provided.".to_string()))
}
