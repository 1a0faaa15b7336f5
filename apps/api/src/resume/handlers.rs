use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ExperienceEntry, ResumeRecord};
use crate::resume::render::render_preview;
use crate::resume::service::{ExperienceInput, ProfileUpdate};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AddSkillRequest {
    pub skill: String,
}

#[derive(Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeRecord> {
    Json(state.resume.snapshot().await)
}

/// PUT /api/v1/resume
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileUpdate>,
) -> Result<Json<ResumeRecord>, AppError> {
    Ok(Json(state.resume.update_profile(req).await?))
}

/// DELETE /api/v1/resume
pub async fn handle_clear(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.resume.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resume/preview
pub async fn handle_preview(State(state): State<AppState>) -> Html<String> {
    let record = state.resume.snapshot().await;
    Html(render_preview(&record))
}

/// POST /api/v1/resume/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<AddSkillRequest>,
) -> Result<(StatusCode, Json<SkillsResponse>), AppError> {
    let skills = state.resume.add_skill(&req.skill).await?;
    Ok((StatusCode::CREATED, Json(SkillsResponse { skills })))
}

/// DELETE /api/v1/resume/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Result<Json<SkillsResponse>, AppError> {
    let skills = state.resume.remove_skill(&skill).await?;
    Ok(Json(SkillsResponse { skills }))
}

/// POST /api/v1/resume/experiences
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Json(req): Json<ExperienceInput>,
) -> Result<(StatusCode, Json<ExperienceEntry>), AppError> {
    let entry = state.resume.add_experience(req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/v1/resume/experiences/:id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.resume.remove_experience(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
