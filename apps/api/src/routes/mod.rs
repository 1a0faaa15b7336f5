pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::import::handlers as import;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume record
        .route(
            "/api/v1/resume",
            get(resume::handle_get_resume)
                .put(resume::handle_update_profile)
                .delete(resume::handle_clear),
        )
        .route("/api/v1/resume/preview", get(resume::handle_preview))
        .route("/api/v1/resume/skills", post(resume::handle_add_skill))
        .route(
            "/api/v1/resume/skills/:skill",
            delete(resume::handle_remove_skill),
        )
        .route(
            "/api/v1/resume/experiences",
            post(resume::handle_add_experience),
        )
        .route(
            "/api/v1/resume/experiences/:id",
            delete(resume::handle_remove_experience),
        )
        // Text import
        .route("/api/v1/import", post(import::handle_import))
        .route(
            "/api/v1/import/confirm",
            post(import::handle_import_confirm),
        )
        .route("/api/v1/import/upload", post(import::handle_upload))
        .with_state(state)
}
