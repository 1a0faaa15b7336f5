use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Liveness plus which backend the resume is persisted to.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let storage = if state.config.redis_url.is_some() {
        "redis"
    } else {
        "memory"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api",
        "storage": storage,
        "storage_key": state.config.storage_key,
    }))
}
