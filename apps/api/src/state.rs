use std::sync::Arc;

use crate::config::Config;
use crate::import::parser::ResumeParser;
use crate::resume::service::ResumeService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Sole owner and writer of the resume record.
    pub resume: Arc<ResumeService>,
    /// Compiled extraction rules, built once at startup.
    pub parser: Arc<ResumeParser>,
    pub config: Config,
}
