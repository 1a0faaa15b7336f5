use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::import::dedup::{check_for_conflicts, ConflictWarning};
use crate::import::parser::{ImportSource, ResumeParser};
use crate::import::reconcile::MergeSummary;
use crate::models::resume::{PartialRecord, ResumeRecord};
use crate::resume::service::ResumeService;

const NOTHING_FOUND: &str =
    "Nothing useful was found in the pasted text. Check that sections are labeled (e.g. \"Experience\", \"Skills\").";

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportPreviewResponse {
    pub source: ImportSource,
    pub candidate: PartialRecord,
    pub found_anything: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub conflict_warnings: Vec<ConflictWarning>,
}

#[derive(Debug, Deserialize)]
pub struct ImportConfirmRequest {
    pub candidate: PartialRecord,
}

#[derive(Debug, Serialize)]
pub struct ImportConfirmResponse {
    pub record: ResumeRecord,
    pub summary: MergeSummary,
}

/// Parses the pasted text into a candidate and checks it against the current
/// record. Nothing is committed; a dismissed preview leaves no trace.
pub async fn parse_and_preview(
    req: &ImportRequest,
    parser: &ResumeParser,
    resume: &ResumeService,
) -> Result<ImportPreviewResponse, AppError> {
    let source = req
        .source
        .as_deref()
        .map(ImportSource::from_tag)
        .unwrap_or_default();

    let candidate = parser.parse(&req.text, source)?;
    let found_anything = !candidate.is_empty();
    let current = resume.snapshot().await;
    let conflict_warnings = check_for_conflicts(&current, &candidate);

    Ok(ImportPreviewResponse {
        source,
        candidate,
        found_anything,
        message: (!found_anything).then(|| NOTHING_FOUND.to_string()),
        conflict_warnings,
    })
}

/// Merges a confirmed candidate into the record and persists it.
pub async fn confirm_import(
    req: ImportConfirmRequest,
    resume: &ResumeService,
) -> Result<ImportConfirmResponse, AppError> {
    let (record, summary) = resume.apply_import(req.candidate).await?;
    Ok(ImportConfirmResponse { record, summary })
}
