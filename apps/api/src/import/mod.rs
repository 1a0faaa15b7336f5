// Free-text résumé import: field extraction, experience segmentation,
// conflict preview, and reconciliation into the owned record.

pub mod dedup;
pub mod extractor;
pub mod handlers;
pub mod ingest;
pub mod parser;
pub mod reconcile;
pub mod segmenter;
