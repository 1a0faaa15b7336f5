//! Text import boundary — turns one pasted blob into a candidate partial
//! record by running the field extractor and the experience segmenter.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::import::extractor::FieldExtractor;
use crate::import::segmenter::ExperienceSegmenter;
use crate::models::resume::{Experiences, PartialRecord};

/// Where the pasted text came from. Advisory only: every source goes through
/// the same rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportSource {
    Linkedin,
    Xing,
    Indeed,
    #[default]
    Text,
}

impl ImportSource {
    /// Lenient parse: unknown tags are treated as plain text.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "linkedin" => ImportSource::Linkedin,
            "xing" => ImportSource::Xing,
            "indeed" => ImportSource::Indeed,
            "text" | "" => ImportSource::Text,
            other => {
                debug!(tag = other, "unknown import source, treating as text");
                ImportSource::Text
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportSource::Linkedin => "linkedin",
            ImportSource::Xing => "xing",
            ImportSource::Indeed => "indeed",
            ImportSource::Text => "text",
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import text is {size} bytes, limit is {limit}")]
    InputTooLarge { size: usize, limit: usize },

    #[error("pattern engine failure: {0}")]
    Pattern(#[from] regex::Error),
}

/// Compiled extractor + segmenter, built once at startup and shared.
#[derive(Debug)]
pub struct ResumeParser {
    extractor: FieldExtractor,
    segmenter: ExperienceSegmenter,
    max_input_bytes: usize,
}

impl ResumeParser {
    pub fn new(max_input_bytes: usize) -> Result<Self, ImportError> {
        Ok(Self {
            extractor: FieldExtractor::new()?,
            segmenter: ExperienceSegmenter::new()?,
            max_input_bytes,
        })
    }

    /// Parses `text` into a candidate. An empty candidate is a successful
    /// outcome; callers decide how to report "nothing found".
    ///
    /// When an experience section exists but no line segments into a record,
    /// the whole block is kept as the freeform fallback.
    pub fn parse(&self, text: &str, source: ImportSource) -> Result<PartialRecord, ImportError> {
        if text.len() > self.max_input_bytes {
            return Err(ImportError::InputTooLarge {
                size: text.len(),
                limit: self.max_input_bytes,
            });
        }

        let text = text.replace("\r\n", "\n");
        let mut partial = self.extractor.extract(&text);

        if let Some(block) = self.extractor.experience_block(&text) {
            let entries = self.segmenter.segment(&block);
            debug!(entries = entries.len(), "experience block segmented");
            partial.experiences = Some(if entries.is_empty() {
                Experiences::Freeform(block)
            } else {
                Experiences::Structured(entries)
            });
        }

        info!(
            source = source.as_str(),
            bytes = text.len(),
            found_anything = !partial.is_empty(),
            "Parsed import text"
        );
        Ok(partial)
    }
}
