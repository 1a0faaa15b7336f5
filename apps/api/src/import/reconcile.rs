//! Import Reconciler — merges a confirmed candidate into the owned record.
//!
//! Rules:
//! - a scalar field is overwritten only by a present, non-empty value
//! - skills are appended unless an exact (trimmed) match already exists
//! - experiences are always appended as new entries, never merged, so
//!   importing the same text twice yields two copies
//! - entries with neither company nor position are dropped silently
//!
//! The function never fails; an empty candidate is a no-op.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::resume::{ExperienceEntry, Experiences, PartialRecord, ResumeRecord};

/// What a merge changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeSummary {
    pub fields_updated: Vec<String>,
    pub skills_added: Vec<String>,
    pub skills_skipped: Vec<String>,
    pub experiences_added: usize,
    pub experiences_dropped: usize,
    pub freeform_applied: bool,
}

impl MergeSummary {
    pub fn is_noop(&self) -> bool {
        self.fields_updated.is_empty()
            && self.skills_added.is_empty()
            && self.experiences_added == 0
            && !self.freeform_applied
    }
}

pub fn reconcile(record: &mut ResumeRecord, candidate: PartialRecord) -> MergeSummary {
    let mut summary = MergeSummary::default();

    let PartialRecord {
        name,
        email,
        phone,
        bio,
        education,
        skills,
        experiences,
    } = candidate;

    for (label, slot, value) in [
        ("name", &mut record.name, name),
        ("email", &mut record.email, email),
        ("phone", &mut record.phone, phone),
        ("bio", &mut record.bio, bio),
        ("education", &mut record.education, education),
    ] {
        if overwrite_if_present(slot, value) {
            summary.fields_updated.push(label.to_string());
        }
    }

    for skill in skills {
        let skill = skill.trim();
        if skill.is_empty() {
            continue;
        }
        if record.has_skill(skill) {
            summary.skills_skipped.push(skill.to_string());
        } else {
            record.skills.push(skill.to_string());
            summary.skills_added.push(skill.to_string());
        }
    }

    match experiences {
        Some(Experiences::Structured(entries)) => {
            merge_structured(record, entries, &mut summary);
        }
        Some(Experiences::Freeform(text)) => {
            merge_freeform(record, text, &mut summary);
        }
        None => {}
    }

    summary.experiences_dropped += record.enforce_invariants();

    info!(
        fields = summary.fields_updated.len(),
        skills_added = summary.skills_added.len(),
        experiences_added = summary.experiences_added,
        experiences_dropped = summary.experiences_dropped,
        "Reconciled import"
    );
    summary
}

fn overwrite_if_present(slot: &mut String, value: Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() && v != slot.as_str() => {
            *slot = v.to_string();
            true
        }
        _ => false,
    }
}

fn merge_structured(
    record: &mut ResumeRecord,
    entries: Vec<ExperienceEntry>,
    summary: &mut MergeSummary,
) {
    let mut kept = Vec::with_capacity(entries.len());
    for mut entry in entries {
        if !entry.is_retainable() {
            summary.experiences_dropped += 1;
            continue;
        }
        // Fresh ids: a re-confirmed candidate must not alias existing entries.
        entry.id = Uuid::new_v4();
        if entry.current {
            entry.end_date.clear();
        }
        kept.push(entry);
    }
    if kept.is_empty() {
        return;
    }

    summary.experiences_added = kept.len();
    if let Experiences::Structured(existing) = &mut record.experiences {
        existing.extend(kept);
        return;
    }
    if !record.experiences.is_empty() {
        warn!("Structured import replaces freeform experience text");
    }
    record.experiences = Experiences::Structured(kept);
}

fn merge_freeform(record: &mut ResumeRecord, text: String, summary: &mut MergeSummary) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    let apply = match &record.experiences {
        Experiences::Structured(existing) if !existing.is_empty() => {
            warn!("Ignoring freeform experience import; record already has structured entries");
            false
        }
        Experiences::Structured(_) => true,
        Experiences::Freeform(previous) => previous.as_str() != text,
    };
    if apply {
        record.experiences = Experiences::Freeform(text.to_string());
        summary.freeform_applied = true;
    }
}
