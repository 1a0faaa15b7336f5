//! Owns the in-memory record and is its only writer.
//!
//! Every mutation runs under one lock: mutate, enforce invariants, persist,
//! return a snapshot. A failed write leaves the in-memory change in place and
//! is reported as `AppError::Persistence`.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::import::reconcile::{reconcile, MergeSummary};
use crate::models::resume::{ExperienceEntry, Experiences, PartialRecord, ResumeRecord};
use crate::resume::skills::{add_skill, remove_skill, SkillError};
use crate::resume::store::ResumeRepository;
use crate::resume::validation::{validate_experience, validate_profile};

/// The scalar form fields, as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub education: String,
}

/// Manual experience entry; the id is assigned by the service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceInput {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub location: String,
    pub description: String,
}

impl From<ExperienceInput> for ExperienceEntry {
    fn from(input: ExperienceInput) -> Self {
        let mut entry = ExperienceEntry::new(input.company.trim(), input.position.trim());
        entry.start_date = input.start_date.trim().to_string();
        entry.end_date = if input.current {
            String::new()
        } else {
            input.end_date.trim().to_string()
        };
        entry.current = input.current;
        entry.location = input.location.trim().to_string();
        entry.description = input.description.trim().to_string();
        entry
    }
}

pub struct ResumeService {
    record: Mutex<ResumeRecord>,
    repo: ResumeRepository,
}

impl ResumeService {
    /// Loads the saved record (or starts empty) and takes ownership of it.
    pub async fn load(repo: ResumeRepository) -> Self {
        let record = repo.load().await;
        info!(
            "Resume loaded from '{}' ({} skills, {} experiences)",
            repo.key(),
            record.skills.len(),
            record.experiences.entries().len()
        );
        Self {
            record: Mutex::new(record),
            repo,
        }
    }

    pub async fn snapshot(&self) -> ResumeRecord {
        self.record.lock().await.clone()
    }

    /// Form submit. Replaces all scalar fields; rejected without mutation if
    /// a required field is blank.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<ResumeRecord, AppError> {
        validate_profile(&update)?;

        let mut record = self.record.lock().await;
        record.name = update.name.trim().to_string();
        record.email = update.email.trim().to_string();
        record.phone = update.phone.trim().to_string();
        record.bio = update.bio.trim().to_string();
        record.education = update.education.trim().to_string();
        self.commit(&mut record).await?;
        info!("Resume profile updated");
        Ok(record.clone())
    }

    pub async fn add_skill(&self, skill: &str) -> Result<Vec<String>, AppError> {
        let mut record = self.record.lock().await;
        add_skill(&mut record.skills, skill).map_err(|e| match e {
            SkillError::Empty => AppError::Validation(e.to_string()),
            SkillError::Duplicate(_) => AppError::DuplicateSkill(e.to_string()),
        })?;
        self.commit(&mut record).await?;
        Ok(record.skills.clone())
    }

    /// Idempotent: removing an unknown skill succeeds without writing.
    pub async fn remove_skill(&self, skill: &str) -> Result<Vec<String>, AppError> {
        let mut record = self.record.lock().await;
        if remove_skill(&mut record.skills, skill) {
            self.commit(&mut record).await?;
        }
        Ok(record.skills.clone())
    }

    /// Appends a validated manual entry. On a record holding freeform
    /// experience text the list becomes structured.
    pub async fn add_experience(&self, input: ExperienceInput) -> Result<ExperienceEntry, AppError> {
        let entry = ExperienceEntry::from(input);
        validate_experience(&entry)?;

        let mut record = self.record.lock().await;
        if let Experiences::Structured(entries) = &mut record.experiences {
            entries.push(entry.clone());
        } else {
            warn!("Manual experience entry replaces freeform experience text");
            record.experiences = Experiences::Structured(vec![entry.clone()]);
        }
        self.commit(&mut record).await?;
        info!("Experience {} added", entry.id);
        Ok(entry)
    }

    /// Idempotent: an unknown id is a no-op.
    pub async fn remove_experience(&self, id: Uuid) -> Result<(), AppError> {
        let mut record = self.record.lock().await;
        let removed = match &mut record.experiences {
            Experiences::Structured(entries) => {
                let before = entries.len();
                entries.retain(|e| e.id != id);
                entries.len() != before
            }
            Experiences::Freeform(_) => false,
        };
        if removed {
            self.commit(&mut record).await?;
            info!("Experience {id} removed");
        }
        Ok(())
    }

    /// Merges a confirmed import candidate. An empty candidate is a
    /// successful no-op and nothing is written.
    pub async fn apply_import(
        &self,
        candidate: PartialRecord,
    ) -> Result<(ResumeRecord, MergeSummary), AppError> {
        let mut record = self.record.lock().await;
        let summary = reconcile(&mut record, candidate);
        if !summary.is_noop() || summary.experiences_dropped > 0 {
            self.commit(&mut record).await?;
        }
        Ok((record.clone(), summary))
    }

    /// Explicit clear: empty record, storage key removed.
    pub async fn clear(&self) -> Result<(), AppError> {
        let mut record = self.record.lock().await;
        *record = ResumeRecord::default();
        self.repo.clear().await?;
        info!("Resume cleared");
        Ok(())
    }

    async fn commit(&self, record: &mut ResumeRecord) -> Result<(), AppError> {
        let dropped = record.enforce_invariants();
        if dropped > 0 {
            warn!("Dropped {dropped} experience entries with no company or position");
        }
        self.repo.save(record).await.map_err(|e| {
            warn!("Resume change kept in memory but not persisted: {e}");
            AppError::from(e)
        })
    }
}
