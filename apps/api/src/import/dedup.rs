use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::{Experiences, PartialRecord, ResumeRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    DuplicateSkill,
    DuplicateEntry,
    IncompleteEntry,
    FreeformReplaced,
    FreeformIgnored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Advisory,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictWarning {
    pub conflict_type: ConflictType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_entry_id: Option<Uuid>,
    pub description: String,
    pub severity: ConflictSeverity,
}

/// Checks a candidate against the current record before it is confirmed.
/// Returns advisory warnings (non-blocking); confirming still applies the
/// normal merge rules.
pub fn check_for_conflicts(record: &ResumeRecord, candidate: &PartialRecord) -> Vec<ConflictWarning> {
    let mut warnings = Vec::new();

    for skill in candidate.skills.iter().map(|s| s.trim()) {
        if !skill.is_empty() && record.has_skill(skill) {
            warnings.push(ConflictWarning {
                conflict_type: ConflictType::DuplicateSkill,
                existing_entry_id: None,
                description: format!("Skill '{skill}' is already in your list and will be skipped."),
                severity: ConflictSeverity::Advisory,
            });
        }
    }

    match &candidate.experiences {
        Some(Experiences::Structured(entries)) => {
            for new_entry in entries {
                if !new_entry.is_retainable() {
                    warnings.push(ConflictWarning {
                        conflict_type: ConflictType::IncompleteEntry,
                        existing_entry_id: Some(new_entry.id),
                        description: "Entry has neither company nor position and will be dropped."
                            .to_string(),
                        severity: ConflictSeverity::Warning,
                    });
                    continue;
                }

                // Same company and position at different case is still the same job.
                let existing = record.experiences.entries().iter().find(|e| {
                    e.company.trim().eq_ignore_ascii_case(new_entry.company.trim())
                        && e.position.trim().eq_ignore_ascii_case(new_entry.position.trim())
                });
                if let Some(existing) = existing {
                    warnings.push(ConflictWarning {
                        conflict_type: ConflictType::DuplicateEntry,
                        existing_entry_id: Some(existing.id),
                        description: format!(
                            "An entry for {} ({}) already exists. Confirming adds a second copy.",
                            new_entry.company, new_entry.position
                        ),
                        severity: ConflictSeverity::Advisory,
                    });
                }
            }

            if entries.iter().any(|e| e.is_retainable())
                && matches!(&record.experiences, Experiences::Freeform(t) if !t.trim().is_empty())
            {
                warnings.push(ConflictWarning {
                    conflict_type: ConflictType::FreeformReplaced,
                    existing_entry_id: None,
                    description: "Your unstructured experience text will be replaced by the imported entries."
                        .to_string(),
                    severity: ConflictSeverity::Warning,
                });
            }
        }
        Some(Experiences::Freeform(text)) if !text.trim().is_empty() => {
            if !record.experiences.entries().is_empty() {
                warnings.push(ConflictWarning {
                    conflict_type: ConflictType::FreeformIgnored,
                    existing_entry_id: None,
                    description: "Experience text could not be split into entries and will not replace your existing entries."
                        .to_string(),
                    severity: ConflictSeverity::Advisory,
                });
            }
        }
        _ => {}
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExperienceEntry;

    fn record_with_acme() -> (ResumeRecord, Uuid) {
        let acme = ExperienceEntry::new("Acme Corp", "Engineer");
        let id = acme.id;
        let record = ResumeRecord {
            skills: vec!["Rust".to_string()],
            experiences: Experiences::Structured(vec![acme]),
            ..Default::default()
        };
        (record, id)
    }

    #[test]
    fn test_duplicate_skill_flagged() {
        let (record, _) = record_with_acme();
        let candidate = PartialRecord {
            skills: vec!["Rust ".into(), "Go".into()],
            ..Default::default()
        };
        let warnings = check_for_conflicts(&record, &candidate);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].conflict_type, ConflictType::DuplicateSkill);
    }

    #[test]
    fn test_duplicate_entry_case_insensitive() {
        let (record, id) = record_with_acme();
        let candidate = PartialRecord {
            experiences: Some(Experiences::Structured(vec![ExperienceEntry::new(
                "ACME CORP", "engineer",
            )])),
            ..Default::default()
        };
        let warnings = check_for_conflicts(&record, &candidate);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].conflict_type, ConflictType::DuplicateEntry);
        assert_eq!(warnings[0].existing_entry_id, Some(id));
        assert_eq!(warnings[0].severity, ConflictSeverity::Advisory);
    }

    #[test]
    fn test_incomplete_entry_flagged() {
        let (record, _) = record_with_acme();
        let candidate = PartialRecord {
            experiences: Some(Experiences::Structured(vec![ExperienceEntry::new("", "")])),
            ..Default::default()
        };
        let warnings = check_for_conflicts(&record, &candidate);
        assert_eq!(warnings[0].conflict_type, ConflictType::IncompleteEntry);
    }

    #[test]
    fn test_freeform_shapes() {
        let (record, _) = record_with_acme();
        let candidate = PartialRecord {
            experiences: Some(Experiences::Freeform("blob".into())),
            ..Default::default()
        };
        let warnings = check_for_conflicts(&record, &candidate);
        assert_eq!(warnings[0].conflict_type, ConflictType::FreeformIgnored);

        let record = ResumeRecord {
            experiences: Experiences::Freeform("old text".into()),
            ..Default::default()
        };
        let candidate = PartialRecord {
            experiences: Some(Experiences::Structured(vec![ExperienceEntry::new("Acme", "")])),
            ..Default::default()
        };
        let warnings = check_for_conflicts(&record, &candidate);
        assert_eq!(warnings[0].conflict_type, ConflictType::FreeformReplaced);
    }

    #[test]
    fn test_clean_candidate_has_no_warnings() {
        let (record, _) = record_with_acme();
        let candidate = PartialRecord {
            name: Some("Jane".into()),
            skills: vec!["Go".into()],
            experiences: Some(Experiences::Structured(vec![ExperienceEntry::new(
                "Globex", "Lead",
            )])),
            ..Default::default()
        };
        assert!(check_for_conflicts(&record, &candidate).is_empty());
    }
}
