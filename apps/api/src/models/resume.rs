use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The canonical, persisted résumé.
///
/// Scalar fields use the empty string for "not provided". Only `name` and
/// `email` are required for the record to count as valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub education: String,
    /// Insertion-ordered, no duplicates (exact match after trimming).
    pub skills: Vec<String>,
    pub experiences: Experiences,
}

/// Accepts both the current shape and records saved by the browser form,
/// which kept experience as one string under `experience`.
#[derive(Default, Deserialize)]
#[serde(default)]
struct StoredRecord {
    name: String,
    email: String,
    phone: String,
    bio: String,
    education: String,
    skills: Vec<String>,
    experiences: Option<Experiences>,
    experience: String,
}

impl From<StoredRecord> for ResumeRecord {
    fn from(stored: StoredRecord) -> Self {
        let experiences = match (stored.experiences, stored.experience.trim()) {
            (Some(experiences), _) => experiences,
            (None, "") => Experiences::default(),
            (None, legacy) => Experiences::Freeform(legacy.to_string()),
        };
        Self {
            name: stored.name,
            email: stored.email,
            phone: stored.phone,
            bio: stored.bio,
            education: stored.education,
            skills: stored.skills,
            experiences,
        }
    }
}

/// Either the structured employment list or the legacy free-text blob kept
/// for records whose experience section could not be segmented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Experiences {
    Structured(Vec<ExperienceEntry>),
    Freeform(String),
}

impl Default for Experiences {
    fn default() -> Self {
        Experiences::Structured(Vec::new())
    }
}

impl Experiences {
    /// Structured entries, or an empty slice for the freeform shape.
    pub fn entries(&self) -> &[ExperienceEntry] {
        match self {
            Experiences::Structured(entries) => entries,
            Experiences::Freeform(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Experiences::Structured(entries) => entries.is_empty(),
            Experiences::Freeform(text) => text.trim().is_empty(),
        }
    }
}

/// One employment record.
///
/// Serialized in camelCase so the stored JSON matches what the browser form
/// reads back. When `current` is set the serialized `endDate` is always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", into = "ExperienceEntryWire")]
pub struct ExperienceEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub location: String,
    /// May span several lines.
    #[serde(default)]
    pub description: String,
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            location: String::new(),
            description: String::new(),
        }
    }
}

impl ExperienceEntry {
    pub fn new(company: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            position: position.into(),
            ..Self::default()
        }
    }

    /// An entry needs a company or a position to be kept.
    pub fn is_retainable(&self) -> bool {
        !self.company.trim().is_empty() || !self.position.trim().is_empty()
    }

    /// `None` for current positions, whatever `end_date` holds.
    pub fn effective_end_date(&self) -> Option<&str> {
        if self.current {
            return None;
        }
        let end = self.end_date.trim();
        (!end.is_empty()).then_some(end)
    }

    /// Appends one line to the description, newline-separated.
    pub fn push_description_line(&mut self, line: &str) {
        if !self.description.is_empty() {
            self.description.push('\n');
        }
        self.description.push_str(line);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExperienceEntryWire {
    id: Uuid,
    company: String,
    position: String,
    start_date: String,
    end_date: String,
    current: bool,
    location: String,
    description: String,
}

impl From<ExperienceEntry> for ExperienceEntryWire {
    fn from(entry: ExperienceEntry) -> Self {
        let end_date = entry
            .effective_end_date()
            .map(str::to_string)
            .unwrap_or_default();
        Self {
            id: entry.id,
            company: entry.company,
            position: entry.position,
            start_date: entry.start_date,
            end_date,
            current: entry.current,
            location: entry.location,
            description: entry.description,
        }
    }
}

impl ResumeRecord {
    pub fn has_skill(&self, skill: &str) -> bool {
        let skill = skill.trim();
        self.skills.iter().any(|s| s.trim() == skill)
    }

    /// Normalizes the record in place: trims and de-duplicates skills (first
    /// occurrence wins), drops experiences with neither company nor position,
    /// and clears the stored end date of current positions.
    ///
    /// Returns the number of experience entries dropped.
    pub fn enforce_invariants(&mut self) -> usize {
        let mut seen: Vec<String> = Vec::with_capacity(self.skills.len());
        for skill in self.skills.drain(..) {
            let skill = skill.trim().to_string();
            if !skill.is_empty() && !seen.contains(&skill) {
                seen.push(skill);
            }
        }
        self.skills = seen;

        match &mut self.experiences {
            Experiences::Structured(entries) => {
                let before = entries.len();
                entries.retain(ExperienceEntry::is_retainable);
                for entry in entries.iter_mut() {
                    if entry.current {
                        entry.end_date.clear();
                    }
                }
                before - entries.len()
            }
            Experiences::Freeform(_) => 0,
        }
    }
}

/// What an import extracted. `None` means nothing was found for that field,
/// which is different from an empty string: absent fields never overwrite
/// existing data during reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Experiences>,
}

impl PartialRecord {
    /// True when no rule matched anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.bio.is_none()
            && self.education.is_none()
            && self.skills.is_empty()
            && self.experiences.as_ref().map_or(true, Experiences::is_empty)
    }
}
