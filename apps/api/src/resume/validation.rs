use chrono::NaiveDate;
use thiserror::Error;

use crate::models::resume::ExperienceEntry;
use crate::resume::service::ProfileUpdate;

const REQUIRED_FIELDS: &[&str] = &["name", "email"];

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),

    #[error("An experience entry needs a company or a position.")]
    EmptyExperience,

    #[error("'{value}' is not a valid {field} (expected YYYY or YYYY-MM).")]
    InvalidDate { field: &'static str, value: String },

    #[error("Start date {start} is after end date {end}.")]
    DateOrder { start: String, end: String },
}

/// Form submit: `name` and `email` must be non-blank.
pub fn validate_profile(update: &ProfileUpdate) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| match *field {
            "name" => update.name.trim().is_empty(),
            "email" => update.email.trim().is_empty(),
            _ => false,
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingRequired(missing))
    }
}

/// Manual entry checks. Import never calls this; imported entries that fail
/// the company/position rule are dropped instead.
///
/// The end date is ignored for current positions.
pub fn validate_experience(entry: &ExperienceEntry) -> Result<(), ValidationError> {
    if !entry.is_retainable() {
        return Err(ValidationError::EmptyExperience);
    }

    let start = parse_month("start date", &entry.start_date)?;
    let end = match entry.effective_end_date() {
        Some(end) => parse_month("end date", end)?,
        None => None,
    };

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(ValidationError::DateOrder {
                start: entry.start_date.trim().to_string(),
                end: entry.end_date.trim().to_string(),
            });
        }
    }
    Ok(())
}

/// `YYYY` or `YYYY-MM`; blank means "not given".
fn parse_month(field: &'static str, value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let padded = match value.len() {
        4 => format!("{value}-01-01"),
        7 => format!("{value}-01"),
        _ => String::new(),
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
