//! Skill List Manager — manual add/remove on the record's skill list.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SkillError {
    #[error("Please enter a skill.")]
    Empty,

    #[error("'{0}' is already in your list.")]
    Duplicate(String),
}

/// Appends `skill` (trimmed) unless it is empty or already present. The list
/// is left untouched on error.
pub fn add_skill(skills: &mut Vec<String>, skill: &str) -> Result<(), SkillError> {
    let skill = skill.trim();
    if skill.is_empty() {
        return Err(SkillError::Empty);
    }
    if skills.iter().any(|s| s.trim() == skill) {
        return Err(SkillError::Duplicate(skill.to_string()));
    }
    skills.push(skill.to_string());
    Ok(())
}

/// Removes the skill by identity. Missing skills are a no-op.
///
/// Returns whether anything was removed.
pub fn remove_skill(skills: &mut Vec<String>, skill: &str) -> bool {
    let skill = skill.trim();
    let before = skills.len();
    skills.retain(|s| s.trim() != skill);
    skills.len() != before
}
