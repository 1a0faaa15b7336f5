// The owned ResumeRecord: manual edits, skills, experiences, persistence,
// and the HTML preview.

pub mod handlers;
pub mod render;
pub mod service;
pub mod skills;
pub mod store;
pub mod validation;
