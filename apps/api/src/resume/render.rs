//! Resume Preview Renderer — pure function from record to HTML fragment.
//!
//! Every user-supplied string goes through `ammonia::clean_text` before it is
//! interpolated. Nothing from the record reaches the output unescaped.

use ammonia::clean_text;

use crate::models::resume::{ExperienceEntry, Experiences, ResumeRecord};

pub fn render_preview(record: &ResumeRecord) -> String {
    format!(
        "<div class=\"resume-header\">{}</div>\n<div class=\"resume-body\">{}</div>\n",
        render_header(record),
        render_sections(record)
    )
}

fn render_header(record: &ResumeRecord) -> String {
    let mut contact = clean_text(record.email.trim());
    if !record.phone.trim().is_empty() {
        contact.push_str(" | ");
        contact.push_str(&clean_text(record.phone.trim()));
    }
    format!(
        "<h1>{}</h1><p>{}</p>",
        clean_text(record.name.trim()),
        contact
    )
}

fn render_sections(record: &ResumeRecord) -> String {
    let mut html = String::new();

    if !record.bio.trim().is_empty() {
        html.push_str(&section("Summary", &paragraph(&record.bio)));
    }

    if !record.skills.is_empty() {
        let items: String = record
            .skills
            .iter()
            .map(|s| format!("<li>{}</li>", clean_text(s)))
            .collect();
        html.push_str(&section("Skills", &format!("<ul>{items}</ul>")));
    }

    if !record.education.trim().is_empty() {
        html.push_str(&section("Education", &paragraph(&record.education)));
    }

    match &record.experiences {
        Experiences::Structured(entries) => {
            let rendered: String = entries
                .iter()
                .filter(|e| e.is_retainable())
                .map(render_experience)
                .collect();
            if !rendered.is_empty() {
                html.push_str(&section("Experience", &rendered));
            }
        }
        Experiences::Freeform(text) if !text.trim().is_empty() => {
            html.push_str(&section("Experience", &paragraph(text)));
        }
        Experiences::Freeform(_) => {}
    }

    html
}

fn render_experience(entry: &ExperienceEntry) -> String {
    let title = match (entry.position.trim(), entry.company.trim()) {
        (p, c) if !p.is_empty() && !c.is_empty() => {
            format!("{} at {}", clean_text(p), clean_text(c))
        }
        (p, "") => clean_text(p),
        ("", c) => clean_text(c),
        _ => String::new(),
    };

    let mut html = format!("<div class=\"experience-item\"><h3>{title}</h3>");

    if let Some(range) = date_range(entry) {
        html.push_str(&format!("<p class=\"dates\">{range}</p>"));
    }
    if !entry.location.trim().is_empty() {
        html.push_str(&format!(
            "<p class=\"location\">{}</p>",
            clean_text(entry.location.trim())
        ));
    }
    if !entry.description.trim().is_empty() {
        html.push_str(&paragraph(&entry.description));
    }

    html.push_str("</div>");
    html
}

/// "start – end", with "Present" for current positions.
fn date_range(entry: &ExperienceEntry) -> Option<String> {
    let start = entry.start_date.trim();
    let end = if entry.current {
        Some("Present".to_string())
    } else {
        entry.effective_end_date().map(clean_text)
    };

    match (start.is_empty(), end) {
        (true, None) => None,
        (false, None) => Some(clean_text(start)),
        (true, Some(end)) => Some(end),
        (false, Some(end)) => Some(format!("{} – {}", clean_text(start), end)),
    }
}

fn section(title: &str, content: &str) -> String {
    format!("<section><h2>{title}</h2>{content}</section>")
}

/// Escapes each line and keeps line breaks visible.
fn paragraph(text: &str) -> String {
    let body = text
        .trim()
        .lines()
        .map(clean_text)
        .collect::<Vec<_>>()
        .join("<br>");
    format!("<p>{body}</p>")
}
