//! Field Extractor — independent pattern rules that pull scalar fields out of
//! pasted résumé text (LinkedIn / Xing / Indeed exports or freeform).
//!
//! Each rule is a `(label set, capture strategy)` pair evaluated on its own;
//! the first match wins per field. A rule that finds nothing leaves its field
//! absent rather than empty so that reconciliation never overwrites manual
//! input with blanks.
//!
//! Labels match case-insensitively. Captured content is returned verbatim
//! (trimmed).

use regex::Regex;
use tracing::debug;

use crate::models::resume::PartialRecord;

/// Labels that open a top-level résumé section. A line carrying one of these
/// ends any section capture that stops at "the next section".
const TOP_LEVEL_LABELS: &str = r"full[ \t]?name|name|e-?mail|phone|summary|about|bio|profile|education|academic|work[ \t]+experience|experience|employment|career|technical[ \t]+skills|skills|competencies";

const NAME_LABELS: &str = r"full[ \t]?name|name";
const BIO_LABELS: &str = r"summary|about|bio|profile";
const EDUCATION_LABELS: &str = r"education|academic";
const SKILL_LABELS: &str = r"technical[ \t]+skills|skills|competencies";
const EXPERIENCE_LABELS: &str = r"work[ \t]+experience|experience|employment|career";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
    Bio,
    Education,
    Skills,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Bio => "bio",
            Field::Education => "education",
            Field::Skills => "skills",
        }
    }
}

/// Where a section capture stops.
#[derive(Debug)]
enum SectionEnd {
    /// Next line that starts with a capital letter and reads as a header:
    /// a known section label, or a short title followed by a colon.
    AnyHeader,
    /// Next line carrying a known top-level section label.
    TopLevelLabel,
    /// Next line matching the pattern.
    Pattern(Regex),
}

#[derive(Debug)]
enum Capture {
    /// `Label: value` on a single line; `fallback` is tried when no label
    /// line yields a value. A fallback hit that is itself a section label
    /// is discarded.
    LabeledLine {
        label: Regex,
        fallback: Option<Regex>,
    },
    /// First match of the pattern anywhere in the text.
    FirstMatch(Regex),
    /// The lines after a label line (plus any inline `Label: value` text)
    /// up to the section end.
    Section { label: Regex, end: SectionEnd },
}

/// One extraction rule.
#[derive(Debug)]
pub struct FieldRule {
    pub field: Field,
    capture: Capture,
}

impl FieldRule {
    /// Runs this rule alone against `text`. `None` when nothing non-empty
    /// was found.
    pub fn apply(&self, text: &str, headers: &HeaderMatcher) -> Option<String> {
        match &self.capture {
            Capture::LabeledLine { label, fallback } => label
                .captures_iter(text)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str().trim())
                .find(|v| !v.is_empty())
                .or_else(|| {
                    fallback
                        .as_ref()
                        .and_then(|re| re.captures(text))
                        .and_then(|c| c.get(1))
                        .map(|m| m.as_str().trim())
                        .filter(|v| !headers.is_top_level_label(v))
                })
                .map(str::to_string),
            Capture::FirstMatch(pattern) => pattern
                .find(text)
                .map(|m| m.as_str().trim().to_string())
                .filter(|v| !v.is_empty()),
            Capture::Section { label, end } => capture_section(text, label, end, headers),
        }
    }
}

/// Decides whether a line opens a new section.
#[derive(Debug)]
pub struct HeaderMatcher {
    known: Regex,
    titled: Regex,
}

impl HeaderMatcher {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            known: Regex::new(&format!(
                r"^(?i:{TOP_LEVEL_LABELS})[ \t]*(?::.*)?$"
            ))?,
            titled: Regex::new(r"^\p{Lu}[\p{L} ]{0,30}:")?,
        })
    }

    /// A capitalized line that is a known label or a short `Title:` prefix.
    pub fn is_header(&self, line: &str) -> bool {
        let line = line.trim();
        line.chars().next().is_some_and(char::is_uppercase)
            && (self.known.is_match(line) || self.titled.is_match(line))
    }

    /// A line carrying one of the known top-level section labels.
    pub fn is_top_level_label(&self, line: &str) -> bool {
        self.known.is_match(line.trim())
    }

    fn ends_section(&self, end: &SectionEnd, line: &str) -> bool {
        match end {
            SectionEnd::AnyHeader => self.is_header(line),
            SectionEnd::TopLevelLabel => self.is_top_level_label(line),
            SectionEnd::Pattern(pattern) => pattern.is_match(line),
        }
    }
}

/// The ordered rule set plus the section matcher shared by the rules.
#[derive(Debug)]
pub struct FieldExtractor {
    rules: Vec<FieldRule>,
    headers: HeaderMatcher,
    experience_label: Regex,
}

impl FieldExtractor {
    /// Compiles every rule. Fails only if a pattern does not compile.
    pub fn new() -> Result<Self, regex::Error> {
        let rules = vec![
            FieldRule {
                field: Field::Name,
                capture: Capture::LabeledLine {
                    label: Regex::new(&format!(
                        r"(?m)^[ \t]*(?i:{NAME_LABELS})[ \t]*:[ \t]*(.+?)[ \t]*$"
                    ))?,
                    fallback: Some(Regex::new(r"\A\s*(\p{Lu}\p{Ll}+ \p{Lu}\p{Ll}+)\b")?),
                },
            },
            FieldRule {
                field: Field::Email,
                capture: Capture::FirstMatch(Regex::new(
                    r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}",
                )?),
            },
            FieldRule {
                field: Field::Phone,
                capture: Capture::FirstMatch(Regex::new(
                    r"(?:\+?\d{1,3}[ .-]?)?\(?\d{3}\)?[ .-]?\d{3}[ .-]?\d{4}",
                )?),
            },
            FieldRule {
                field: Field::Bio,
                capture: Capture::Section {
                    label: label_line(BIO_LABELS)?,
                    end: SectionEnd::AnyHeader,
                },
            },
            FieldRule {
                field: Field::Education,
                capture: Capture::Section {
                    label: label_line(EDUCATION_LABELS)?,
                    end: SectionEnd::Pattern(Regex::new(
                        r"^[ \t]*(?i:experience|work|employment)\b",
                    )?),
                },
            },
            FieldRule {
                field: Field::Skills,
                capture: Capture::Section {
                    label: label_line(SKILL_LABELS)?,
                    end: SectionEnd::TopLevelLabel,
                },
            },
        ];

        Ok(Self {
            rules,
            headers: HeaderMatcher::new()?,
            experience_label: label_line(EXPERIENCE_LABELS)?,
        })
    }

    /// Runs every rule and assembles the scalar part of a partial record.
    /// Experiences are left to the segmenter.
    pub fn extract(&self, text: &str) -> PartialRecord {
        let mut partial = PartialRecord::default();

        for rule in &self.rules {
            let Some(value) = rule.apply(text, &self.headers) else {
                continue;
            };
            debug!(field = rule.field.as_str(), "extraction rule matched");
            match rule.field {
                Field::Name => partial.name = Some(value),
                Field::Email => partial.email = Some(value),
                Field::Phone => partial.phone = Some(value),
                Field::Bio => partial.bio = Some(value),
                Field::Education => partial.education = Some(value),
                Field::Skills => partial.skills = split_skills(&value),
            }
        }

        partial
    }

    /// The raw block under the experience label, up to the next top-level
    /// section label.
    pub fn experience_block(&self, text: &str) -> Option<String> {
        capture_section(
            text,
            &self.experience_label,
            &SectionEnd::TopLevelLabel,
            &self.headers,
        )
    }
}

/// Splits a skills block on commas, semicolons, bullets and newlines.
pub fn split_skills(block: &str) -> Vec<String> {
    block
        .split(|c| matches!(c, ',' | ';' | '•' | '\n'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A whole-line label with optional `: inline content` in group 1.
fn label_line(labels: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"^[ \t]*(?i:{labels})[ \t]*(?::[ \t]*(.*?))?[ \t]*$"
    ))
}

fn capture_section(
    text: &str,
    label: &Regex,
    end: &SectionEnd,
    headers: &HeaderMatcher,
) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let (start, inline) = lines.iter().enumerate().find_map(|(i, line)| {
        label.captures(line).map(|c| {
            let inline = c.get(1).map_or("", |m| m.as_str().trim());
            (i, inline)
        })
    })?;

    let mut body: Vec<&str> = Vec::new();
    if !inline.is_empty() {
        body.push(inline);
    }
    for line in &lines[start + 1..] {
        if headers.ends_section(end, line) {
            break;
        }
        body.push(line.trim_end());
    }

    let content = body.join("\n").trim().to_string();
    (!content.is_empty()).then_some(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINKEDIN_EXPORT: &str = "Jane Doe
Senior Backend Engineer
jane.doe@example.com | +1 (555) 123-4567

Summary
Backend engineer focused on storage systems.
Enjoys mentoring.
Experience
Acme Corp - Engineer 2020
Built stuff
Skills
Rust, Go; PostgreSQL • Redis
Kubernetes
Education
BSc Computer Science, State University
";

    fn extractor() -> FieldExtractor {
        FieldExtractor::new().unwrap()
    }

    fn apply(field: Field, text: &str) -> Option<String> {
        let ex = extractor();
        let rule = ex.rules.iter().find(|r| r.field == field).unwrap();
        rule.apply(text, &ex.headers)
    }

    #[test]
    fn test_name_from_label() {
        assert_eq!(
            apply(Field::Name, "Name:   John Smith  \nEmail: x@y.io"),
            Some("John Smith".to_string())
        );
    }

    #[test]
    fn test_name_label_variants_case_insensitive() {
        assert_eq!(apply(Field::Name, "FULL NAME: Ada Lovelace"), Some("Ada Lovelace".into()));
        assert_eq!(apply(Field::Name, "fullname: Alan Turing"), Some("Alan Turing".into()));
        assert_eq!(apply(Field::Name, "intro\nFull Name: grace hopper"), Some("grace hopper".into()));
    }

    #[test]
    fn test_name_falls_back_to_leading_capitalized_words() {
        assert_eq!(apply(Field::Name, LINKEDIN_EXPORT), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_name_fallback_ignores_leading_section_label() {
        assert_eq!(apply(Field::Name, "Work Experience\nAcme - Dev 2020\nBuilt"), None);
        assert_eq!(apply(Field::Name, "Technical Skills\nRust"), None);
        assert_eq!(
            apply(Field::Name, "Work Experience\nName: Jane Doe"),
            Some("Jane Doe".to_string())
        );
    }

    #[test]
    fn test_name_absent_when_no_label_and_no_leading_words() {
        assert_eq!(apply(Field::Name, "looking for work\nrust developer"), None);
    }

    #[test]
    fn test_blank_name_label_falls_through() {
        assert_eq!(apply(Field::Name, "Name:   \nsomething"), None);
    }

    #[test]
    fn test_email_first_match_verbatim() {
        let text = "contact: First.Last+cv@Mail.Example.org or backup@other.io";
        assert_eq!(
            apply(Field::Email, text),
            Some("First.Last+cv@Mail.Example.org".to_string())
        );
    }

    #[test]
    fn test_email_requires_tld() {
        assert_eq!(apply(Field::Email, "user@localhost"), None);
    }

    #[test]
    fn test_phone_variants() {
        assert_eq!(apply(Field::Phone, "Tel +1 (555) 123-4567"), Some("+1 (555) 123-4567".into()));
        assert_eq!(apply(Field::Phone, "call 555.123.4567 now"), Some("555.123.4567".into()));
        assert_eq!(apply(Field::Phone, "5551234567"), Some("5551234567".into()));
        assert_eq!(apply(Field::Phone, "+49 030 123 4567"), Some("+49 030 123 4567".into()));
    }

    #[test]
    fn test_phone_absent_for_short_numbers() {
        assert_eq!(apply(Field::Phone, "2019 - 2021, 42 projects"), None);
    }

    #[test]
    fn test_bio_stops_at_next_header() {
        assert_eq!(
            apply(Field::Bio, LINKEDIN_EXPORT),
            Some("Backend engineer focused on storage systems.\nEnjoys mentoring.".to_string())
        );
    }

    #[test]
    fn test_bio_inline_label_and_titled_header() {
        let text = "Profile: Data person.\nLoves SQL.\nLanguages: English\n";
        assert_eq!(apply(Field::Bio, text), Some("Data person.\nLoves SQL.".to_string()));
    }

    #[test]
    fn test_bio_runs_to_end_of_text() {
        assert_eq!(apply(Field::Bio, "About\nquiet and steady"), Some("quiet and steady".into()));
    }

    #[test]
    fn test_bio_label_without_content_is_absent() {
        assert_eq!(apply(Field::Bio, "Summary\nEducation\nBSc"), None);
    }

    #[test]
    fn test_education_stops_at_experience_or_work() {
        let text = "Academic\nMSc Physics\nBSc Physics\nWork history\nAcme";
        assert_eq!(
            apply(Field::Education, text),
            Some("MSc Physics\nBSc Physics".to_string())
        );
    }

    #[test]
    fn test_education_does_not_stop_at_worked() {
        let text = "Education\nBSc\nWorked as TA\nEmployment\nAcme";
        assert_eq!(
            apply(Field::Education, text),
            Some("BSc\nWorked as TA".to_string())
        );
    }

    #[test]
    fn test_skills_split_on_all_separators() {
        let partial = extractor().extract(LINKEDIN_EXPORT);
        assert_eq!(
            partial.skills,
            vec!["Rust", "Go", "PostgreSQL", "Redis", "Kubernetes"]
        );
    }

    #[test]
    fn test_skills_keep_titled_lines_inside_block() {
        let text = "Technical Skills:\nLanguages: Rust, Go\nCloud: AWS\nEducation\nBSc";
        assert_eq!(
            split_skills(&apply(Field::Skills, text).unwrap()),
            vec!["Languages: Rust", "Go", "Cloud: AWS"]
        );
    }

    #[test]
    fn test_split_skills_discards_empty_tokens() {
        assert_eq!(split_skills(" , ;•\n Rust ,,"), vec!["Rust"]);
    }

    #[test]
    fn test_extract_full_export() {
        let partial = extractor().extract(LINKEDIN_EXPORT);
        assert_eq!(partial.name.as_deref(), Some("Jane Doe"));
        assert_eq!(partial.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(partial.phone.as_deref(), Some("+1 (555) 123-4567"));
        assert_eq!(
            partial.education.as_deref(),
            Some("BSc Computer Science, State University")
        );
        assert!(partial.experiences.is_none());
    }

    #[test]
    fn test_extract_nothing_from_unlabeled_text() {
        let partial = extractor().extract("just some lowercase notes\nnothing to see");
        assert!(partial.is_empty());
    }

    #[test]
    fn test_experience_block_stops_at_top_level_label() {
        let block = extractor().experience_block(LINKEDIN_EXPORT).unwrap();
        assert_eq!(block, "Acme Corp - Engineer 2020\nBuilt stuff");
    }

    #[test]
    fn test_experience_block_label_variants() {
        let ex = extractor();
        assert!(ex.experience_block("WORK EXPERIENCE:\nAcme").is_some());
        assert!(ex.experience_block("Career\nAcme").is_some());
        assert!(ex.experience_block("Employment: Acme - Dev 2020").is_some());
        assert!(ex.experience_block("my experience is broad").is_none());
    }

    #[test]
    fn test_header_matcher() {
        let headers = extractor().headers;
        assert!(headers.is_header("Education"));
        assert!(headers.is_header("Key achievements: many"));
        assert!(!headers.is_header("education"));
        assert!(!headers.is_header("Built the billing pipeline"));
        assert!(headers.is_top_level_label("skills:"));
    }
}
