//! Experience Segmenter — splits an experience block into employment records.
//!
//! A line shaped like `<company> - <position> <date>` opens a new record; any
//! other line is appended to the open record's description. Lines before the
//! first header have nowhere to go and are dropped.

use regex::Regex;

use crate::models::resume::ExperienceEntry;

/// Header line: `<text> <dash> <text> <year | month year>` plus any trailing
/// range. A plain hyphen must be surrounded by whitespace so hyphenated
/// company names stay intact; en and em dashes may be tight.
///
/// The date is matched to recognize the header but is not stored on the
/// entry.
const HEADER_PATTERN: &str = r"^(?P<company>.+?)(?:[ \t]*[–—][ \t]*|[ \t]+-[ \t]+)(?P<position>.+?)[ \t]+\(?(?P<date>(?i:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?[ \t]+)?(?:\d{1,2}/)?(?:19|20)\d{2}(?:-\d{2})?)\b.*$";

#[derive(Debug)]
pub struct ExperienceSegmenter {
    header: Regex,
}

impl ExperienceSegmenter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            header: Regex::new(HEADER_PATTERN)?,
        })
    }

    /// `(company, position)` when `line` is a record header.
    pub fn match_header<'t>(&self, line: &'t str) -> Option<(&'t str, &'t str)> {
        let caps = self.header.captures(line.trim())?;
        let company = caps.name("company")?.as_str().trim();
        let position = caps.name("position")?.as_str().trim();
        Some((company, position))
    }

    /// Segments `block` into entries in source order. May return an empty
    /// list when no line looks like a header.
    pub fn segment(&self, block: &str) -> Vec<ExperienceEntry> {
        let mut entries = Vec::new();
        let mut current: Option<ExperienceEntry> = None;

        for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some((company, position)) = self.match_header(line) {
                if let Some(done) = current.take() {
                    entries.push(done);
                }
                current = Some(ExperienceEntry::new(company, position));
            } else if let Some(entry) = current.as_mut() {
                entry.push_description_line(line);
            }
        }

        if let Some(done) = current {
            entries.push(done);
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> ExperienceSegmenter {
        ExperienceSegmenter::new().unwrap()
    }

    #[test]
    fn test_two_records_with_descriptions() {
        let text = "Acme Corp - Engineer 2020\nBuilt stuff\nDeshaw - Analyst 2021\nDid analysis";
        let entries = segmenter().segment(text);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].company, "Acme Corp");
        assert_eq!(entries[0].position, "Engineer");
        assert_eq!(entries[0].description, "Built stuff");
        assert_eq!(entries[1].company, "Deshaw");
        assert_eq!(entries[1].position, "Analyst");
        assert_eq!(entries[1].description, "Did analysis");
    }

    #[test]
    fn test_dates_are_not_stored() {
        let entries = segmenter().segment("Acme Corp - Engineer Jan 2020 - Present");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].position, "Engineer");
        assert_eq!(entries[0].start_date, "");
        assert_eq!(entries[0].end_date, "");
        assert!(!entries[0].current);
    }

    #[test]
    fn test_multi_word_position_with_month_year() {
        let (company, position) = segmenter()
            .match_header("Globex – Senior Platform Engineer March 2019 – 2022")
            .unwrap();
        assert_eq!(company, "Globex");
        assert_eq!(position, "Senior Platform Engineer");
    }

    #[test]
    fn test_em_dash_and_parenthesized_date() {
        let (company, position) = segmenter()
            .match_header("Initech—QA Lead (2018-03 to 2019-01)")
            .unwrap();
        assert_eq!(company, "Initech");
        assert_eq!(position, "QA Lead");
    }

    #[test]
    fn test_hyphenated_company_kept_whole() {
        let (company, position) = segmenter()
            .match_header("Hewlett-Packard - Support Engineer 2015")
            .unwrap();
        assert_eq!(company, "Hewlett-Packard");
        assert_eq!(position, "Support Engineer");
    }

    #[test]
    fn test_tight_hyphen_is_not_a_separator() {
        assert!(segmenter().match_header("Acme-Engineer 2020").is_none());
        let (company, position) = segmenter().match_header("Acme–Engineer 2020").unwrap();
        assert_eq!(company, "Acme");
        assert_eq!(position, "Engineer");
    }

    #[test]
    fn test_line_without_year_is_not_a_header() {
        assert!(segmenter().match_header("Acme Corp - Engineer").is_none());
        assert!(segmenter().match_header("Shipped v2 of the API").is_none());
    }

    #[test]
    fn test_multiline_description_preserved() {
        let text = "Acme - Dev 2020\n  Built stuff  \n\nFixed things\n";
        let entries = segmenter().segment(text);
        assert_eq!(entries[0].description, "Built stuff\nFixed things");
    }

    #[test]
    fn test_lines_before_first_header_are_dropped() {
        let text = "Some preamble\nAcme - Dev 2020\nWork";
        let entries = segmenter().segment(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "Work");
    }

    #[test]
    fn test_no_headers_yields_empty() {
        assert!(segmenter().segment("Did many things\nat many places").is_empty());
        assert!(segmenter().segment("").is_empty());
    }

    #[test]
    fn test_each_entry_gets_distinct_id() {
        let entries = segmenter().segment("A - B 2020\nC - D 2021");
        assert_ne!(entries[0].id, entries[1].id);
    }
}
