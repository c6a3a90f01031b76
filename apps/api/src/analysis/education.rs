//! Education extraction — degree lines plus the institution/CGPA/year line that follows them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::{EducationEntry, NOT_FOUND};
use crate::analysis::normalize::ResumeText;
use crate::analysis::sections::match_heading;

pub(crate) static DEGREE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:B\.?\s?Tech|(?-i:B\.?E)|M\.?\s?Tech|B\.?Sc|M\.?Sc|BCA|MCA|Ph\.?D|Bachelor\w*|Master\w*|Intermediate|SSC|HSC|High School|Secondary School)\b",
    )
    .unwrap()
});

static CGPA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bC?GPA\s*[:=]?\s*(\d+(?:\.\d+)?)").unwrap());

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:19|20)\d{2}\s*[–—-]\s*(?:(?:19|20)\d{2}|(?i:present|current))|(?:19|20)\d{2}")
        .unwrap()
});

const INSTITUTE_KEYWORDS: &[&str] = &["institute", "college", "school", "university", "academy"];

pub fn is_degree_line(line: &str) -> bool {
    DEGREE_PATTERN.is_match(line)
}

/// A line that carries institution details rather than more of the degree name.
fn is_details_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    // "High School" / "Secondary School" are degrees, not institutions.
    let names_institute =
        !is_degree_line(line) && INSTITUTE_KEYWORDS.iter().any(|k| lower.contains(k));
    names_institute
        || line.contains('|')
        || CGPA_PATTERN.is_match(line)
        || YEAR_PATTERN.is_match(line)
}

/// Walks the line sequence once and emits an entry per degree line.
///
/// `headings` are the section headings known to the segmenter; a heading
/// never joins onto a degree and is never read as its details line.
/// Never returns an empty list: a single all-"Not Found" entry stands in when
/// no degree pattern matches.
pub fn extract_education(text: &ResumeText, headings: &[String]) -> Vec<EducationEntry> {
    let lines = text.lines();
    let mut entries = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line = &lines[idx];
        if !is_degree_line(line) {
            idx += 1;
            continue;
        }

        let mut degree = line.clone();
        while idx + 1 < lines.len() {
            let next = &lines[idx + 1];
            if next.is_empty()
                || is_degree_line(next)
                || is_details_line(next)
                || match_heading(next, headings).is_some()
            {
                break;
            }
            degree.push(' ');
            degree.push_str(next);
            idx += 1;
        }

        match lines.get(idx + 1) {
            Some(next)
                if !next.is_empty()
                    && !is_degree_line(next)
                    && match_heading(next, headings).is_none() =>
            {
                entries.push(parse_entry(degree, next));
                idx += 2;
            }
            _ => {
                entries.push(parse_entry(degree, ""));
                idx += 1;
            }
        }
    }

    if entries.is_empty() {
        entries.push(EducationEntry::default());
    }
    entries
}

fn parse_entry(degree: String, details: &str) -> EducationEntry {
    let (institution, rest) = match details.find(['|', '-']) {
        Some(pos) => (&details[..pos], &details[pos + 1..]),
        None => (details, details),
    };

    let institution = institution.trim();
    let cgpa = CGPA_PATTERN
        .captures(rest)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    let year = YEAR_PATTERN.find(rest).map(|m| m.as_str().to_string());

    EducationEntry {
        education: degree,
        institution: if institution.is_empty() {
            NOT_FOUND.to_string()
        } else {
            institution.to_string()
        },
        cgpa: cgpa.unwrap_or_else(|| NOT_FOUND.to_string()),
        year: year.unwrap_or_else(|| NOT_FOUND.to_string()),
    }
}
