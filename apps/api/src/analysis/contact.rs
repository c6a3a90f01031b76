//! Contact & link extraction — email, phone and profile URLs via regex.
//!
//! The phone pattern is loose: any run of 9+ digits, dashes and spaces that
//! starts and ends with a digit counts, so a year range or postal code can
//! match when no real number comes first.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::models::ContactInfo;
use crate::analysis::normalize::ResumeText;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\-\s]{7,}\d").unwrap());

static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(https?://\S+|www\.\S+|linkedin\.com\S+|github\.com\S+)").unwrap()
});

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '(', ')', '[', ']'];

/// Profile links found in the document, classified first-match-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

pub fn extract_contact(text: &ResumeText) -> ContactInfo {
    let raw = text.raw();
    let links = extract_links(raw);
    ContactInfo {
        email: extract_email(raw),
        phone: extract_phone(raw),
        linkedin: links.linkedin,
        github: links.github,
        portfolio: links.portfolio,
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_PATTERN.find(text).map(|m| m.as_str().to_string())
}

/// Scans for URL-like tokens and sorts them into LinkedIn, GitHub and portfolio slots.
///
/// The first LinkedIn and first GitHub URL win their slots; later ones are
/// dropped. Every other URL is a portfolio candidate and the first is kept.
pub fn extract_links(text: &str) -> Links {
    let mut links = Links::default();

    for m in LINK_PATTERN.find_iter(text) {
        let url = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if url.is_empty() {
            continue;
        }
        let url = with_scheme(url);
        let lower = url.to_lowercase();

        if lower.contains("linkedin.com") {
            if links.linkedin.is_none() {
                links.linkedin = Some(url);
            }
        } else if lower.contains("github.com") {
            if links.github.is_none() {
                links.github = Some(url);
            }
        } else if links.portfolio.is_none() {
            links.portfolio = Some(url);
        }
    }

    links
}

fn with_scheme(url: &str) -> String {
    let lower = url.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
