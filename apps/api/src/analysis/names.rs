//! Candidate name recognition.
//!
//! The recognizer is a capability handed to the `Analyzer` at construction,
//! so a heavier backend (an NER model, say) can be swapped in by the caller
//! without the pipeline owning any global model state.

use crate::analysis::education::is_degree_line;
use crate::analysis::normalize::ResumeText;
use crate::analysis::sections::match_heading;

/// Proposes the candidate's name from the document.
pub trait NameRecognizer: Send + Sync {
    fn recognize(&self, text: &ResumeText) -> Option<String>;
}

/// Looks for a short, capitalized line near the top of the document.
///
/// Resumes almost always open with the candidate's name on its own line, so
/// the first of the leading lines that reads like a personal name wins.
#[derive(Debug, Clone)]
pub struct HeaderNameRecognizer {
    headings: Vec<String>,
    scan_lines: usize,
}

impl HeaderNameRecognizer {
    pub const DEFAULT_SCAN_LINES: usize = 5;

    /// `headings` are rejected as names ("Professional Summary" is not a person).
    pub fn new(headings: Vec<String>) -> Self {
        Self {
            headings,
            scan_lines: Self::DEFAULT_SCAN_LINES,
        }
    }

    fn looks_like_name(&self, line: &str) -> bool {
        let words: Vec<&str> = line.split_whitespace().collect();
        if !(2..=4).contains(&words.len()) {
            return false;
        }
        if line.contains('@') || line.to_lowercase().contains("www.") || line.contains("://") {
            return false;
        }
        if match_heading(line, &self.headings).is_some() || is_degree_line(line) {
            return false;
        }
        words.iter().all(|w| is_name_word(w))
    }
}

fn is_name_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_uppercase()
        && word
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '.' | '\'' | '-'))
}

impl NameRecognizer for HeaderNameRecognizer {
    fn recognize(&self, text: &ResumeText) -> Option<String> {
        text.non_empty_lines()
            .take(self.scan_lines)
            .find(|line| self.looks_like_name(line))
            .map(str::to_string)
    }
}
