//! Text normalization — turns decoded resume text into the line sequence every extractor reads.

/// Decoded resume body split into trimmed lines.
///
/// Empty lines are kept: they are the weakest section-boundary signal and the
/// segmenter relies on seeing them. Original casing is preserved for names and
/// URLs; `lower()` is the view used for case-insensitive matching.
#[derive(Debug, Clone)]
pub struct ResumeText {
    raw: String,
    lower: String,
    lines: Vec<String>,
}

impl ResumeText {
    pub fn new(raw: &str) -> Self {
        let lines = if raw.is_empty() {
            Vec::new()
        } else {
            raw.lines().map(|l| l.trim().to_string()).collect()
        };

        Self {
            raw: raw.to_string(),
            lower: raw.to_lowercase(),
            lines,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn lower(&self) -> &str {
        &self.lower
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn non_empty_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str).filter(|l| !l.is_empty())
    }

    /// Number of whitespace-separated tokens in the raw text.
    pub fn word_count(&self) -> usize {
        self.raw.split_whitespace().count()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// Counts whitespace-separated words in a fragment.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercased tokens split on whitespace and punctuation.
///
/// `+` and `#` stay inside tokens so `c++` and `c#` survive as single tokens.
pub fn tokens(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Purely alphabetic tokens, the unit counted by keyword density.
pub fn alphabetic_tokens(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && t.chars().all(char::is_alphabetic))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_has_no_lines() {
        let text = ResumeText::new("");
        assert!(text.lines().is_empty());
        assert_eq!(text.word_count(), 0);
        assert!(text.is_empty());
    }

    #[test]
    fn test_lines_are_trimmed_and_empty_lines_kept() {
        let text = ResumeText::new("  Jane Doe  \r\n\n  Projects:\n");
        assert_eq!(text.lines(), &["Jane Doe", "", "Projects:"]);
        assert_eq!(text.non_empty_lines().count(), 2);
    }

    #[test]
    fn test_lower_view_keeps_raw_casing_intact() {
        let text = ResumeText::new("GitHub.com/Alice");
        assert_eq!(text.raw(), "GitHub.com/Alice");
        assert_eq!(text.lower(), "github.com/alice");
    }

    #[test]
    fn test_tokens_keep_plus_and_hash() {
        assert_eq!(tokens("c++, c# and power bi."), vec!["c++", "c#", "and", "power", "bi"]);
    }

    #[test]
    fn test_alphabetic_tokens_drop_mixed_tokens() {
        assert_eq!(
            alphabetic_tokens("python3 rocks; 2024 was great"),
            vec!["rocks", "was", "great"]
        );
    }
}
