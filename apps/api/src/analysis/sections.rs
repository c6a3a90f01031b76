//! Section segmentation — one engine, many keyword tables.
//!
//! Every free-text section (summary, projects, internships, certifications,
//! achievements) is located by the same scan. What differs per section is
//! data: the heading keywords, the collection policy, the minimum block size
//! and what to report when nothing survives.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::models::NOT_FOUND;
use crate::analysis::normalize::{word_count, ResumeText};

const BULLET_CHARS: &[char] = &['•', '●', '▪', '◦', '*', '-', '–', '>', '#'];

/// Separators that may follow a heading keyword and introduce inline content.
const HEADING_SEPARATORS: &[char] = &[':', '-', '–', '|'];

/// Dashes only separate when spaced, so "Experience-driven" stays prose.
const DASHES: &[char] = &['-', '–'];

/// Punctuation a bare heading may end with ("PROJECTS." or "Projects :").
const HEADING_TRAILERS: &[char] = &['.', ':'];

/// Headings that close any section but never start one of the configured blocks.
pub const COMMON_BOUNDARIES: &[&str] = &[
    "education",
    "academic background",
    "skills",
    "technical skills",
    "soft skills",
    "key skills",
    "languages",
    "interests",
    "hobbies",
    "references",
    "contact",
    "personal details",
    "declaration",
    "experience",
    "work experience",
    "professional experience",
    "employment history",
];

// ────────────────────────────────────────────────────────────────────────────
// Rule types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Projects,
    Internships,
    Certifications,
    Achievements,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Projects => "projects",
            SectionKind::Internships => "internships",
            SectionKind::Certifications => "certifications",
            SectionKind::Achievements => "achievements",
        }
    }
}

/// How lines after a heading are gathered into a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Collection {
    /// Take the next `lines` non-empty lines, whatever they contain.
    Window { lines: usize },
    /// Keep taking non-empty lines until a boundary heading or end of input.
    UntilBoundary,
}

/// What a block-type section reports when no block survives the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnEmpty {
    Empty,
    Sentinel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRule {
    pub kind: SectionKind,
    pub start: Vec<String>,
    /// Extra boundary headings on top of the other sections' start keywords.
    #[serde(default)]
    pub end: Vec<String>,
    #[serde(default = "default_collection")]
    pub collection: Collection,
    /// Blocks with this many words or fewer are dropped.
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default = "default_on_empty")]
    pub on_empty: OnEmpty,
}

fn default_collection() -> Collection {
    Collection::UntilBoundary
}

fn default_min_words() -> usize {
    3
}

fn default_on_empty() -> OnEmpty {
    OnEmpty::Empty
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Built-in section table.
pub fn default_rules() -> Vec<SectionRule> {
    vec![
        SectionRule {
            kind: SectionKind::Summary,
            start: keywords(&[
                "professional summary",
                "career summary",
                "summary",
                "profile",
                "career objective",
                "objective",
                "about me",
            ]),
            end: Vec::new(),
            collection: Collection::UntilBoundary,
            min_words: 3,
            on_empty: OnEmpty::Sentinel,
        },
        SectionRule {
            kind: SectionKind::Projects,
            start: keywords(&[
                "projects",
                "project",
                "notable projects",
                "key projects",
                "academic projects",
                "personal projects",
                "project experience",
            ]),
            end: Vec::new(),
            collection: Collection::UntilBoundary,
            min_words: 3,
            on_empty: OnEmpty::Empty,
        },
        SectionRule {
            kind: SectionKind::Internships,
            start: keywords(&[
                "internships",
                "internship",
                "internship experience",
            ]),
            end: Vec::new(),
            collection: Collection::UntilBoundary,
            min_words: 3,
            on_empty: OnEmpty::Empty,
        },
        SectionRule {
            kind: SectionKind::Certifications,
            start: keywords(&[
                "certifications",
                "certification",
                "certificates",
                "certificate",
                "courses",
                "course",
                "training",
                "licenses",
            ]),
            end: Vec::new(),
            collection: Collection::UntilBoundary,
            min_words: 2,
            on_empty: OnEmpty::Sentinel,
        },
        SectionRule {
            kind: SectionKind::Achievements,
            start: keywords(&[
                "achievements",
                "achievement",
                "awards",
                "honors",
                "recognition",
                "accomplishments",
            ]),
            end: Vec::new(),
            collection: Collection::UntilBoundary,
            min_words: 3,
            on_empty: OnEmpty::Empty,
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Heading detection
// ────────────────────────────────────────────────────────────────────────────

/// Result of matching a line against a keyword set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Text following the keyword and its separator, if any.
    pub inline: Option<&'a str>,
}

/// Checks whether `line` is a heading for any of `keywords` (lowercase).
///
/// A heading is the keyword alone, or the keyword followed by a separator and
/// inline content. A keyword followed directly by more words ("Course
/// Recommendation Engine") is body text and does not match. The longest
/// matching keyword is used so "project experience" beats "project".
pub fn match_heading<'a>(line: &'a str, keywords: &[String]) -> Option<Heading<'a>> {
    let stripped =
        line.trim_start_matches(|c: char| BULLET_CHARS.contains(&c) || c.is_whitespace());
    if stripped.is_empty() {
        return None;
    }

    keywords
        .iter()
        .filter_map(|k| {
            let rest = strip_keyword(stripped, k)?;
            heading_tail(rest).map(|heading| (k.len(), heading))
        })
        .max_by_key(|(len, _)| *len)
        .map(|(_, heading)| heading)
}

/// Classifies what follows a matched keyword.
fn heading_tail(rest: &str) -> Option<Heading<'_>> {
    let trimmed = rest.trim_start();
    let bare =
        trimmed.trim_end_matches(|c: char| HEADING_TRAILERS.contains(&c) || c.is_whitespace());
    if bare.is_empty() {
        return Some(Heading { inline: None });
    }

    let sep = trimmed.chars().next()?;
    if !HEADING_SEPARATORS.contains(&sep) {
        return None;
    }
    let after = &trimmed[sep.len_utf8()..];
    let spaced = rest.starts_with(char::is_whitespace) || after.starts_with(char::is_whitespace);
    if DASHES.contains(&sep) && !spaced {
        return None;
    }

    let inline = after.trim();
    Some(Heading {
        inline: Some(inline).filter(|s| !s.is_empty()),
    })
}

/// Case-insensitive prefix match ending at a word boundary; returns the remainder.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    if keyword.is_empty() {
        return None;
    }
    let mut chars = line.chars();
    for expected in keyword.chars() {
        let actual = chars.next()?;
        if !actual.to_lowercase().eq(std::iter::once(expected)) {
            return None;
        }
    }
    let rest = chars.as_str();
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() => None,
        _ => Some(rest),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Segmenter
// ────────────────────────────────────────────────────────────────────────────

/// A rule with its boundary keyword set resolved against the whole table.
#[derive(Debug, Clone)]
pub struct CompiledSection {
    pub rule: SectionRule,
    start: Vec<String>,
    end: Vec<String>,
}

impl CompiledSection {
    /// Collects the raw (unfiltered) blocks for this section, in document order.
    pub fn collect_blocks(&self, text: &ResumeText) -> Vec<String> {
        let mut blocks = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut inside = false;
        let mut window_left = 0usize;

        for line in text.lines() {
            if let Some(heading) = match_heading(line, &self.start) {
                flush(&mut current, &mut blocks);
                inside = true;
                window_left = match self.rule.collection {
                    Collection::Window { lines } => lines,
                    Collection::UntilBoundary => usize::MAX,
                };
                if let Some(inline) = heading.inline {
                    current.push(inline);
                }
                continue;
            }

            if !inside {
                continue;
            }

            if self.rule.collection == Collection::UntilBoundary
                && match_heading(line, &self.end).is_some()
            {
                flush(&mut current, &mut blocks);
                inside = false;
                continue;
            }

            if line.is_empty() {
                continue;
            }

            if window_left == 0 {
                flush(&mut current, &mut blocks);
                inside = false;
                continue;
            }

            current.push(line);
            window_left = window_left.saturating_sub(1);
            if window_left == 0 {
                flush(&mut current, &mut blocks);
                inside = false;
            }
        }
        flush(&mut current, &mut blocks);

        debug!(
            section = self.rule.kind.as_str(),
            blocks = blocks.len(),
            "segmented section"
        );
        blocks
    }

    /// Blocks that pass the minimum-content filter, with the empty policy applied.
    pub fn extract(&self, text: &ResumeText) -> Vec<String> {
        let blocks: Vec<String> = self
            .collect_blocks(text)
            .into_iter()
            .filter(|b| word_count(b) > self.rule.min_words)
            .collect();

        if blocks.is_empty() && self.rule.on_empty == OnEmpty::Sentinel {
            return vec![NOT_FOUND.to_string()];
        }
        blocks
    }

    /// First surviving block, for sections that hold a single value.
    pub fn extract_one(&self, text: &ResumeText) -> String {
        self.collect_blocks(text)
            .into_iter()
            .find(|b| word_count(b) > self.rule.min_words)
            .unwrap_or_else(|| NOT_FOUND.to_string())
    }
}

fn flush(current: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if !current.is_empty() {
        blocks.push(current.join(" "));
        current.clear();
    }
}

/// The full set of section rules with boundaries resolved.
#[derive(Debug, Clone)]
pub struct Segmenter {
    sections: Vec<CompiledSection>,
}

impl Segmenter {
    /// Resolves every rule's boundary set: its own `end` list, every other
    /// rule's start keywords, and the common résumé headings.
    pub fn new(rules: Vec<SectionRule>) -> Self {
        let sections = rules
            .iter()
            .map(|rule| {
                let start = lowercased(&rule.start);
                let mut end = lowercased(&rule.end);
                for other in rules.iter().filter(|o| o.kind != rule.kind) {
                    end.extend(lowercased(&other.start));
                }
                end.extend(COMMON_BOUNDARIES.iter().map(|s| s.to_string()));
                end.retain(|k| !start.contains(k));
                end.sort();
                end.dedup();

                CompiledSection {
                    rule: rule.clone(),
                    start,
                    end,
                }
            })
            .collect();

        Self { sections }
    }

    pub fn section(&self, kind: SectionKind) -> Option<&CompiledSection> {
        self.sections.iter().find(|s| s.rule.kind == kind)
    }

    /// Block list for `kind`; an unconfigured section yields an empty list.
    pub fn blocks(&self, kind: SectionKind, text: &ResumeText) -> Vec<String> {
        self.section(kind)
            .map(|s| s.extract(text))
            .unwrap_or_default()
    }

    /// Single value for `kind`, or the sentinel.
    pub fn single(&self, kind: SectionKind, text: &ResumeText) -> String {
        self.section(kind)
            .map(|s| s.extract_one(text))
            .unwrap_or_else(|| NOT_FOUND.to_string())
    }

    /// Every heading keyword the segmenter knows, used to reject heading lines elsewhere.
    pub fn all_headings(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .sections
            .iter()
            .flat_map(|s| s.start.iter().cloned())
            .chain(COMMON_BOUNDARIES.iter().map(|s| s.to_string()))
            .collect();
        all.sort();
        all.dedup();
        all
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

fn lowercased(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.trim().to_lowercase()).collect()
}
