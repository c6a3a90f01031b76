//! Scoring — ATS score, role prediction, job fit and keyword density.
//!
//! All four are keyword heuristics over the lowercased text. None of them
//! can fail; an empty document simply scores low.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::models::{ContactInfo, OrderedMap, ScoreRecord};
use crate::analysis::normalize::{alphabetic_tokens, ResumeText};

pub const DEFAULT_ROLE: &str = "General IT Role";

/// Headings whose presence counts toward the structure component.
const STRUCTURE_KEYWORDS: &[&str] = &["experience", "education", "skills", "projects"];

const SKILL_POINTS: f64 = 10.0;
const SKILL_CAP: f64 = 50.0;
const CONTACT_FULL: f64 = 20.0;
const CONTACT_PARTIAL: f64 = 10.0;
const STRUCTURE_MAX: f64 = 20.0;
const KEYWORD_DENSITY_TOP: usize = 10;

/// A role and the keywords that signal it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub role: String,
    pub keywords: Vec<String>,
}

impl RoleProfile {
    fn new(role: &str, keywords: &[&str]) -> Self {
        Self {
            role: role.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Role prediction table. Order is the tie-break: the first role with any
/// keyword present wins.
pub fn default_role_priority() -> Vec<RoleProfile> {
    vec![
        RoleProfile::new(
            "Data Scientist",
            &["machine learning", "data analysis", "pandas", "numpy", "tensorflow", "keras", "nlp"],
        ),
        RoleProfile::new("Data Analyst", &["excel", "tableau", "power bi", "sql", "pandas"]),
        RoleProfile::new(
            "Frontend Developer",
            &["html", "css", "javascript", "react", "angular", "vue"],
        ),
        RoleProfile::new(
            "Backend Developer",
            &["flask", "django", "apis", "sql", "postgres", "mysql"],
        ),
        RoleProfile::new(
            "Full Stack Developer",
            &["react", "flask", "django", "javascript", "html", "css"],
        ),
        RoleProfile::new(
            "Machine Learning Engineer",
            &["tensorflow", "keras", "pytorch", "deep learning"],
        ),
    ]
}

/// Job-fit table, reported in this order.
pub fn default_job_fit_roles() -> Vec<RoleProfile> {
    vec![
        RoleProfile::new(
            "Data Scientist",
            &["machine learning", "data analysis", "python", "pandas"],
        ),
        RoleProfile::new("Web Developer", &["html", "css", "javascript", "react"]),
        RoleProfile::new("Backend Developer", &["flask", "django", "apis", "sql"]),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// ATS score
// ────────────────────────────────────────────────────────────────────────────

/// Individual ATS components, exposed for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtsBreakdown {
    pub skill: f64,
    pub contact: f64,
    pub structure: f64,
    pub length: f64,
}

impl AtsBreakdown {
    /// Sum of the components, clamped to [0, 100] and rounded to 2 decimals.
    pub fn total(&self) -> f64 {
        let sum = self.skill + self.contact + self.structure + self.length;
        round2(sum.clamp(0.0, 100.0))
    }
}

pub fn ats_breakdown(text: &ResumeText, skill_count: usize, contact: &ContactInfo) -> AtsBreakdown {
    let skill = (skill_count as f64 * SKILL_POINTS).min(SKILL_CAP);

    let contact = if contact.has_email_and_phone() {
        CONTACT_FULL
    } else {
        CONTACT_PARTIAL
    };

    let present = STRUCTURE_KEYWORDS
        .iter()
        .filter(|k| text.lower().contains(*k))
        .count();
    let structure = STRUCTURE_MAX * present as f64 / STRUCTURE_KEYWORDS.len() as f64;

    AtsBreakdown {
        skill,
        contact,
        structure,
        length: length_score(text.word_count()),
    }
}

pub fn length_score(words: usize) -> f64 {
    match words {
        300..=800 => 10.0,
        150..=299 => 5.0,
        _ => 0.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Role prediction and job fit
// ────────────────────────────────────────────────────────────────────────────

pub fn predict_role(text: &ResumeText, priority: &[RoleProfile]) -> String {
    let lower = text.lower();
    priority
        .iter()
        .find(|p| p.keywords.iter().any(|k| !k.is_empty() && lower.contains(k.as_str())))
        .map(|p| p.role.clone())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string())
}

pub fn job_fit(text: &ResumeText, roles: &[RoleProfile]) -> OrderedMap<String> {
    let lower = text.lower();
    roles
        .iter()
        .map(|p| {
            let label = if p.keywords.is_empty() {
                "0% Match".to_string()
            } else {
                let matches = p
                    .keywords
                    .iter()
                    .filter(|k| lower.contains(k.as_str()))
                    .count();
                let pct = (100.0 * matches as f64 / p.keywords.len() as f64).round() as u32;
                format!("{pct}% Match")
            };
            (p.role.clone(), label)
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword density
// ────────────────────────────────────────────────────────────────────────────

/// Ten most frequent alphabetic tokens; equal counts keep first-seen order.
pub fn keyword_density(text: &ResumeText) -> OrderedMap<usize> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for token in alphabetic_tokens(text.lower()) {
        match index.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(KEYWORD_DENSITY_TOP)
        .map(|(token, count)| (token.to_string(), count))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Score record
// ────────────────────────────────────────────────────────────────────────────

pub fn score(
    text: &ResumeText,
    technical_skills: &[String],
    contact: &ContactInfo,
    role_priority: &[RoleProfile],
    job_fit_roles: &[RoleProfile],
) -> ScoreRecord {
    ScoreRecord {
        ats_score: ats_breakdown(text, technical_skills.len(), contact).total(),
        predicted_role: predict_role(text, role_priority),
        job_fit: job_fit(text, job_fit_roles),
        keyword_density: keyword_density(text),
    }
}
