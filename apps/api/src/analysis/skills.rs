//! Skill matching against closed vocabularies.
//!
//! Technical skills need whole-token (or whole-phrase) equality so "java" is
//! not found inside "javascript". Soft skills are plain substring checks.

use crate::analysis::normalize::{tokens, ResumeText};

pub const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "sql",
    "java",
    "c++",
    "machine learning",
    "deep learning",
    "nlp",
    "flask",
    "django",
    "react",
    "javascript",
    "html",
    "css",
    "pandas",
    "numpy",
    "matplotlib",
    "seaborn",
    "tensorflow",
    "keras",
    "git",
    "linux",
    "excel",
    "power bi",
    "tableau",
];

pub const SOFT_SKILLS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "problem solving",
    "critical thinking",
    "time management",
    "adaptability",
];

/// Returns the technical skills present in the text, in vocabulary order.
pub fn match_technical_skills(text: &ResumeText, vocabulary: &[String]) -> Vec<String> {
    let tokens = tokens(text.lower());

    vocabulary
        .iter()
        .filter(|skill| {
            let phrase: Vec<&str> = skill.split_whitespace().collect();
            match phrase.len() {
                0 => false,
                1 => tokens.iter().any(|t| *t == phrase[0]),
                n => tokens.windows(n).any(|w| w == phrase.as_slice()),
            }
        })
        .cloned()
        .collect()
}

/// Returns the soft skills mentioned anywhere in the text, in vocabulary order.
pub fn match_soft_skills(text: &ResumeText, vocabulary: &[String]) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|skill| !skill.is_empty() && text.lower().contains(skill.as_str()))
        .cloned()
        .collect()
}

/// Lowercases and de-duplicates a vocabulary while keeping its order.
pub fn normalize_vocabulary<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        let word = word.as_ref().trim().to_lowercase();
        if !word.is_empty() && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
