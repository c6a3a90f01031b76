//! Resume analysis pipeline: raw text in, `Profile` out.
//!
//! `Analyzer` is built once by the caller and shared read-only. `analyze` is
//! pure and synchronous; each extractor reads the same `ResumeText` and
//! none depends on another's output except the scorer, which takes the
//! matched skills and contact details.

pub mod config;
pub mod contact;
pub mod education;
pub mod handlers;
pub mod models;
pub mod names;
pub mod normalize;
pub mod scoring;
pub mod sections;
pub mod skills;

use tracing::debug;

use crate::analysis::config::AnalyzerConfig;
use crate::analysis::models::{or_not_found, Profile};
use crate::analysis::names::{HeaderNameRecognizer, NameRecognizer};
use crate::analysis::normalize::ResumeText;
use crate::analysis::scoring::RoleProfile;
use crate::analysis::sections::{SectionKind, Segmenter};
use crate::analysis::skills::normalize_vocabulary;

pub struct Analyzer {
    segmenter: Segmenter,
    headings: Vec<String>,
    technical_skills: Vec<String>,
    soft_skills: Vec<String>,
    role_priority: Vec<RoleProfile>,
    job_fit_roles: Vec<RoleProfile>,
    names: Box<dyn NameRecognizer>,
}

impl Analyzer {
    /// Builds an analyzer with the header-line name recognizer.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::build(config, |headings: &[String]| -> Box<dyn NameRecognizer> {
            Box::new(HeaderNameRecognizer::new(headings.to_vec()))
        })
    }

    pub fn with_name_recognizer(config: AnalyzerConfig, names: Box<dyn NameRecognizer>) -> Self {
        Self::build(config, |_| names)
    }

    fn build(
        config: AnalyzerConfig,
        names: impl FnOnce(&[String]) -> Box<dyn NameRecognizer>,
    ) -> Self {
        let AnalyzerConfig {
            sections,
            technical_skills,
            soft_skills,
            role_priority,
            job_fit,
        } = config;

        let segmenter = Segmenter::new(sections);
        let headings = segmenter.all_headings();
        let names = names(&headings);
        Self {
            segmenter,
            headings,
            technical_skills: normalize_vocabulary(&technical_skills),
            soft_skills: normalize_vocabulary(&soft_skills),
            role_priority: lowercase_roles(role_priority),
            job_fit_roles: lowercase_roles(job_fit),
            names,
        }
    }

    /// Runs every extractor over `raw` and assembles the profile.
    ///
    /// Empty input is valid and yields the all-default profile.
    pub fn analyze(&self, raw: &str) -> Profile {
        let text = ResumeText::new(raw);
        if text.is_empty() {
            debug!("analyzing empty document");
        }

        let contact = contact::extract_contact(&text);
        let technical_skills = skills::match_technical_skills(&text, &self.technical_skills);
        let soft_skills = skills::match_soft_skills(&text, &self.soft_skills);
        let education = education::extract_education(&text, &self.headings);
        let scores = scoring::score(
            &text,
            &technical_skills,
            &contact,
            &self.role_priority,
            &self.job_fit_roles,
        );

        debug!(
            skills = technical_skills.len(),
            education = education.len(),
            "extractors finished"
        );

        Profile {
            name: or_not_found(self.names.recognize(&text)),
            email: or_not_found(contact.email),
            phone: or_not_found(contact.phone),
            linkedin: or_not_found(contact.linkedin),
            github: or_not_found(contact.github),
            portfolio: or_not_found(contact.portfolio),
            professional_summary: self.segmenter.single(SectionKind::Summary, &text),
            education,
            technical_skills,
            soft_skills,
            projects: self.segmenter.blocks(SectionKind::Projects, &text),
            internships: self.segmenter.blocks(SectionKind::Internships, &text),
            certifications: self.segmenter.blocks(SectionKind::Certifications, &text),
            achievements: self.segmenter.blocks(SectionKind::Achievements, &text),
            word_count: text.word_count(),
            predicted_role: scores.predicted_role,
            job_fit: scores.job_fit,
            ats_score: scores.ats_score,
            keyword_density: scores.keyword_density,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

fn lowercase_roles(roles: Vec<RoleProfile>) -> Vec<RoleProfile> {
    roles
        .into_iter()
        .map(|r| RoleProfile {
            role: r.role,
            keywords: normalize_vocabulary(&r.keywords),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{EducationEntry, NOT_FOUND};

    const SAMPLE: &str = "\
Aarav Mehta
aarav.mehta@example.com | +91 98765 43210
https://github.com/aarav https://linkedin.com/in/aarav https://aarav.dev

Professional Summary
Data-minded engineer who enjoys building analytics tools with Python and SQL.

Education
B.Tech in Computer Science
VIT Vellore | CGPA: 8.9 | 2019-2023

Skills
Python, SQL, Pandas, Power BI, Machine Learning
Strong communication and teamwork.

Projects
Sales Forecaster: predicted weekly demand with pandas and scikit models
Certifications: Google Data Analytics Professional Certificate
Internships
Data intern at Zeta Analytics building Tableau dashboards for finance teams
Achievements
Winner of the college hackathon among 120 teams
";

    #[test]
    fn test_sample_resume_end_to_end() {
        let profile = Analyzer::default().analyze(SAMPLE);

        assert_eq!(profile.name, "Aarav Mehta");
        assert_eq!(profile.email, "aarav.mehta@example.com");
        assert_eq!(profile.phone, "+91 98765 43210");
        assert_eq!(profile.github, "https://github.com/aarav");
        assert_eq!(profile.linkedin, "https://linkedin.com/in/aarav");
        assert_eq!(profile.portfolio, "https://aarav.dev");
        assert_eq!(
            profile.professional_summary,
            "Data-minded engineer who enjoys building analytics tools with Python and SQL."
        );
        assert_eq!(
            profile.education,
            vec![EducationEntry {
                education: "B.Tech in Computer Science".to_string(),
                institution: "VIT Vellore".to_string(),
                cgpa: "8.9".to_string(),
                year: "2019-2023".to_string(),
            }]
        );
        assert_eq!(
            profile.technical_skills,
            vec!["python", "sql", "machine learning", "pandas", "power bi", "tableau"]
        );
        assert_eq!(profile.soft_skills, vec!["communication", "teamwork"]);
        assert_eq!(
            profile.projects,
            vec!["Sales Forecaster: predicted weekly demand with pandas and scikit models"]
        );
        assert_eq!(
            profile.certifications,
            vec!["Google Data Analytics Professional Certificate"]
        );
        assert_eq!(
            profile.internships,
            vec!["Data intern at Zeta Analytics building Tableau dashboards for finance teams"]
        );
        assert_eq!(
            profile.achievements,
            vec!["Winner of the college hackathon among 120 teams"]
        );
        assert_eq!(profile.predicted_role, "Data Scientist");
        assert!(profile.ats_score >= 0.0 && profile.ats_score <= 100.0);
    }

    #[test]
    fn test_empty_text_yields_default_profile() {
        let profile = Analyzer::default().analyze("");
        assert_eq!(profile.name, NOT_FOUND);
        assert_eq!(profile.email, NOT_FOUND);
        assert_eq!(profile.phone, NOT_FOUND);
        assert_eq!(profile.linkedin, NOT_FOUND);
        assert_eq!(profile.github, NOT_FOUND);
        assert_eq!(profile.portfolio, NOT_FOUND);
        assert_eq!(profile.professional_summary, NOT_FOUND);
        assert_eq!(profile.education, vec![EducationEntry::default()]);
        assert!(profile.technical_skills.is_empty());
        assert!(profile.projects.is_empty());
        assert_eq!(profile.certifications, vec![NOT_FOUND]);
        assert_eq!(profile.word_count, 0);
        assert_eq!(profile.predicted_role, "General IT Role");
        assert_eq!(profile.ats_score, 10.0);
        assert!(profile.keyword_density.is_empty());
    }

    #[test]
    fn test_output_has_every_key_for_any_input() {
        const KEYS: &[&str] = &[
            "name",
            "email",
            "phone",
            "linkedin",
            "github",
            "portfolio",
            "professional_summary",
            "education",
            "technical_skills",
            "soft_skills",
            "projects",
            "internships",
            "certifications",
            "achievements",
            "word_count",
            "predicted_role",
            "job_fit",
            "ats_score",
            "keyword_density",
        ];
        let analyzer = Analyzer::default();
        for input in ["", "   \n\n", SAMPLE, "@@@ ### 12345678901234"] {
            let value = serde_json::to_value(analyzer.analyze(input)).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), KEYS.len());
            for key in KEYS {
                let field = object.get(*key).unwrap_or_else(|| panic!("missing {key}"));
                assert!(!field.is_null(), "{key} is null");
            }
        }
    }

    #[test]
    fn test_reference_scoring_scenario() {
        let mut body = String::from(
            "john@example.com +1 555-123-4567 python sql experience education skills projects",
        );
        // 9 words so far, pad to exactly 500.
        for _ in 0..491 {
            body.push_str(" lorem");
        }
        let profile = Analyzer::default().analyze(&body);
        assert_eq!(profile.word_count, 500);
        assert_eq!(profile.technical_skills, vec!["python", "sql"]);
        assert_eq!(profile.email, "john@example.com");
        assert_eq!(profile.phone, "+1 555-123-4567");
        assert_eq!(profile.ats_score, 70.0);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let analyzer = Analyzer::default();
        let first = serde_json::to_string(&analyzer.analyze(SAMPLE)).unwrap();
        let second = serde_json::to_string(&analyzer.analyze(SAMPLE)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_name_recognizer_is_used() {
        struct Fixed;
        impl NameRecognizer for Fixed {
            fn recognize(&self, _text: &ResumeText) -> Option<String> {
                Some("Fixed Name".to_string())
            }
        }
        let analyzer = Analyzer::with_name_recognizer(AnalyzerConfig::default(), Box::new(Fixed));
        assert_eq!(analyzer.analyze("").name, "Fixed Name");
    }

    #[test]
    fn test_configured_role_table_is_lowercased() {
        let config = AnalyzerConfig {
            role_priority: vec![RoleProfile {
                role: "Systems Engineer".to_string(),
                keywords: vec!["Rust".to_string()],
            }],
            ..AnalyzerConfig::default()
        };
        let profile = Analyzer::new(config).analyze("Wrote RUST services");
        assert_eq!(profile.predicted_role, "Systems Engineer");
    }

    #[test]
    fn test_configured_headings_are_not_names() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
[[sections]]
kind = "summary"
start = ["career highlights"]
on_empty = "sentinel"
"#,
        )
        .unwrap();
        let profile = Analyzer::new(config)
            .analyze("Career Highlights\nJane Doe\nShipped search ranking used by millions");
        assert_eq!(profile.name, "Jane Doe");
    }

    #[test]
    fn test_partial_section_override_keeps_other_sections() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
[[sections]]
kind = "projects"
start = ["portfolio projects"]
"#,
        )
        .unwrap();
        let analyzer = Analyzer::new(config);

        let profile = analyzer.analyze("Certifications\nAWS Certified Cloud Practitioner");
        assert_eq!(profile.certifications, vec!["AWS Certified Cloud Practitioner"]);

        let profile = analyzer.analyze("Nothing to see here");
        assert_eq!(profile.certifications, vec![NOT_FOUND]);
        assert_eq!(profile.professional_summary, NOT_FOUND);
    }
}
