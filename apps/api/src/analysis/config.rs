//! Analyzer tables — section rules, skill vocabularies and role tables.
//!
//! Defaults are compiled in. An optional TOML file can replace any table;
//! keys it leaves out keep their defaults. Section rules merge by kind, so a
//! file listing only `projects` leaves the other sections untouched.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::analysis::scoring::{default_job_fit_roles, default_role_priority, RoleProfile};
use crate::analysis::sections::{default_rules, Collection, SectionRule};
use crate::analysis::skills::{SOFT_SKILLS, TECHNICAL_SKILLS};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub sections: Vec<SectionRule>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    /// Ordered: the first role with a keyword hit is the prediction.
    pub role_priority: Vec<RoleProfile>,
    pub job_fit: Vec<RoleProfile>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sections: default_rules(),
            technical_skills: TECHNICAL_SKILLS.iter().map(|s| s.to_string()).collect(),
            soft_skills: SOFT_SKILLS.iter().map(|s| s.to_string()).collect(),
            role_priority: default_role_priority(),
            job_fit: default_job_fit_roles(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("invalid analyzer config TOML")?;
        config.sections = merge_sections(default_rules(), config.sections);
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        for rule in &self.sections {
            if rule.collection == (Collection::Window { lines: 0 }) {
                bail!(
                    "section '{}' uses a window of 0 lines",
                    rule.kind.as_str()
                );
            }
        }
        Ok(())
    }
}

/// Overlays `overrides` onto `defaults` by section kind, keeping default order.
fn merge_sections(mut defaults: Vec<SectionRule>, overrides: Vec<SectionRule>) -> Vec<SectionRule> {
    for rule in overrides {
        match defaults.iter_mut().find(|d| d.kind == rule.kind) {
            Some(slot) => *slot = rule,
            None => defaults.push(rule),
        }
    }
    defaults
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::analysis::sections::{Collection, OnEmpty, SectionKind};

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config = AnalyzerConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
technical_skills = ["rust", "go"]

[[role_priority]]
role = "Systems Engineer"
keywords = ["rust", "kernel"]
"#,
        )
        .unwrap();
        assert_eq!(config.technical_skills, vec!["rust", "go"]);
        assert_eq!(config.role_priority.len(), 1);
        assert_eq!(config.role_priority[0].role, "Systems Engineer");
        assert_eq!(config.soft_skills, AnalyzerConfig::default().soft_skills);
        assert_eq!(config.sections.len(), 5);
    }

    #[test]
    fn test_section_rule_with_window_policy() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
[[sections]]
kind = "projects"
start = ["projects"]
collection = { mode = "window", lines = 3 }
on_empty = "sentinel"
"#,
        )
        .unwrap();
        let rule = config
            .sections
            .iter()
            .find(|r| r.kind == SectionKind::Projects)
            .unwrap();
        assert_eq!(rule.collection, Collection::Window { lines: 3 });
        assert_eq!(rule.on_empty, OnEmpty::Sentinel);
        assert_eq!(rule.min_words, 3);
    }

    #[test]
    fn test_partial_sections_merge_by_kind() {
        let config = AnalyzerConfig::from_toml_str(
            r#"
[[sections]]
kind = "projects"
start = ["portfolio projects"]
"#,
        )
        .unwrap();
        assert_eq!(config.sections.len(), 5);
        let kinds: Vec<_> = config.sections.iter().map(|r| r.kind).collect();
        let default_kinds: Vec<_> = default_rules().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, default_kinds);

        let projects = config
            .sections
            .iter()
            .find(|r| r.kind == SectionKind::Projects)
            .unwrap();
        assert_eq!(projects.start, vec!["portfolio projects"]);

        let certifications = config
            .sections
            .iter()
            .find(|r| r.kind == SectionKind::Certifications)
            .unwrap();
        assert_eq!(certifications.on_empty, OnEmpty::Sentinel);
    }

    #[test]
    fn test_zero_line_window_is_rejected() {
        let err = AnalyzerConfig::from_toml_str(
            r#"
[[sections]]
kind = "projects"
start = ["projects"]
collection = { mode = "window", lines = 0 }
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("window of 0 lines"));
    }

    #[test]
    fn test_unknown_section_kind_is_rejected() {
        let err = AnalyzerConfig::from_toml_str(
            r#"
[[sections]]
kind = "hobbies"
start = ["hobbies"]
"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"soft_skills = ["empathy"]"#).unwrap();
        let config = AnalyzerConfig::load(file.path()).unwrap();
        assert_eq!(config.soft_skills, vec!["empathy"]);
    }

    #[test]
    fn test_load_missing_file_fails_with_path() {
        let err = AnalyzerConfig::load(Path::new("/nonexistent/analyzer.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/analyzer.toml"));
    }
}
