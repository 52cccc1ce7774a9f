// src/taxonomy.rs
//! Keyword taxonomy for the classifier: three word-boundary-aware pattern
//! sets for seniority plus flat substring lists for role relevance and
//! remote-work signaling.
//!
//! The sets are data, not code — they live in a TOML document (embedded
//! default, overridable via `TAXONOMY_CONFIG_PATH`), so adding a keyword
//! never touches classification logic.

use anyhow::{anyhow, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_TAXONOMY_TOML: &str = include_str!("../config/taxonomy.toml");
pub const ENV_TAXONOMY_CONFIG_PATH: &str = "TAXONOMY_CONFIG_PATH";

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyRoot {
    pub levels: LevelPatterns,
    pub roles: KeywordSection,
    pub remote: KeywordSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelPatterns {
    pub senior: Vec<String>,
    pub junior: Vec<String>,
    pub mid_level: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordSection {
    pub keywords: Vec<String>,
}

/* ----------------------------
Compiled taxonomy
---------------------------- */

/// Compiled pattern sets. Patterns are written for lower-cased input; the
/// classifier lower-cases before matching.
#[derive(Debug)]
pub struct Taxonomy {
    pub senior: Vec<Regex>,
    pub junior: Vec<Regex>,
    pub mid_level: Vec<Regex>,
    pub role_keywords: Vec<String>,
    pub remote_keywords: Vec<String>,
}

impl Taxonomy {
    /// Compile from a TOML string. A bad pattern fails the whole load,
    /// naming the set and the offending pattern.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let root: TaxonomyRoot = toml::from_str(toml_str)?;
        Ok(Self {
            senior: compile_set("senior", &root.levels.senior)?,
            junior: compile_set("junior", &root.levels.junior)?,
            mid_level: compile_set("mid_level", &root.levels.mid_level)?,
            role_keywords: lower_keywords(root.roles.keywords),
            remote_keywords: lower_keywords(root.remote.keywords),
        })
    }

    /// The taxonomy shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_TAXONOMY_TOML)
    }

    /// Load from `TAXONOMY_CONFIG_PATH` when set, otherwise the embedded
    /// default.
    pub fn load_default() -> Result<Self> {
        match std::env::var(ENV_TAXONOMY_CONFIG_PATH) {
            Ok(p) => {
                let path = PathBuf::from(p);
                let content = fs::read_to_string(&path).map_err(|e| {
                    anyhow!("failed to read taxonomy config at {}: {}", path.display(), e)
                })?;
                Self::from_toml_str(&content)
            }
            Err(_) => Self::embedded(),
        }
    }
}

fn compile_set(set: &str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| anyhow!("taxonomy set `{set}`, pattern `{p}`: {e}"))
        })
        .collect()
}

fn lower_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_taxonomy_compiles() {
        let t = Taxonomy::embedded().expect("embedded taxonomy must compile");
        assert!(!t.senior.is_empty());
        assert!(!t.junior.is_empty());
        assert!(!t.mid_level.is_empty());
        assert!(t.role_keywords.iter().any(|k| k == "software engineer"));
        assert!(t.remote_keywords.iter().any(|k| k == "wfh"));
    }

    #[test]
    fn bad_pattern_names_set_and_pattern() {
        let toml = r#"
[levels]
senior = ['\bsenior\b', '(unclosed']
junior = []
mid_level = []

[roles]
keywords = []

[remote]
keywords = []
"#;
        let err = Taxonomy::from_toml_str(toml).unwrap_err().to_string();
        assert!(err.contains("senior"), "error should name the set: {err}");
        assert!(err.contains("(unclosed"), "error should name the pattern: {err}");
    }

    #[test]
    fn numeric_patterns_are_boundary_aware() {
        // `\b3\+` must not fire inside unrelated digit runs.
        let t = Taxonomy::embedded().unwrap();
        let mid_3plus = t
            .mid_level
            .iter()
            .find(|r| r.as_str() == r"\b3\+")
            .expect("mid set has a 3+ pattern");
        assert!(mid_3plus.is_match("engineer (3+ years)"));
        assert!(!mid_3plus.is_match("engineer 123+4"));
    }
}
