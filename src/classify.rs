// src/classify.rs
//! Pure posting classifier: maps `(title, location)` to seniority level,
//! remote flag, and role relevance. Total — every input produces exactly one
//! level, never a failure.

use serde::{Deserialize, Serialize};

use crate::taxonomy::Taxonomy;

/// Derived seniority tier. There is deliberately no Unknown state: titles
/// matching nothing collapse into `MidLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Senior,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Junior,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Senior => "Senior",
            Level::MidLevel => "Mid-Level",
            Level::Junior => "Junior",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub level: Level,
    pub is_remote: bool,
    pub role_relevant: bool,
}

#[derive(Debug)]
pub struct Classifier {
    taxonomy: Taxonomy,
}

impl Classifier {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Precedence is Senior > Junior > Mid-Level: explicit seniority language
    /// dominates ambiguous juniority language ("Senior Associate" is Senior).
    pub fn classify(&self, title: &str, location: &str) -> Classification {
        let title = title.to_lowercase();
        let location = location.to_lowercase();

        let level = if any_match(&self.taxonomy.senior, &title) {
            Level::Senior
        } else if any_match(&self.taxonomy.junior, &title) {
            Level::Junior
        } else if any_match(&self.taxonomy.mid_level, &title) {
            Level::MidLevel
        } else {
            Level::MidLevel
        };

        let role_relevant = self
            .taxonomy
            .role_keywords
            .iter()
            .any(|k| title.contains(k.as_str()));

        let is_remote = self
            .taxonomy
            .remote_keywords
            .iter()
            .any(|k| location.contains(k.as_str()))
            || title.contains("remote");

        Classification {
            level,
            is_remote,
            role_relevant,
        }
    }
}

fn any_match(patterns: &[regex::Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}
