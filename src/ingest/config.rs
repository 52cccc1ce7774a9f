// src/ingest/config.rs
//! Configuration collaborators: the company list (source tag → employer
//! slugs) and the hidden-jobs exclusion set. Both recover from absent or
//! malformed files with empty defaults — a missing config means a run with
//! reduced or zero scope, never an error.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::model::Source;

pub const ENV_COMPANIES_PATH: &str = "COMPANIES_CONFIG_PATH";
pub const ENV_HIDDEN_JOBS_PATH: &str = "HIDDEN_JOBS_PATH";

/// Mapping from source tag to an ordered list of employer slugs. Read-only
/// to the aggregator.
#[derive(Debug, Clone, Default)]
pub struct CompanyList {
    by_source: BTreeMap<Source, Vec<String>>,
}

impl CompanyList {
    pub fn is_empty(&self) -> bool {
        self.by_source.values().all(|v| v.is_empty())
    }

    pub fn slugs_for(&self, source: Source) -> &[String] {
        self.by_source
            .get(&source)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    fn from_raw(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut by_source = BTreeMap::new();
        for (tag, slugs) in raw {
            match Source::from_tag(&tag) {
                Some(source) => {
                    by_source.insert(source, clean_slugs(slugs));
                }
                None => {
                    tracing::warn!(tag = %tag, "unknown source tag in company list; ignoring");
                }
            }
        }
        Self { by_source }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_json::from_str(s).context("parsing company list json")?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> =
            toml::from_str(s).context("parsing company list toml")?;
        Ok(Self::from_raw(raw))
    }
}

/// Trim, drop empties, drop repeats — but keep the configured order.
fn clean_slugs(slugs: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(slugs.len());
    for s in slugs {
        let t = s.trim();
        if t.is_empty() {
            continue;
        }
        if seen.insert(t.to_string()) {
            out.push(t.to_string());
        }
    }
    out
}

/// Load the company list from an explicit path; the extension picks the
/// format, defaulting to JSON.
pub fn load_company_list_from(path: &Path) -> Result<CompanyList> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading company list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if ext == "toml" {
        CompanyList::from_toml_str(&content)
    } else {
        CompanyList::from_json_str(&content)
    }
}

/// Load using env var + fallbacks:
/// 1) $COMPANIES_CONFIG_PATH
/// 2) config/companies.json
/// 3) config/companies.toml
/// No file at all yields an empty list (the run then finds zero jobs).
pub fn load_company_list_default() -> Result<CompanyList> {
    if let Ok(p) = std::env::var(ENV_COMPANIES_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_company_list_from(&pb);
        }
        return Err(anyhow!("COMPANIES_CONFIG_PATH points to non-existent path"));
    }
    let json_p = PathBuf::from("config/companies.json");
    if json_p.exists() {
        return load_company_list_from(&json_p);
    }
    let toml_p = PathBuf::from("config/companies.toml");
    if toml_p.exists() {
        return load_company_list_from(&toml_p);
    }
    Ok(CompanyList::default())
}

/// URLs the user hid via the dashboard. Absent or malformed file means no
/// exclusions.
pub fn load_hidden_jobs_from(path: &Path) -> HashSet<String> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return HashSet::new(),
    };
    match serde_json::from_str::<Vec<String>>(&content) {
        Ok(urls) => urls.into_iter().collect(),
        Err(e) => {
            tracing::warn!(error = ?e, path = %path.display(), "malformed hidden-jobs file; ignoring");
            HashSet::new()
        }
    }
}

pub fn load_hidden_jobs_default() -> HashSet<String> {
    let path = std::env::var(ENV_HIDDEN_JOBS_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("hidden_jobs.json"));
    load_hidden_jobs_from(&path)
}
