// src/ingest/providers/workable.rs
//! Workable accounts adapter.
//!
//! `GET https://apply.workable.com/api/v3/accounts/{slug}/jobs` returns
//! `{ "jobs": [...] }`; the location is coarse (`location.country`) and the
//! company name is derived from the slug.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use reqwest::Client;
use serde::Deserialize;

use crate::classify::Classifier;
use crate::ingest::providers::{build_posting, date_from_iso_prefix, BoardProvider};
use crate::ingest::transport;
use crate::model::{ClassifiedPosting, Source};

#[derive(Debug, Deserialize)]
pub struct AccountJobs {
    #[serde(default)]
    jobs: Vec<AccountJob>,
}

#[derive(Debug, Deserialize)]
struct AccountJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    location: Option<AccountLocation>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_on: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountLocation {
    #[serde(default)]
    country: Option<String>,
}

pub struct WorkableProvider {
    client: Client,
    classifier: Arc<Classifier>,
}

impl WorkableProvider {
    pub fn new(client: Client, classifier: Arc<Classifier>) -> Self {
        Self { client, classifier }
    }

    /// Parse a raw account body. Public for fixture-driven tests.
    pub fn parse_body(
        &self,
        slug: &str,
        body: &str,
        scraped_at: DateTime<Utc>,
    ) -> Result<Vec<ClassifiedPosting>> {
        let resp: AccountJobs =
            serde_json::from_str(body).context("parsing workable account json")?;
        Ok(self.collect(slug, resp, scraped_at))
    }

    fn collect(
        &self,
        slug: &str,
        resp: AccountJobs,
        scraped_at: DateTime<Utc>,
    ) -> Vec<ClassifiedPosting> {
        let company = capitalize(slug);
        let total = resp.jobs.len();
        let mut out = Vec::with_capacity(total);
        for job in resp.jobs {
            let url = job.url.unwrap_or_default();
            let posted = job.published_on.as_deref().and_then(date_from_iso_prefix);
            if let Some(p) = build_posting(
                &self.classifier,
                Source::Workable,
                &job.title,
                job.location.and_then(|l| l.country),
                &url,
                &company,
                posted,
                scraped_at,
            ) {
                out.push(p);
            }
        }
        counter!("scrape_jobs_total", "source" => "workable").increment(total as u64);
        counter!("scrape_kept_total", "source" => "workable").increment(out.len() as u64);
        out
    }
}

fn capitalize(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl BoardProvider for WorkableProvider {
    fn source(&self) -> Source {
        Source::Workable
    }

    async fn fetch_company(&self, slug: &str) -> Result<Vec<ClassifiedPosting>> {
        let url = format!("https://apply.workable.com/api/v3/accounts/{slug}/jobs");
        let resp: AccountJobs = transport::get_json(&self.client, &url, &[]).await?;
        Ok(self.collect(slug, resp, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalize_slug() {
        assert_eq!(capitalize("blueground"), "Blueground");
        assert_eq!(capitalize(""), "");
    }
}
