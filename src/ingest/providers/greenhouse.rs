// src/ingest/providers/greenhouse.rs
//! Greenhouse job-board adapter.
//!
//! `GET https://boards-api.greenhouse.io/v1/boards/{slug}/jobs?content=true`
//! returns `{ "jobs": [...] }` with nested `location.name` and an RFC3339
//! `updated_at` we take the date part of.

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
pub struct BoardResponse {
    #[serde(default)]
    jobs: Vec<BoardJob>,
}

#[derive(Debug, Deserialize)]
struct BoardJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    location: Option<BoardLocation>,
    #[serde(default)]
    absolute_url: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BoardLocation {
    #[serde(default)]
    name: Option<String>,
}

pub struct GreenhouseProvider {
    client: Client,
    classifier: Arc<Classifier>,
}

impl GreenhouseProvider {
    pub fn new(client: Client, classifier: Arc<Classifier>) -> Self {
        Self { client, classifier }
    }

    /// Parse a raw board body. Public so tests can exercise the schema from
    /// fixtures without HTTP.
    pub fn parse_body(
        &self,
        slug: &str,
        body: &str,
        scraped_at: DateTime<Utc>,
    ) -> Result<Vec<ClassifiedPosting>> {
        let resp: BoardResponse =
            serde_json::from_str(body).context("parsing greenhouse board json")?;
        Ok(self.collect(slug, resp, scraped_at))
    }

    fn collect(
        &self,
        slug: &str,
        resp: BoardResponse,
        scraped_at: DateTime<Utc>,
    ) -> Vec<ClassifiedPosting> {
        let total = resp.jobs.len();
        let mut out = Vec::with_capacity(total);
        for job in resp.jobs {
            let company = job
                .company_name
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| slug.to_string());
            let url = job.absolute_url.unwrap_or_default();
            let posted = job.updated_at.as_deref().and_then(date_from_iso_prefix);
            if let Some(p) = build_posting(
                &self.classifier,
                Source::Greenhouse,
                &job.title,
                job.location.and_then(|l| l.name),
                &url,
                &company,
                posted,
                scraped_at,
            ) {
                out.push(p);
            }
        }
        counter!("scrape_jobs_total", "source" => "greenhouse").increment(total as u64);
        counter!("scrape_kept_total", "source" => "greenhouse").increment(out.len() as u64);
        out
    }
}

#[async_trait]
impl BoardProvider for GreenhouseProvider {
    fn source(&self) -> Source {
        Source::Greenhouse
    }

    async fn fetch_company(&self, slug: &str) -> Result<Vec<ClassifiedPosting>> {
        let url = format!("https://boards-api.greenhouse.io/v1/boards/{slug}/jobs");
        let resp: BoardResponse =
            transport::get_json(&self.client, &url, &[("content", "true")]).await?;
        Ok(self.collect(slug, resp, Utc::now()))
    }
}
