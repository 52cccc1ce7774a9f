// src/ingest/providers/lever.rs
//! Lever postings adapter.
//!
//! `GET https://api.lever.co/v0/postings/{slug}?mode=json` returns a
//! top-level array; the title lives in `text`, the location under
//! `categories.location`, the display name (when present) under
//! `company.name`, and `createdAt` is epoch milliseconds.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use reqwest::Client;
use serde::Deserialize;

use crate::classify::Classifier;
use crate::ingest::providers::{build_posting, date_from_epoch_millis, BoardProvider};
use crate::ingest::transport;
use crate::model::{ClassifiedPosting, Source};

#[derive(Debug, Deserialize)]
struct LeverPosting {
    #[serde(default)]
    text: String,
    #[serde(default)]
    categories: Option<LeverCategories>,
    #[serde(default)]
    company: Option<LeverCompany>,
    #[serde(default, rename = "hostedUrl")]
    hosted_url: Option<String>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct LeverCategories {
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LeverCompany {
    #[serde(default)]
    name: Option<String>,
}

pub struct LeverProvider {
    client: Client,
    classifier: Arc<Classifier>,
}

impl LeverProvider {
    pub fn new(client: Client, classifier: Arc<Classifier>) -> Self {
        Self { client, classifier }
    }

    /// Parse a raw postings body. Public for fixture-driven tests.
    pub fn parse_body(
        &self,
        slug: &str,
        body: &str,
        scraped_at: DateTime<Utc>,
    ) -> Result<Vec<ClassifiedPosting>> {
        let postings: Vec<LeverPosting> =
            serde_json::from_str(body).context("parsing lever postings json")?;
        Ok(self.collect(slug, postings, scraped_at))
    }

    fn collect(
        &self,
        slug: &str,
        postings: Vec<LeverPosting>,
        scraped_at: DateTime<Utc>,
    ) -> Vec<ClassifiedPosting> {
        let total = postings.len();
        let mut out = Vec::with_capacity(total);
        for posting in postings {
            let url = posting.hosted_url.unwrap_or_default();
            let posted = posting.created_at.and_then(date_from_epoch_millis);
            // Some postings carry a display name under `company.name`;
            // absent or blank falls back to the queried slug.
            let company = posting
                .company
                .and_then(|c| c.name)
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| slug.to_string());
            if let Some(p) = build_posting(
                &self.classifier,
                Source::Lever,
                &posting.text,
                posting.categories.and_then(|c| c.location),
                &url,
                &company,
                posted,
                scraped_at,
            ) {
                out.push(p);
            }
        }
        counter!("scrape_jobs_total", "source" => "lever").increment(total as u64);
        counter!("scrape_kept_total", "source" => "lever").increment(out.len() as u64);
        out
    }
}

#[async_trait]
impl BoardProvider for LeverProvider {
    fn source(&self) -> Source {
        Source::Lever
    }

    async fn fetch_company(&self, slug: &str) -> Result<Vec<ClassifiedPosting>> {
        let url = format!("https://api.lever.co/v0/postings/{slug}");
        let postings: Vec<LeverPosting> =
            transport::get_json(&self.client, &url, &[("mode", "json")]).await?;
        Ok(self.collect(slug, postings, Utc::now()))
    }
}
