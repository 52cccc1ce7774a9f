// src/ingest/providers/mod.rs
pub mod greenhouse;
pub mod lever;
pub mod workable;

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;

use crate::classify::{Classifier, Level};
use crate::model::{ClassifiedPosting, Source};

pub use greenhouse::GreenhouseProvider;
pub use lever::LeverProvider;
pub use workable::WorkableProvider;

/// Sentinel for postings whose source omits the location field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// One adapter per ATS. Given an employer slug, fetch that employer's board
/// and return classified, business-filtered postings. Failures are reported
/// as `Err` and recovered per-employer by the aggregator.
#[async_trait::async_trait]
pub trait BoardProvider: Send + Sync {
    fn source(&self) -> Source;
    async fn fetch_company(&self, slug: &str) -> Result<Vec<ClassifiedPosting>>;
}

/// The three production adapters sharing one pooled client and classifier.
pub fn default_providers(
    client: Client,
    classifier: Arc<Classifier>,
) -> Vec<Arc<dyn BoardProvider>> {
    vec![
        Arc::new(GreenhouseProvider::new(client.clone(), classifier.clone())),
        Arc::new(LeverProvider::new(client.clone(), classifier.clone())),
        Arc::new(WorkableProvider::new(client, classifier)),
    ]
}

pub(crate) fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Shared per-entry assembly: normalize the location, validate the URL,
/// classify, and apply the business filter (role-relevant, non-senior only).
/// Returns `None` for anything discarded.
pub(crate) fn build_posting(
    classifier: &Classifier,
    source: Source,
    title: &str,
    location: Option<String>,
    url: &str,
    company: &str,
    posted_date: Option<NaiveDate>,
    scraped_at: DateTime<Utc>,
) -> Option<ClassifiedPosting> {
    if !is_absolute_url(url) {
        return None;
    }
    let location = location
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let c = classifier.classify(title, &location);
    if !c.role_relevant || c.level == Level::Senior {
        return None;
    }

    Some(ClassifiedPosting {
        title: title.to_string(),
        company: company.to_string(),
        location,
        url: url.to_string(),
        source,
        level: c.level,
        is_remote: c.is_remote,
        posted_date,
        scraped_at,
    })
}

/// Parse the date part of an ISO-8601/RFC3339 timestamp ("2024-05-01T...").
pub(crate) fn date_from_iso_prefix(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
}

pub(crate) fn date_from_epoch_millis(ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    fn classifier() -> Classifier {
        Classifier::new(Taxonomy::embedded().expect("embedded taxonomy"))
    }

    #[test]
    fn build_posting_drops_relative_urls() {
        let c = classifier();
        let p = build_posting(
            &c,
            Source::Greenhouse,
            "Software Engineer II",
            Some("NYC".into()),
            "/jobs/123",
            "Acme",
            None,
            Utc::now(),
        );
        assert!(p.is_none());
    }

    #[test]
    fn build_posting_drops_seniors_and_irrelevant_titles() {
        let c = classifier();
        let senior = build_posting(
            &c,
            Source::Lever,
            "Senior Software Engineer",
            Some("Remote - US".into()),
            "https://jobs.example.com/1",
            "Acme",
            None,
            Utc::now(),
        );
        assert!(senior.is_none());

        let irrelevant = build_posting(
            &c,
            Source::Lever,
            "Account Executive",
            Some("NYC".into()),
            "https://jobs.example.com/2",
            "Acme",
            None,
            Utc::now(),
        );
        assert!(irrelevant.is_none());
    }

    #[test]
    fn missing_location_gets_sentinel() {
        let c = classifier();
        let p = build_posting(
            &c,
            Source::Workable,
            "Junior Backend Developer",
            None,
            "https://jobs.example.com/3",
            "Acme",
            None,
            Utc::now(),
        )
        .expect("kept");
        assert_eq!(p.location, NOT_SPECIFIED);
        assert!(!p.is_remote);
    }

    #[test]
    fn date_helpers_tolerate_garbage() {
        assert_eq!(
            date_from_iso_prefix("2024-05-01T09:30:00-04:00"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(date_from_iso_prefix("yesterday"), None);
        assert_eq!(date_from_iso_prefix(""), None);
        assert!(date_from_epoch_millis(1_700_000_000_000).is_some());
    }
}
