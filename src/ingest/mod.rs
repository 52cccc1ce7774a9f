// src/ingest/mod.rs
//! Aggregation pipeline: dispatch employer fetches through a bounded worker
//! pool per source, merge adapter outputs, deduplicate, and assemble an
//! immutable snapshot.

pub mod config;
pub mod providers;
pub mod scheduler;
pub mod transport;

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::ingest::config::CompanyList;
use crate::ingest::providers::BoardProvider;
use crate::model::{ClassifiedPosting, Snapshot};

/// Upper bound on in-flight requests per source.
pub const MAX_CONCURRENT_FETCHES: usize = 8;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("scrape_jobs_total", "Raw job entries returned by providers.");
        describe_counter!(
            "scrape_kept_total",
            "Postings kept after classification + business filter."
        );
        describe_counter!("scrape_dedup_total", "Postings removed by deduplication.");
        describe_counter!(
            "scrape_provider_errors_total",
            "Per-employer fetch/parse failures."
        );
        describe_counter!("scrape_runs_total", "Completed aggregation runs.");
        describe_gauge!("scrape_last_run_ts", "Unix ts when the pipeline last ran.");
    });
}

/// Run one full aggregation pass over the configured company list.
///
/// Per-employer failures are isolated: the run always completes, and a fully
/// failed run yields an empty snapshot ("no jobs found"), never an error.
pub async fn run_once(
    providers: &[Arc<dyn BoardProvider>],
    companies: &CompanyList,
) -> Snapshot {
    ensure_metrics_described();
    let scraped_at = Utc::now();

    let mut merged = Vec::new();
    for provider in providers {
        let slugs = companies.slugs_for(provider.source());
        if slugs.is_empty() {
            continue;
        }
        tracing::info!(
            source = provider.source().as_str(),
            companies = slugs.len(),
            "scraping source"
        );
        merged.extend(fetch_source(provider.clone(), slugs.to_vec()).await);
    }

    let (jobs, dedup_cnt) = dedup_postings(merged);

    counter!("scrape_dedup_total").increment(dedup_cnt as u64);
    counter!("scrape_runs_total").increment(1);
    gauge!("scrape_last_run_ts").set(scraped_at.timestamp().max(0) as f64);

    tracing::info!(jobs = jobs.len(), dedup = dedup_cnt, "aggregation run complete");
    Snapshot { scraped_at, jobs }
}

/// Fetch every employer of one source through a bounded pool. Completion
/// order is arbitrary; correctness never depends on it.
async fn fetch_source(
    provider: Arc<dyn BoardProvider>,
    slugs: Vec<String>,
) -> Vec<ClassifiedPosting> {
    let sem = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));
    let mut set = JoinSet::new();

    for slug in slugs {
        let sem = sem.clone();
        let provider = provider.clone();
        set.spawn(async move {
            let _permit = sem.acquire_owned().await.expect("semaphore closed");
            match provider.fetch_company(&slug).await {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(
                        error = ?e,
                        source = provider.source().as_str(),
                        company = %slug,
                        "fetch failed; skipping company"
                    );
                    counter!("scrape_provider_errors_total").increment(1);
                    Vec::new()
                }
            }
        });
    }

    let mut out = Vec::new();
    while let Some(res) = set.join_next().await {
        match res {
            Ok(mut v) => out.append(&mut v),
            Err(e) => tracing::warn!(error = ?e, "fetch task panicked"),
        }
    }
    out
}

/// Deduplicate on the `(title, company, location)` key.
///
/// Tie-break is deterministic regardless of worker-pool completion order:
/// the posting with the lexicographically smaller `(source, url)` pair
/// survives. Output is sorted for stable snapshots across runs.
pub fn dedup_postings(merged: Vec<ClassifiedPosting>) -> (Vec<ClassifiedPosting>, usize) {
    let mut by_key: HashMap<(String, String, String), ClassifiedPosting> = HashMap::new();
    let mut dropped = 0usize;

    for p in merged {
        match by_key.entry(p.dedup_key()) {
            Entry::Occupied(mut e) => {
                dropped += 1;
                let cur = e.get();
                if (p.source, p.url.as_str()) < (cur.source, cur.url.as_str()) {
                    e.insert(p);
                }
            }
            Entry::Vacant(v) => {
                v.insert(p);
            }
        }
    }

    let mut jobs: Vec<_> = by_key.into_values().collect();
    jobs.sort_by_key(|p| {
        (
            p.company.to_lowercase(),
            p.title.to_lowercase(),
            p.location.to_lowercase(),
        )
    });
    (jobs, dropped)
}

/// Drop postings the user hid via the dashboard. Applied before the
/// snapshot is persisted or published.
pub fn apply_hidden_filter(mut snapshot: Snapshot, hidden: &HashSet<String>) -> Snapshot {
    if hidden.is_empty() {
        return snapshot;
    }
    let before = snapshot.jobs.len();
    snapshot.jobs.retain(|j| !hidden.contains(&j.url));
    let removed = before - snapshot.jobs.len();
    if removed > 0 {
        tracing::info!(removed, "filtered hidden jobs");
    }
    snapshot
}
