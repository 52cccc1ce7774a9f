// src/ingest/scheduler.rs
//! Optional background rescrape: re-runs the full pipeline on an interval,
//! persists the fresh snapshot, and swaps it into the shared handle.
//! Snapshots are superseded, never merged.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::ingest::config::{load_hidden_jobs_default, CompanyList};
use crate::ingest::providers::BoardProvider;
use crate::model::SnapshotHandle;
use crate::store;

#[derive(Clone, Copy, Debug)]
pub struct RescrapeCfg {
    pub interval_secs: u64,
}

pub fn spawn_rescrape(
    cfg: RescrapeCfg,
    providers: Vec<Arc<dyn BoardProvider>>,
    companies: CompanyList,
    handle: SnapshotHandle,
    out_dir: PathBuf,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(std::time::Duration::from_secs(cfg.interval_secs));
        // The initial run happened at startup; the first tick fires
        // immediately, so consume it.
        ticker.tick().await;
        loop {
            ticker.tick().await;

            let snapshot = crate::ingest::run_once(&providers, &companies).await;
            // Re-read the hidden set every tick so URLs hidden through the
            // dashboard take effect without a restart.
            let hidden = load_hidden_jobs_default();
            let snapshot = crate::ingest::apply_hidden_filter(snapshot, &hidden);

            if snapshot.is_empty() {
                tracing::info!(target: "scrape", "rescrape tick: no jobs found");
            } else if let Err(e) = store::write_snapshot(&out_dir, &snapshot) {
                tracing::warn!(error = ?e, "failed to persist rescrape snapshot");
            }

            tracing::info!(
                target: "scrape",
                jobs = snapshot.len(),
                "rescrape tick complete"
            );
            handle.replace(snapshot);
        }
    })
}
