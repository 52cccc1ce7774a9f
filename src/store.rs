// src/store.rs
//! Snapshot persistence collaborator: one timestamped CSV per run, plus the
//! latest-snapshot loader the dashboard boots from.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::model::{ClassifiedPosting, Snapshot};

pub fn snapshot_filename(at: DateTime<Utc>) -> String {
    format!("jobs_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Write the snapshot as `jobs_YYYYMMDD_HHMMSS.csv` under `dir`. An empty
/// snapshot writes nothing and returns `None` ("no jobs found").
pub fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> Result<Option<PathBuf>> {
    if snapshot.is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("creating snapshot dir {}", dir.display()))?;

    let path = dir.join(snapshot_filename(snapshot.scraped_at));
    let mut wtr = csv::Writer::from_path(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    for job in &snapshot.jobs {
        wtr.serialize(job)
            .with_context(|| format!("writing posting {}", job.url))?;
    }
    wtr.flush().context("flushing snapshot csv")?;

    tracing::info!(path = %path.display(), jobs = snapshot.len(), "snapshot written");
    Ok(Some(path))
}

/// Load the most recent `jobs_*.csv` under `dir`. The timestamped filename
/// format sorts lexicographically, so the max name is the newest run.
/// Missing directory or no snapshot files yields `None`.
pub fn load_latest(dir: &Path) -> Result<Option<Snapshot>> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Ok(None),
    };

    let mut latest: Option<(String, PathBuf)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        if !(name.starts_with("jobs_") && name.ends_with(".csv")) {
            continue;
        }
        if latest.as_ref().map_or(true, |(cur, _)| name > *cur) {
            latest = Some((name, path));
        }
    }

    let path = match latest {
        Some((_, p)) => p,
        None => return Ok(None),
    };

    let mut rdr = csv::Reader::from_path(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut jobs = Vec::new();
    for record in rdr.deserialize::<ClassifiedPosting>() {
        jobs.push(record.with_context(|| format!("reading {}", path.display()))?);
    }

    let scraped_at = jobs
        .iter()
        .map(|j| j.scraped_at)
        .max()
        .unwrap_or_else(Utc::now);
    Ok(Some(Snapshot { scraped_at, jobs }))
}

/// Snapshot the dashboard boots from: the fresh scrape when it found
/// anything, otherwise the most recent persisted run. A failed or empty
/// startup scrape must not blank out a dashboard that has history on disk.
pub fn boot_snapshot(dir: &Path, fresh: Snapshot) -> Snapshot {
    if !fresh.is_empty() {
        return fresh;
    }
    match load_latest(dir) {
        Ok(Some(prev)) => {
            tracing::info!(
                jobs = prev.len(),
                scraped_at = %prev.scraped_at,
                "scrape found nothing; serving last persisted snapshot"
            );
            prev
        }
        Ok(None) => fresh,
        Err(e) => {
            tracing::warn!(error = ?e, "failed to load persisted snapshot");
            fresh
        }
    }
}
