// src/model.rs
//! Core records flowing through the pipeline: source tags, classified
//! postings, and the immutable per-run snapshot.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::Level;

/// One tag per integrated ATS platform.
///
/// Variant order matters: the dedup tie-break compares `(source, url)` and
/// relies on `Ord` matching the lexicographic order of the tag names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Source {
    Greenhouse,
    Lever,
    Workable,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Greenhouse => "Greenhouse",
            Source::Lever => "Lever",
            Source::Workable => "Workable",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Greenhouse" => Some(Source::Greenhouse),
            "Lever" => Some(Source::Lever),
            "Workable" => Some(Source::Workable),
            _ => None,
        }
    }
}

/// The unit of record after classification. `url` is the canonical link into
/// the source board; postings without an absolute URL never reach this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source: Source,
    pub level: Level,
    pub is_remote: bool,
    pub posted_date: Option<NaiveDate>,
    pub scraped_at: DateTime<Utc>,
}

impl ClassifiedPosting {
    /// Two postings sharing this triple are the same job, even across
    /// different sources or URLs.
    pub fn dedup_key(&self) -> (String, String, String) {
        (
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
        )
    }
}

/// Immutable result of one aggregation run. Superseded by the next run,
/// never merged or mutated.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub scraped_at: DateTime<Utc>,
    pub jobs: Vec<ClassifiedPosting>,
}

impl Snapshot {
    pub fn empty(scraped_at: DateTime<Utc>) -> Self {
        Self {
            scraped_at,
            jobs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Threadsafe handle the API reads from while the scheduler swaps in fresh
/// snapshots. Readers clone an `Arc` and never block each other.
#[derive(Clone)]
pub struct SnapshotHandle {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotHandle {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    pub fn current(&self) -> Arc<Snapshot> {
        self.inner.read().expect("snapshot lock poisoned").clone()
    }

    pub fn replace(&self, snapshot: Snapshot) {
        *self.inner.write().expect("snapshot lock poisoned") = Arc::new(snapshot);
    }
}
