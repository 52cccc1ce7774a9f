// src/filter.rs
//! Filter Engine: pure query/view transformation over one immutable
//! snapshot. The dashboard invokes `query` with a time window and an
//! optional category; counts always cover the time-filtered subset,
//! independent of the selected category.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::classify::Level;
use crate::model::{ClassifiedPosting, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    All,
    Last24h,
    Last7d,
}

impl TimeWindow {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(TimeWindow::All),
            "24h" | "last-24h" => Some(TimeWindow::Last24h),
            "7d" | "last-7d" => Some(TimeWindow::Last7d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Last24h => "24h",
            TimeWindow::Last7d => "7d",
        }
    }

    /// Earliest `posted_date` admitted by this window, or `None` for the
    /// unbounded window.
    fn cutoff(&self, now: DateTime<Utc>) -> Option<NaiveDate> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Last24h => Some((now - Duration::hours(24)).date_naive()),
            TimeWindow::Last7d => Some((now - Duration::days(7)).date_naive()),
        }
    }

    /// Undated postings have unknowable recency and only match the
    /// unbounded window.
    fn admits(&self, posting: &ClassifiedPosting, now: DateTime<Utc>) -> bool {
        match self.cutoff(now) {
            None => true,
            Some(cutoff) => posting.posted_date.is_some_and(|d| d >= cutoff),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteScope {
    Any,
    Onsite,
    Remote,
}

impl RemoteScope {
    fn admits(&self, is_remote: bool) -> bool {
        match self {
            RemoteScope::Any => true,
            RemoteScope::Onsite => !is_remote,
            RemoteScope::Remote => is_remote,
        }
    }
}

/// Category selector driving the drill-down listing. `All` carries deselect
/// semantics: the listing resets to the full time-filtered subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    All,
    Bucket { level: Level, scope: RemoteScope },
}

impl Category {
    pub fn parse(s: &str) -> Option<Self> {
        let bucket = |level, scope| Some(Category::Bucket { level, scope });
        match s {
            "all" => Some(Category::All),
            "senior-all" => bucket(Level::Senior, RemoteScope::Any),
            "senior-onsite" => bucket(Level::Senior, RemoteScope::Onsite),
            "senior-remote" => bucket(Level::Senior, RemoteScope::Remote),
            "mid-level-all" => bucket(Level::MidLevel, RemoteScope::Any),
            "mid-level-onsite" => bucket(Level::MidLevel, RemoteScope::Onsite),
            "mid-level-remote" => bucket(Level::MidLevel, RemoteScope::Remote),
            "junior-all" => bucket(Level::Junior, RemoteScope::Any),
            "junior-onsite" => bucket(Level::Junior, RemoteScope::Onsite),
            "junior-remote" => bucket(Level::Junior, RemoteScope::Remote),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Bucket { level, scope } => match (level, scope) {
                (Level::Senior, RemoteScope::Any) => "senior-all",
                (Level::Senior, RemoteScope::Onsite) => "senior-onsite",
                (Level::Senior, RemoteScope::Remote) => "senior-remote",
                (Level::MidLevel, RemoteScope::Any) => "mid-level-all",
                (Level::MidLevel, RemoteScope::Onsite) => "mid-level-onsite",
                (Level::MidLevel, RemoteScope::Remote) => "mid-level-remote",
                (Level::Junior, RemoteScope::Any) => "junior-all",
                (Level::Junior, RemoteScope::Onsite) => "junior-onsite",
                (Level::Junior, RemoteScope::Remote) => "junior-remote",
            },
        }
    }

    fn admits(&self, posting: &ClassifiedPosting) -> bool {
        match self {
            Category::All => true,
            Category::Bucket { level, scope } => {
                posting.level == *level && scope.admits(posting.is_remote)
            }
        }
    }
}

/// Counts for the nine level-by-remoteness buckets plus the total, always
/// computed over the time-filtered subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub total: usize,
    pub senior_all: usize,
    pub senior_onsite: usize,
    pub senior_remote: usize,
    pub mid_level_all: usize,
    pub mid_level_onsite: usize,
    pub mid_level_remote: usize,
    pub junior_all: usize,
    pub junior_onsite: usize,
    pub junior_remote: usize,
}

impl CategoryCounts {
    fn record(&mut self, posting: &ClassifiedPosting) {
        self.total += 1;
        match (posting.level, posting.is_remote) {
            (Level::Senior, true) => {
                self.senior_all += 1;
                self.senior_remote += 1;
            }
            (Level::Senior, false) => {
                self.senior_all += 1;
                self.senior_onsite += 1;
            }
            (Level::MidLevel, true) => {
                self.mid_level_all += 1;
                self.mid_level_remote += 1;
            }
            (Level::MidLevel, false) => {
                self.mid_level_all += 1;
                self.mid_level_onsite += 1;
            }
            (Level::Junior, true) => {
                self.junior_all += 1;
                self.junior_remote += 1;
            }
            (Level::Junior, false) => {
                self.junior_all += 1;
                self.junior_onsite += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterView {
    pub jobs: Vec<ClassifiedPosting>,
    pub counts: CategoryCounts,
}

/// Answer one `(window, category)` query. An empty listing is a normal
/// terminal state, not an error.
pub fn query(
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    window: TimeWindow,
    category: Option<Category>,
) -> FilterView {
    let mut counts = CategoryCounts::default();
    let mut jobs = Vec::new();
    let selector = category.unwrap_or(Category::All);

    for posting in &snapshot.jobs {
        if !window.admits(posting, now) {
            continue;
        }
        counts.record(posting);
        if selector.admits(posting) {
            jobs.push(posting.clone());
        }
    }

    FilterView { jobs, counts }
}
