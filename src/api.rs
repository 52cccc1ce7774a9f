// src/api.rs
//! Dashboard-facing HTTP API. The presentation layer owns no classification
//! logic: it repeatedly calls `/jobs` with a (window, category) pair and
//! renders the returned listing and counts.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::filter::{self, Category, CategoryCounts, TimeWindow};
use crate::model::{ClassifiedPosting, SnapshotHandle};

#[derive(Clone)]
pub struct AppState {
    pub snapshot: SnapshotHandle,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/jobs", get(list_jobs))
        .route("/debug/snapshot", get(debug_snapshot))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct JobsQuery {
    #[serde(default)]
    window: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

#[derive(serde::Serialize)]
struct JobsResp {
    window: &'static str,
    category: &'static str,
    scraped_at: DateTime<Utc>,
    counts: CategoryCounts,
    jobs: Vec<ClassifiedPosting>,
}

async fn list_jobs(
    State(state): State<AppState>,
    Query(q): Query<JobsQuery>,
) -> Result<Json<JobsResp>, (StatusCode, String)> {
    let window = match q.window.as_deref() {
        None => TimeWindow::All,
        Some(s) => TimeWindow::parse(s)
            .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("unknown window '{s}'")))?,
    };
    let category = match q.category.as_deref() {
        None => None,
        Some(s) => Some(
            Category::parse(s)
                .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("unknown category '{s}'")))?,
        ),
    };

    let snapshot = state.snapshot.current();
    let view = filter::query(&snapshot, Utc::now(), window, category);

    Ok(Json(JobsResp {
        window: window.as_str(),
        category: category.map(|c| c.as_str()).unwrap_or("all"),
        scraped_at: snapshot.scraped_at,
        counts: view.counts,
        jobs: view.jobs,
    }))
}

#[derive(serde::Serialize)]
struct SnapshotInfo {
    scraped_at: DateTime<Utc>,
    age_secs: i64,
    jobs: usize,
}

async fn debug_snapshot(State(state): State<AppState>) -> Json<SnapshotInfo> {
    let snapshot = state.snapshot.current();
    Json(SnapshotInfo {
        scraped_at: snapshot.scraped_at,
        age_secs: (Utc::now() - snapshot.scraped_at).num_seconds(),
        jobs: snapshot.len(),
    })
}
