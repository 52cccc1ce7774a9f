//! Job Radar — Binary Entrypoint
//! Runs one scrape→classify→dedup pass, persists the snapshot, optionally
//! keeps rescraping on an interval, and serves the dashboard API.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use job_radar::api::{self, AppState};
use job_radar::classify::Classifier;
use job_radar::ingest::{self, config as ingest_config, providers, scheduler, transport};
use job_radar::metrics::Metrics;
use job_radar::model::SnapshotHandle;
use job_radar::store;
use job_radar::taxonomy::Taxonomy;

const ENV_BIND_ADDR: &str = "BIND_ADDR";
const ENV_SNAPSHOT_DIR: &str = "SNAPSHOT_DIR";
const ENV_RESCRAPE_SECS: &str = "RESCRAPE_INTERVAL_SECS";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("job_radar=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();
    let metrics = Metrics::init();

    let taxonomy = Taxonomy::load_default().context("loading taxonomy config")?;
    let classifier = Arc::new(Classifier::new(taxonomy));

    let companies =
        ingest_config::load_company_list_default().context("loading company list")?;
    if companies.is_empty() {
        tracing::warn!("company list is empty; runs will find no jobs");
    }
    let hidden = ingest_config::load_hidden_jobs_default();

    let client = transport::build_client()?;
    let board_providers = providers::default_providers(client, classifier);

    let snapshot = ingest::run_once(&board_providers, &companies).await;
    let snapshot = ingest::apply_hidden_filter(snapshot, &hidden);

    let out_dir = PathBuf::from(
        std::env::var(ENV_SNAPSHOT_DIR).unwrap_or_else(|_| ".".to_string()),
    );
    if snapshot.is_empty() {
        tracing::info!("no jobs found");
    } else if let Err(e) = store::write_snapshot(&out_dir, &snapshot) {
        tracing::warn!(error = ?e, "failed to persist snapshot");
    }

    // An empty startup scrape falls back to the last persisted run.
    let handle = SnapshotHandle::new(store::boot_snapshot(&out_dir, snapshot));

    if let Some(interval_secs) = std::env::var(ENV_RESCRAPE_SECS)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        scheduler::spawn_rescrape(
            scheduler::RescrapeCfg { interval_secs },
            board_providers.clone(),
            companies.clone(),
            handle.clone(),
            out_dir.clone(),
        );
        tracing::info!(interval_secs, "rescrape scheduler started");
    }

    let app = api::router(AppState { snapshot: handle }).merge(metrics.router());

    let addr = std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "dashboard API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
