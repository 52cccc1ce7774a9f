// src/ingest/transport.rs
//! Shared HTTP transport for all board providers: one pooled client with a
//! bounded timeout and an automatic retry/backoff policy for idempotent GET
//! failures.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const MAX_ATTEMPTS: u32 = 3;
pub const BACKOFF_BASE: Duration = Duration::from_millis(300);

pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("job-radar/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building http client")
}

/// GET `url` and decode the JSON body. Transport-level failures (connect,
/// timeout) are retried with exponential backoff; a non-2xx status or an
/// undecodable body is returned as an error without retrying, matching the
/// per-employer "no jobs" recovery upstream.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match client.get(url).query(query).send().await {
            Ok(resp) => {
                let status = resp.status();
                if !status.is_success() {
                    anyhow::bail!("GET {url}: status {status}");
                }
                return resp
                    .json::<T>()
                    .await
                    .with_context(|| format!("decoding body from {url}"));
            }
            Err(e) if attempt < MAX_ATTEMPTS => {
                let backoff = BACKOFF_BASE * 2u32.pow(attempt - 1);
                tracing::debug!(
                    error = ?e,
                    url,
                    attempt,
                    backoff_ms = backoff.as_millis() as u64,
                    "transport error; backing off"
                );
                tokio::time::sleep(backoff).await;
            }
            Err(e) => return Err(e).with_context(|| format!("GET {url}")),
        }
    }
}
