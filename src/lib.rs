// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod classify;
pub mod filter;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod store;
pub mod taxonomy;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::classify::{Classification, Classifier, Level};
pub use crate::model::{ClassifiedPosting, Snapshot, SnapshotHandle, Source};
pub use crate::taxonomy::Taxonomy;
