//! Common test utilities for pipeline integration tests
//!
//! Article fixtures, a progress sink that records every event, and
//! helpers for building contexts over in-memory or on-disk stores.

pub mod fixtures;
pub mod recording;

pub use fixtures::{article, election_client, sample_articles};
pub use recording::RecordingProgress;

use looksatwords::{OpenStore, PipelineContext, SqliteStore};
use std::path::Path;
use std::sync::Arc;

/// Context over a fresh in-memory store, discarding progress.
pub fn memory_context() -> PipelineContext {
    PipelineContext::with_store(Arc::new(SqliteStore::open_in_memory().unwrap()))
}

/// Context over an on-disk store, recording progress.
pub fn file_context(path: &Path) -> (PipelineContext, Arc<RecordingProgress>) {
    let progress = Arc::new(RecordingProgress::default());
    let store = SqliteStore::open(path).unwrap();
    (PipelineContext::new(Arc::new(store), progress.clone()), progress)
}
