use crate::model::Record;
use crate::progress::{NoopProgress, ProgressSink, ProgressTask};
use crate::storage::{StorageError, TableStore};
use std::sync::Arc;

/// Handles passed down to every stage.
#[derive(Clone)]
pub struct PipelineContext {
    store: Arc<dyn TableStore>,
    progress: Arc<dyn ProgressSink>,
}

impl PipelineContext {
    pub fn new(store: Arc<dyn TableStore>, progress: Arc<dyn ProgressSink>) -> Self {
        Self { store, progress }
    }

    /// Context that discards progress events.
    pub fn with_store(store: Arc<dyn TableStore>) -> Self {
        Self::new(store, Arc::new(NoopProgress))
    }

    pub fn store(&self) -> &dyn TableStore {
        self.store.as_ref()
    }

    pub fn progress(&self) -> &dyn ProgressSink {
        self.progress.as_ref()
    }

    /// Append records to a table one at a time, reporting progress.
    ///
    /// A failure part-way leaves the rows inserted so far in place.
    pub fn save(&self, table: &str, records: &[Record]) -> Result<usize, StorageError> {
        let task = ProgressTask::start(self.progress(), format!("save {}", table), records.len() as u64);
        for record in records {
            self.store.insert(table, record)?;
            task.advance();
        }
        task.finish();
        tracing::info!(table, rows = records.len(), "saved rows");
        Ok(records.len())
    }
}
