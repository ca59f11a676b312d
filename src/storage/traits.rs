//! Storage trait definitions

use crate::model::Record;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {id} in table '{table}' is not a JSON object")]
    NotAnObject { table: String, id: i64 },

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Name and size of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
}

/// Trait for tabular store backends
///
/// Tables are append-only: rows are only ever inserted, and the only way
/// to remove them is `clear`, which empties the whole table. No guarantee
/// is made across rows: a failure in the middle of `save` leaves the rows
/// inserted so far in place.
pub trait TableStore: Send + Sync {
    /// All rows of a table in insertion order (empty if the table is unknown)
    fn load(&self, table: &str) -> StorageResult<Vec<Record>>;

    /// Append one row, returning its document id
    fn insert(&self, table: &str, row: &Record) -> StorageResult<i64>;

    /// Append every row individually, returning how many were written
    fn save(&self, table: &str, rows: &[Record]) -> StorageResult<usize> {
        for row in rows {
            self.insert(table, row)?;
        }
        Ok(rows.len())
    }

    /// Replace a table with an empty one
    fn clear(&self, table: &str) -> StorageResult<()>;

    /// Every known table with its row count, ordered by name
    fn tables(&self) -> StorageResult<Vec<TableSummary>>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: TableStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
