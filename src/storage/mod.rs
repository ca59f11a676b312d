//! Tabular document store
//!
//! Rows live in named, append-only tables inside one local store file,
//! reached through the `TableStore` trait. The primary implementation is
//! `SqliteStore`.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{OpenStore, StorageError, StorageResult, TableStore, TableSummary};
