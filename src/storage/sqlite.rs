//! SQLite storage backend for the table store

use super::traits::{OpenStore, StorageError, StorageResult, TableStore, TableSummary};
use crate::model::Record;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed table store
///
/// Uses a single SQLite database file holding a table registry and one
/// shared rows table; each row is a JSON document tagged with its table
/// name. Assumes a single writer in a single process.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            -- Known tables, including empty ones
            CREATE TABLE IF NOT EXISTS tables (
                name TEXT PRIMARY KEY,
                created_at TEXT NOT NULL
            );

            -- Documents, in insertion order per table
            CREATE TABLE IF NOT EXISTS rows (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                table_name TEXT NOT NULL,
                doc_json TEXT NOT NULL,
                inserted_at TEXT NOT NULL,
                FOREIGN KEY (table_name) REFERENCES tables(name) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_rows_table
                ON rows(table_name, id);

            PRAGMA foreign_keys = ON;
            "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    fn register_table(conn: &Connection, table: &str) -> StorageResult<()> {
        conn.execute(
            "INSERT OR IGNORE INTO tables (name, created_at) VALUES (?1, ?2)",
            params![table, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Deserialize a stored document back into a record
    fn doc_to_record(table: &str, id: i64, doc_json: &str) -> StorageResult<Record> {
        match serde_json::from_str(doc_json)? {
            serde_json::Value::Object(record) => Ok(record),
            _ => Err(StorageError::NotAnObject {
                table: table.to_string(),
                id,
            }),
        }
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl TableStore for SqliteStore {
    fn load(&self, table: &str) -> StorageResult<Vec<Record>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, doc_json FROM rows WHERE table_name = ?1 ORDER BY id")?;
        let rows_iter = stmt.query_map(params![table], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows_iter {
            let (id, doc_json) = row?;
            records.push(Self::doc_to_record(table, id, &doc_json)?);
        }
        Ok(records)
    }

    fn insert(&self, table: &str, row: &Record) -> StorageResult<i64> {
        let conn = self.conn()?;
        Self::register_table(&conn, table)?;
        let doc_json = serde_json::to_string(row)?;

        conn.execute(
            "INSERT INTO rows (table_name, doc_json, inserted_at) VALUES (?1, ?2, ?3)",
            params![table, doc_json, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn clear(&self, table: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        Self::register_table(&conn, table)?;
        conn.execute("DELETE FROM rows WHERE table_name = ?1", params![table])?;
        Ok(())
    }

    fn tables(&self) -> StorageResult<Vec<TableSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT t.name, COUNT(r.id)
             FROM tables t LEFT JOIN rows r ON r.table_name = t.name
             GROUP BY t.name ORDER BY t.name",
        )?;
        let summaries = stmt
            .query_map([], |row| {
                Ok(TableSummary {
                    name: row.get(0)?,
                    rows: row.get::<_, i64>(1)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    fn record(value: serde_json::Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_save_then_load_keeps_columns_and_count() {
        let store = create_test_store();
        let rows = vec![
            record(json!({"headline": "a", "url": "u1"})),
            record(json!({"headline": "b", "url": "u2"})),
        ];

        assert_eq!(store.save("gnews_gatherer", &rows).unwrap(), 2);

        let loaded = store.load("gnews_gatherer").unwrap();
        assert_eq!(loaded.len(), 2);
        for row in &loaded {
            let mut keys: Vec<_> = row.keys().cloned().collect();
            keys.sort();
            assert_eq!(keys, vec!["headline", "url"]);
        }
    }

    #[test]
    fn test_save_appends_in_insertion_order() {
        let store = create_test_store();
        store.save("t", &[record(json!({"n": 1}))]).unwrap();
        store
            .save("t", &[record(json!({"n": 2})), record(json!({"n": 3}))])
            .unwrap();

        let loaded = store.load("t").unwrap();
        let ns: Vec<i64> = loaded.iter().map(|r| r["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![1, 2, 3]);
    }

    #[test]
    fn test_tables_are_isolated() {
        let store = create_test_store();
        store.insert("a", &record(json!({"x": 1}))).unwrap();
        store.insert("b", &record(json!({"x": 2}))).unwrap();

        assert_eq!(store.load("a").unwrap().len(), 1);
        assert_eq!(store.load("b").unwrap().len(), 1);
        assert!(store.load("missing").unwrap().is_empty());
    }

    #[test]
    fn test_clear_empties_one_table_and_keeps_it() {
        let store = create_test_store();
        store.insert("a", &record(json!({"x": 1}))).unwrap();
        store.insert("b", &record(json!({"x": 2}))).unwrap();

        store.clear("a").unwrap();

        assert!(store.load("a").unwrap().is_empty());
        assert_eq!(store.load("b").unwrap().len(), 1);
        assert_eq!(
            store.tables().unwrap(),
            vec![
                TableSummary { name: "a".into(), rows: 0 },
                TableSummary { name: "b".into(), rows: 1 },
            ]
        );
    }

    #[test]
    fn test_clear_unknown_table_creates_empty_table() {
        let store = create_test_store();
        store.clear("fresh").unwrap();
        assert_eq!(
            store.tables().unwrap(),
            vec![TableSummary { name: "fresh".into(), rows: 0 }]
        );
    }

    #[test]
    fn test_nested_values_survive() {
        let store = create_test_store();
        let row = record(json!({
            "publisher": {"title": "Example", "href": "https://example.com"},
            "score": 0.25
        }));
        store.insert("t", &row).unwrap();

        let loaded = store.load("t").unwrap();
        assert_eq!(loaded[0], row);
    }

    #[test]
    fn test_open_creates_file_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.db");
        assert!(!path.exists());

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert("t", &record(json!({"x": 1}))).unwrap();
        }
        assert!(path.exists());

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.load("t").unwrap().len(), 1);
    }
}
