// 🗄️ Local Key-Value Store
// Flat string storage for the two persisted keys (`expenses`, `budget`).
// Whole values are read and written back; last write wins.

use crate::error::TrackerResult;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

/// Key holding the JSON array of expense records
pub const EXPENSES_KEY: &str = "expenses";

/// Key holding the bare numeric budget string
pub const BUDGET_KEY: &str = "budget";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> TrackerResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> TrackerResult<()>;
    fn remove(&mut self, key: &str) -> TrackerResult<()>;
}

// ============================================================================
// SQLITE STORE
// ============================================================================

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> TrackerResult<Self> {
        let conn = Connection::open(path)?;
        setup_database(&conn)?;
        tracing::debug!(path = %path.display(), "opened key-value store");
        Ok(SqliteStore { conn })
    }

    pub fn open_in_memory() -> TrackerResult<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(SqliteStore { conn })
    }
}

pub fn setup_database(conn: &Connection) -> TrackerResult<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> TrackerResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> TrackerResult<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> TrackerResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> TrackerResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> TrackerResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_set_get_overwrite() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        assert_eq!(store.get(BUDGET_KEY).unwrap(), None);

        store.set(BUDGET_KEY, "100").unwrap();
        store.set(BUDGET_KEY, "250.5").unwrap();

        assert_eq!(store.get(BUDGET_KEY).unwrap().as_deref(), Some("250.5"));
        // Overwrite replaces the row
        let rows: i64 = store
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);

        store.remove(BUDGET_KEY).unwrap();
        assert_eq!(store.get(BUDGET_KEY).unwrap(), None);
    }

    #[test]
    fn test_sqlite_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.set(EXPENSES_KEY, "[]").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get(EXPENSES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }
}
