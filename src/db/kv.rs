//! Key-value slots: the single persistence seam for the widget collection.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use rusqlite::{OptionalExtension, params};
use std::collections::HashMap;

/// Default key holding the JSON widget array.
pub const WIDGETS_KEY: &str = "customWidgets";

pub trait KeyValueSlot {
    /// `Ok(None)` when the key was never written.
    fn read(&self, key: &str) -> AppResult<Option<String>>;

    /// Overwrite the whole value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// Slot backed by the `kv` table of the SQLite database.
pub struct SqliteSlot {
    pool: DbPool,
}

impl SqliteSlot {
    /// Wrap an already initialized pool (see `db::initialize::init_db`).
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl KeyValueSlot for SqliteSlot {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT value FROM kv WHERE key = ?1")?;
        let value = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        let mut stmt = self.pool.conn.prepare_cached(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ','now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![key, value])?;
        Ok(())
    }
}

/// In-memory slot. `fail_writes` makes every write fail, to exercise
/// the storage-error path.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    values: HashMap<String, String>,
    pub writes: usize,
    pub fail_writes: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut slot = Self::default();
        slot.values.insert(key.to_string(), value.to_string());
        slot
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Storage(format!("write to '{key}' rejected")));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
