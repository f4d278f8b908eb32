//! String key-value store on top of the `kv` table.
//!
//! Both the persisted session and the whole fallback dataset live here,
//! each serialized as JSON under one fixed key.

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub struct KvStore {
    pool: DbPool,
}

impl KvStore {
    /// `pool` must already be migrated.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .pool
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let now = Local::now().to_rfc3339();
        self.pool.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// Returns true when a value was removed.
    pub fn remove(&self, key: &str) -> AppResult<bool> {
        let n = self.pool.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(n > 0)
    }

    /// Stored JSON decoded as `T`.
    ///
    /// Unparseable content is reported as `Ok(None)` so callers can fall
    /// back to defaults.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable stored value");
                Ok(None)
            }
        }
    }

    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.put(key, &raw)
    }

    /// Underlying connection, for the internal log.
    pub fn conn(&self) -> &rusqlite::Connection {
        &self.pool.conn
    }
}
