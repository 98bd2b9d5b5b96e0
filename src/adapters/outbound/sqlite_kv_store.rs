//! SQLite Key-Value Store
//!
//! Implements KeyValueStore on a SQLite file so the active proxy survives
//! a restart of the console.

use crate::domain::ports::KeyValueStore;
use anyhow::Result;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed key-value store.
///
/// Each operation opens its own connection on a blocking thread.
pub struct SqliteKeyValueStore {
    db_path: String,
}

impl SqliteKeyValueStore {
    /// Open (and create if needed) the store at `db_path`.
    pub fn open(db_path: impl Into<String>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = Connection::open(&db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS console_kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        tracing::info!("key-value store opened at {}", db_path);

        Ok(Self { db_path })
    }

    fn read_value(db_path: &str, key: &str) -> Result<Option<String>> {
        let conn = Connection::open(db_path)?;
        let value = conn
            .query_row(
                "SELECT value FROM console_kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_value(db_path: &str, key: &str, value: &str) -> Result<()> {
        let conn = Connection::open(db_path)?;
        conn.execute(
            "INSERT INTO console_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Option<String> {
        let db_path = self.db_path.clone();
        let key = key.to_string();

        match tokio::task::spawn_blocking(move || Self::read_value(&db_path, &key)).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                tracing::error!("error reading key-value store: {:?}", e);
                None
            }
            Err(e) => {
                tracing::error!("spawn_blocking error: {:?}", e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) {
        let db_path = self.db_path.clone();
        let key = key.to_string();
        let value = value.to_string();

        match tokio::task::spawn_blocking(move || Self::write_value(&db_path, &key, &value)).await
        {
            Ok(Ok(())) => tracing::debug!("key-value store updated"),
            Ok(Err(e)) => tracing::error!("error writing key-value store: {:?}", e),
            Err(e) => tracing::error!("spawn_blocking error: {:?}", e),
        }
    }
}
