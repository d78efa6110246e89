/// SQLite implementation of the key-value document store
///
/// Documents live in one table keyed by their namespaced string key. The
/// connection sits behind a mutex so the store can be shared across tasks;
/// every statement is short, so the lock is never held across an await.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::{migrations, KeyValueStore, StorageError};

/// SQLite-based document store
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database file and run pending migrations
    pub fn open(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite store initialized at: {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(db_path),
        })
    }

    /// An in-memory database, discarded when the store is dropped
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        migrations::initialize_database(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Location of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Connection("connection lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let conn = self.connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM documents WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;

        tracing::debug!("Read document {} ({})", key, if value.is_some() { "hit" } else { "absent" });
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO documents (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now()],
        )?;

        tracing::debug!("Wrote document {} ({} bytes)", key, value.len());
        Ok(())
    }
}
