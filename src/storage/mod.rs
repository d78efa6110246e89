/// Storage layer for persisting journal documents
///
/// This module defines the key-value document store the rest of the crate
/// reads and writes whole JSON documents through, the namespaced key layout,
/// and the SQLite and in-memory implementations.

pub mod sqlite;
pub mod migrations;
pub mod memory;

// Re-export the main storage types
pub use sqlite::*;
pub use memory::*;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::dates;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the persistent key-value store
///
/// Values are opaque bytes (whole JSON documents). An absent key is
/// `Ok(None)`, never an error. A single `set` is atomic per key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the document stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the document stored under `key`
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

/// Default namespace prefix for every key this crate writes
pub const DEFAULT_NAMESPACE: &str = "@SoulBoost";

/// Namespaced key layout for the two logical documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self { namespace: namespace.into() }
    }

    /// Key of the application-state document (journal + flags)
    pub fn app_state(&self) -> String {
        format!("{}:appState", self.namespace)
    }

    /// Key of the cached reading for a date
    pub fn reading(&self, date: NaiveDate) -> String {
        format!("{}:jftCache:{}", self.namespace, dates::to_iso(date))
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}
