/// Date-keyed cache of parsed readings on top of the document store
///
/// One document per date under `{namespace}:jftCache:{date}`. Entries are
/// never evicted; writing the same reading twice leaves the same document.

use std::sync::Arc;
use chrono::NaiveDate;

use crate::domain::Reading;
use crate::storage::{KeyValueStore, StorageError, StorageKeys};

#[derive(Clone)]
pub struct ReadingCache {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl ReadingCache {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Cached reading for `date`, `None` on a miss
    pub async fn get(&self, date: NaiveDate) -> Result<Option<Reading>, StorageError> {
        match self.store.get(&self.keys.reading(date)).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn put(&self, date: NaiveDate, reading: &Reading) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(reading)?;
        self.store.set(&self.keys.reading(date), &bytes).await
    }
}
