/// Journal store: daily entries and app-level flags in one document
///
/// Reads fall back to an empty state when the document is absent or
/// unreadable. Every write is a read-modify-write of the whole document,
/// serialised through one lock so concurrent merges in this process never
/// lose each other's fields.

use std::sync::Arc;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::domain::{AppState, AppStateUpdate, DailyEntry, EntryUpdate, JournalSnapshot, StreakInfo};
use crate::storage::{KeyValueStore, StorageError, StorageKeys};

pub struct JournalStore {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    write_lock: Mutex<()>,
}

impl JournalStore {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self {
            store,
            keys,
            write_lock: Mutex::new(()),
        }
    }

    /// Current application state, or defaults if it cannot be read
    pub async fn app_state(&self) -> AppState {
        match self.load().await {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to read app state, using defaults: {}", e);
                AppState::default()
            }
        }
    }

    /// Entry for `date`, if one has been written
    pub async fn get_entry(&self, date: NaiveDate) -> Option<DailyEntry> {
        self.app_state().await.entries.remove(&date)
    }

    /// Every entry, keyed by date
    pub async fn get_all(&self) -> JournalSnapshot {
        self.app_state().await.entries
    }

    /// Entries with any content, newest first
    pub async fn history(&self) -> Vec<DailyEntry> {
        self.app_state().await.history()
    }

    /// Streak statistics as of `today`
    pub async fn streak_info(&self, today: NaiveDate) -> StreakInfo {
        StreakInfo::calculate(&self.get_all().await, today)
    }

    /// Merge a partial update into the entry for `date`, creating it if needed
    ///
    /// Returns the merged entry. If the stored document cannot be read the
    /// merge is abandoned rather than overwriting it with defaults.
    pub async fn merge_entry(&self, date: NaiveDate, update: EntryUpdate) -> Result<DailyEntry, StorageError> {
        let _guard = self.write_lock.lock().await;

        let result = async {
            let mut state = self.load().await?;
            let entry = state
                .entries
                .entry(date)
                .or_insert_with(|| DailyEntry::new(date));
            entry.merge(update);
            let merged = entry.clone();
            self.save(&state).await?;
            Ok::<_, StorageError>(merged)
        }
        .await;

        match &result {
            Ok(_) => debug!("Saved journal entry for {}", date),
            Err(e) => error!("Failed to save journal entry for {}: {}", date, e),
        }
        result
    }

    /// Merge app-level flags; entries are left untouched
    pub async fn update_app_state(&self, update: AppStateUpdate) -> Result<AppState, StorageError> {
        let _guard = self.write_lock.lock().await;

        let result = async {
            let mut state = self.load().await?;
            state.apply(update);
            self.save(&state).await?;
            Ok::<_, StorageError>(state)
        }
        .await;

        if let Err(e) = &result {
            error!("Failed to save app state: {}", e);
        }
        result
    }

    /// Stored state; an absent document is a first run
    async fn load(&self) -> Result<AppState, StorageError> {
        match self.store.get(&self.keys.app_state()).await? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(AppState::default()),
        }
    }

    async fn save(&self, state: &AppState) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(state)?;
        self.store.set(&self.keys.app_state(), &bytes).await
    }
}
