/// Public library interface for the SoulBoost journaling core
///
/// This crate covers the two parts of the journal with real logic behind
/// them: the daily reading pipeline (fetch the page, parse it, cache it) and
/// the streak engine over the user's date-keyed journal. [`SoulBoost`] wires
/// both to one persistent store.

use std::sync::Arc;
use chrono::NaiveDate;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// Internal modules
pub mod config;
pub mod content;
pub mod domain;
pub mod journal;
pub mod storage;

// Re-export public modules and types
pub use config::AppConfig;
pub use content::{
    ContentFetcher, ContentSource, FetchError, HttpContentSource, MarkerParser, PageLayout,
    ReadingCache, ReadingParser, TableCellParser, Unparseable,
};
pub use domain::*;
pub use journal::JournalStore;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError, StorageKeys};

/// Errors that can occur while setting up the core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Content source error: {0}")]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install a stderr `tracing` subscriber filtered to this crate
///
/// `RUST_LOG` wins when set; otherwise logs at `warn`, or `debug` when
/// `verbose`. Does nothing if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) {
    let directives = log_directives(std::env::var(EnvFilter::DEFAULT_ENV).ok(), verbose);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .try_init();
}

fn log_directives(from_env: Option<String>, verbose: bool) -> String {
    match from_env {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => format!("soulboost_core={}", if verbose { "debug" } else { "warn" }),
    }
}

/// The journaling core: one store shared by the journal and the reading cache
pub struct SoulBoost {
    journal: JournalStore,
    fetcher: ContentFetcher,
}

impl SoulBoost {
    /// Open the SQLite store named by the configuration and connect to the
    /// configured content page
    pub fn open(config: &AppConfig) -> Result<Self, CoreError> {
        let db_path = config.resolve_database_path()?;
        tracing::info!("Initializing SoulBoost core with database: {:?}", db_path);

        let store = Arc::new(SqliteStore::open(db_path)?);
        let source = Arc::new(HttpContentSource::from_config(config)?);
        Ok(Self::with_parts(config, store, source))
    }

    /// Assemble the core from an existing store and content source
    pub fn with_parts(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn ContentSource>,
    ) -> Self {
        let keys = StorageKeys::new(config.namespace.clone());
        let cache = ReadingCache::new(store.clone(), keys.clone());
        let fetcher = ContentFetcher::new(source, cache).with_parser(config.page_layout.parser());

        Self {
            journal: JournalStore::new(store, keys),
            fetcher,
        }
    }

    pub fn journal(&self) -> &JournalStore {
        &self.journal
    }

    pub fn fetcher(&self) -> &ContentFetcher {
        &self.fetcher
    }

    /// Reading for `date` (today when `None`); `None` when unavailable
    pub async fn fetch_reading(&self, date: Option<NaiveDate>) -> Option<Reading> {
        self.fetcher.fetch_reading(date).await
    }

    /// Streak statistics as of today
    pub async fn streak_info(&self) -> StreakInfo {
        self.journal.streak_info(dates::today()).await
    }
}
