/// Orchestration of the daily reading pipeline
///
/// cache lookup -> network GET -> parse -> cache write. The public entry
/// point never fails: every error is logged and surfaces as `None`, leaving
/// retries to the caller.

use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::content::{ContentSource, PageLayout, ReadingCache, ReadingParser};
use crate::domain::{dates, Reading};

pub struct ContentFetcher {
    source: Arc<dyn ContentSource>,
    cache: ReadingCache,
    parser: Box<dyn ReadingParser>,
}

impl ContentFetcher {
    /// Fetcher for the current page layout
    pub fn new(source: Arc<dyn ContentSource>, cache: ReadingCache) -> Self {
        Self {
            source,
            cache,
            parser: PageLayout::Current.parser(),
        }
    }

    /// Swap the page parser
    pub fn with_parser(mut self, parser: Box<dyn ReadingParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn cache(&self) -> &ReadingCache {
        &self.cache
    }

    /// Reading for `date` (today when `None`), or `None` if it cannot be had
    ///
    /// A cached reading is returned without touching the network. On a miss
    /// the page is fetched once and parsed; only a successful parse is
    /// cached, and a failed cache write does not discard the reading.
    pub async fn fetch_reading(&self, date: Option<NaiveDate>) -> Option<Reading> {
        let target = date.unwrap_or_else(dates::today);

        match self.cache.get(target).await {
            Ok(Some(reading)) => {
                debug!("Using cached reading for {}", target);
                return Some(reading);
            }
            Ok(None) => {}
            Err(e) => warn!("Reading cache lookup failed for {}, fetching instead: {}", target, e),
        }

        info!("Fetching reading from content source for {}", target);
        let html = match self.source.fetch_page().await {
            Ok(html) => html,
            Err(e) if e.is_timeout() => {
                warn!("Timed out fetching reading for {}: {}", target, e);
                return None;
            }
            Err(e) => {
                warn!("Failed to fetch reading for {}: {}", target, e);
                return None;
            }
        };

        let reading = match self.parser.parse(&html, target) {
            Ok(reading) => reading,
            Err(e) => {
                warn!("Discarding page for {}: {}", target, e);
                return None;
            }
        };

        if let Err(e) = self.cache.put(target, &reading).await {
            error!("Failed to cache reading for {}: {}", target, e);
        }

        Some(reading)
    }
}
