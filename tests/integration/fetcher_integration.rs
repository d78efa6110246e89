/// Content fetcher tests against a mock HTTP content page
use soulboost_core::*;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

const PAGE: &str = r#"<html><body><table>
<tr><td align="center"><h2>October 18, 2026</h2></td></tr>
<tr><td align="center"><h1>Surrender</h1></td></tr>
<tr><td align="left">"<i>Surrender means letting go.</i>"</td></tr>
<tr><td align="center">Basic Text p. 57</td></tr>
<tr><td align="left">We came to believe.<br><br>Today we try again.<br><br><b>Just for Today: </b>I will let go.<br><br></td></tr>
</table></body></html>"#;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn fetcher_for(url: String, store: Arc<dyn KeyValueStore>) -> ContentFetcher {
    let source = HttpContentSource::new(url, "SoulBoost/1.0", Duration::from_secs(5))
        .expect("Failed to build client");
    ContentFetcher::new(Arc::new(source), ReadingCache::new(store, StorageKeys::default()))
}

/// Store whose writes always fail
struct ReadOnlyStore;

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".to_string()))
    }
}

#[cfg(test)]
mod fetcher_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_parses_and_caches_once() {
        init_tracing(true);
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jft/")
            .match_header("user-agent", "SoulBoost/1.0")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(PAGE)
            .expect(1)
            .create_async()
            .await;

        let store = Arc::new(MemoryStore::new());
        let fetcher = fetcher_for(format!("{}/jft/", server.url()), store.clone());

        let first = fetcher.fetch_reading(Some(date())).await.expect("reading");
        let second = fetcher.fetch_reading(Some(date())).await.expect("cached reading");

        mock.assert_async().await;
        assert_eq!(first, second);
        assert_eq!(first.title, "Surrender");
        assert_eq!(first.quote, "Surrender means letting go.");
        assert_eq!(first.reference, "Basic Text p. 57");
        assert_eq!(first.full_content, "We came to believe.\n\nToday we try again.");
        assert_eq!(first.just_for_today, "I will let go.");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_error_status_yields_none_and_skips_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jft/")
            .with_status(503)
            .with_body(PAGE)
            .expect(2)
            .create_async()
            .await;

        let store = Arc::new(MemoryStore::new());
        let fetcher = fetcher_for(format!("{}/jft/", server.url()), store.clone());

        assert!(fetcher.fetch_reading(Some(date())).await.is_none());
        assert!(fetcher.fetch_reading(Some(date())).await.is_none());

        mock.assert_async().await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unparseable_page_yields_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jft/")
            .with_status(200)
            .with_body("<html><body>Site maintenance</body></html>")
            .create_async()
            .await;

        let store = Arc::new(MemoryStore::new());
        let fetcher = fetcher_for(format!("{}/jft/", server.url()), store.clone());

        assert!(fetcher.fetch_reading(Some(date())).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_write_failure_still_returns_reading() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jft/")
            .with_status(200)
            .with_body(PAGE)
            .create_async()
            .await;

        let fetcher = fetcher_for(format!("{}/jft/", server.url()), Arc::new(ReadOnlyStore));
        let reading = fetcher.fetch_reading(Some(date())).await;
        assert_eq!(reading.map(|r| r.title), Some("Surrender".to_string()));
    }

    #[tokio::test]
    async fn test_facade_uses_configured_source() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jft/")
            .with_status(200)
            .with_body(PAGE)
            .expect(1)
            .create_async()
            .await;

        let config = AppConfig::default().with_content_url(format!("{}/jft/", server.url()));
        let source = Arc::new(HttpContentSource::from_config(&config).unwrap());
        let core = SoulBoost::with_parts(&config, Arc::new(MemoryStore::new()), source);

        let reading = core.fetch_reading(Some(date())).await.expect("reading");
        core.journal()
            .merge_entry(date(), EntryUpdate::new().reading(reading.clone()))
            .await
            .unwrap();

        assert!(core.fetch_reading(Some(date())).await.is_some());
        mock.assert_async().await;
        let entry = core.journal().get_entry(date()).await.unwrap();
        assert_eq!(entry.reading, Some(reading));
    }
}
