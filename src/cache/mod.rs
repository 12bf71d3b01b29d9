//! Time-windowed cache of feed entries with stale-on-error fallback.
//!
//! ```text
//! Empty --fetch ok--> Fresh --ttl elapsed--> Stale --fetch ok--> Fresh
//! Stale --fetch failed--> Stale (served as-is)
//! Empty --fetch failed--> Empty (FeedUnavailable)
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::app::{GleanerError, Result};
use crate::config::FeedConfig;
use crate::domain::{ArticleEntry, Snapshot};
use crate::fetcher::FeedSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Fresh,
    Stale,
}

pub struct FeedCache {
    source: Arc<dyn FeedSource + Send + Sync>,
    config: FeedConfig,
    // Held across refreshes so only one upstream fetch is ever in flight.
    snapshot: Mutex<Option<Snapshot>>,
}

impl FeedCache {
    pub fn new(source: Arc<dyn FeedSource + Send + Sync>, config: FeedConfig) -> Self {
        Self {
            source,
            config,
            snapshot: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl()
    }

    /// Current entries: cached while fresh, refetched once stale.
    ///
    /// A failed refetch serves the previous snapshot untouched. Fails with
    /// [`GleanerError::FeedUnavailable`] only when nothing was ever fetched.
    pub async fn entries(&self) -> Result<Arc<Vec<ArticleEntry>>> {
        let mut guard = self.snapshot.lock().await;

        if let Some(snapshot) = guard.as_ref() {
            if snapshot.is_fresh(self.ttl()) {
                debug!("Serving cached feed ({:?} old)", snapshot.age());
                return Ok(snapshot.entries.clone());
            }
        }

        info!("Fetching feed {}", self.config.url);
        match self.fetch().await {
            Ok(entries) => {
                info!("Fetched {} entries", entries.len());
                let snapshot = Snapshot::new(entries);
                let entries = snapshot.entries.clone();
                *guard = Some(snapshot);
                Ok(entries)
            }
            Err(e) => match guard.as_ref() {
                Some(snapshot) => {
                    warn!("Feed refresh failed, serving stale entries: {}", e);
                    Ok(snapshot.entries.clone())
                }
                None => {
                    error!("Feed refresh failed with nothing cached: {}", e);
                    Err(GleanerError::FeedUnavailable(e.to_string()))
                }
            },
        }
    }

    async fn fetch(&self) -> Result<Vec<ArticleEntry>> {
        let raw = self.source.fetch_feed(&self.config.url).await?;
        if raw.is_empty() {
            return Err(GleanerError::FeedParse("feed contains no entries".into()));
        }

        Ok(raw
            .into_iter()
            .map(|r| ArticleEntry::from_raw(r, &self.config.default_author))
            .collect())
    }

    /// Look up an entry by id, refreshing first if the cache is stale.
    pub async fn find(&self, id: &str) -> Result<ArticleEntry> {
        self.entries()
            .await?
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| GleanerError::EntryNotFound(id.to_string()))
    }

    /// Drop the snapshot so the next read refetches. Idempotent.
    pub async fn clear(&self) {
        self.snapshot.lock().await.take();
        info!("Feed cache cleared");
    }

    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot.lock().await.clone()
    }

    pub async fn state(&self) -> CacheState {
        match self.snapshot.lock().await.as_ref() {
            None => CacheState::Empty,
            Some(s) if s.is_fresh(self.ttl()) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawEntry;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use tokio_test::{assert_err, assert_ok};

    /// Replays scripted responses; repeats the last one when exhausted.
    struct ScriptedSource {
        responses: StdMutex<VecDeque<Option<Vec<&'static str>>>>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Option<Vec<&'static str>>>) -> Arc<Self> {
            Arc::new(Self {
                responses: StdMutex::new(responses.into()),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            })
        }

        fn slow(responses: Vec<Option<Vec<&'static str>>>, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                responses: StdMutex::new(responses.into()),
                calls: AtomicUsize::new(0),
                delay,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FeedSource for ScriptedSource {
        async fn fetch_feed(&self, _feed_url: &str) -> Result<Vec<RawEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let next = {
                let mut responses = self.responses.lock().unwrap();
                if responses.len() > 1 {
                    responses.pop_front().flatten()
                } else {
                    responses.front().cloned().flatten()
                }
            };

            match next {
                Some(links) => Ok(links
                    .into_iter()
                    .map(|link| RawEntry {
                        title: format!("title {link}"),
                        link: link.to_string(),
                        ..Default::default()
                    })
                    .collect()),
                None => Err(GleanerError::Fetch("connection refused".into())),
            }
        }
    }

    fn cache(source: Arc<ScriptedSource>) -> FeedCache {
        FeedCache::new(source, FeedConfig::default())
    }

    fn links(entries: &[ArticleEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.link.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_read_within_ttl_is_cache_hit() {
        let source = ScriptedSource::new(vec![Some(vec!["https://a", "https://b"])]);
        let cache = cache(source.clone());

        let first = assert_ok!(cache.entries().await);
        tokio::time::advance(Duration::from_secs(299)).await;
        let second = assert_ok!(cache.entries().await);

        assert_eq!(source.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.state().await, CacheState::Fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetches_after_ttl() {
        let source = ScriptedSource::new(vec![
            Some(vec!["https://a"]),
            Some(vec!["https://b", "https://c"]),
        ]);
        let cache = cache(source.clone());

        assert_ok!(cache.entries().await);
        tokio::time::advance(Duration::from_secs(301)).await;
        assert_eq!(cache.state().await, CacheState::Stale);

        let entries = assert_ok!(cache.entries().await);
        assert_eq!(source.calls(), 2);
        assert_eq!(links(&entries), vec!["https://b", "https://c"]);
        assert_eq!(cache.state().await, CacheState::Fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_serves_stale_snapshot() {
        let source = ScriptedSource::new(vec![Some(vec!["https://a", "https://b"]), None]);
        let cache = cache(source.clone());

        let first = assert_ok!(cache.entries().await);
        let captured_at = cache.snapshot().await.unwrap().captured_at;
        tokio::time::advance(Duration::from_secs(301)).await;

        let second = assert_ok!(cache.entries().await);
        assert_eq!(source.calls(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(links(&second), vec!["https://a", "https://b"]);

        // Timestamp is left alone, so the next read tries again.
        assert_eq!(cache.snapshot().await.unwrap().captured_at, captured_at);
        assert_eq!(cache.state().await, CacheState::Stale);
        assert_ok!(cache.entries().await);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_cold_start_failure_is_feed_unavailable() {
        let source = ScriptedSource::new(vec![None]);
        let cache = cache(source.clone());

        let err = assert_err!(cache.entries().await);
        assert!(matches!(err, GleanerError::FeedUnavailable(_)));
        assert_eq!(cache.state().await, CacheState::Empty);
    }

    #[tokio::test]
    async fn test_empty_feed_counts_as_failure() {
        let source = ScriptedSource::new(vec![Some(vec![])]);
        let cache = cache(source);

        let err = assert_err!(cache.entries().await);
        assert!(matches!(err, GleanerError::FeedUnavailable(_)));
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let source = ScriptedSource::new(vec![Some(vec!["https://a"])]);
        let cache = cache(source.clone());

        assert_ok!(cache.entries().await);
        cache.clear().await;
        cache.clear().await;
        assert_eq!(cache.state().await, CacheState::Empty);

        assert_ok!(cache.entries().await);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_then_failure_is_feed_unavailable() {
        let source = ScriptedSource::new(vec![Some(vec!["https://a"]), None]);
        let cache = cache(source);

        assert_ok!(cache.entries().await);
        cache.clear().await;
        let err = assert_err!(cache.entries().await);
        assert!(matches!(err, GleanerError::FeedUnavailable(_)));
    }

    #[tokio::test]
    async fn test_entries_get_ids_and_default_author() {
        let source = ScriptedSource::new(vec![Some(vec!["https://a"])]);
        let cache = cache(source);

        let entries = assert_ok!(cache.entries().await);
        assert_eq!(entries[0].id, ArticleEntry::generate_id("https://a"));
        assert_eq!(entries[0].author, "IT之家");
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let source = ScriptedSource::new(vec![Some(vec!["https://a", "https://b"])]);
        let cache = cache(source);

        let id = ArticleEntry::generate_id("https://b");
        let entry = assert_ok!(cache.find(&id).await);
        assert_eq!(entry.link, "https://b");

        let err = assert_err!(cache.find("missing").await);
        assert!(matches!(err, GleanerError::EntryNotFound(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_reads_share_one_fetch() {
        let source =
            ScriptedSource::slow(vec![Some(vec!["https://a"])], Duration::from_millis(50));
        let cache = Arc::new(cache(source.clone()));

        let (a, b) = tokio::join!(cache.entries(), cache.entries());
        let (a, b) = (assert_ok!(a), assert_ok!(b));

        assert_eq!(source.calls(), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
