pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::RawEntry;

/// Fetches a feed and parses it into raw entries.
#[async_trait]
pub trait FeedSource {
    async fn fetch_feed(&self, feed_url: &str) -> Result<Vec<RawEntry>>;
}

/// Fetches the raw HTML of an article page.
///
/// Fails on transport errors, timeouts and non-2xx responses.
#[async_trait]
pub trait PageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}
