use std::sync::Arc;

use crate::app::error::Result;
use crate::cache::FeedCache;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::{FeedSource, PageFetcher};
use crate::simplifier::ContentSimplifier;

pub struct AppContext {
    pub config: Config,
    pub cache: Arc<FeedCache>,
    pub simplifier: Arc<ContentSimplifier>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config.http)?);
        Self::with_fetchers(config, fetcher.clone(), fetcher)
    }

    /// Build a context around caller-supplied feed and page fetchers
    pub fn with_fetchers(
        config: Config,
        source: Arc<dyn FeedSource + Send + Sync>,
        pages: Arc<dyn PageFetcher + Send + Sync>,
    ) -> Result<Self> {
        let cache = Arc::new(FeedCache::new(source, config.feed.clone()));
        let simplifier = Arc::new(ContentSimplifier::new(pages, config.simplifier.clone())?);

        Ok(Self {
            config,
            cache,
            simplifier,
        })
    }
}
