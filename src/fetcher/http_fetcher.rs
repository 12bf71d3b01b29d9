use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::app::Result;
use crate::config::HttpConfig;
use crate::domain::RawEntry;
use crate::fetcher::{FeedSource, PageFetcher};
use crate::normalizer::Normalizer;

pub struct HttpFetcher {
    client: Client,
    normalizer: Normalizer,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            normalizer: Normalizer::new(),
        })
    }

    /// GET `url`; a non-2xx status is an error
    async fn get(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;
        Ok(response.error_for_status()?)
    }
}

#[async_trait]
impl FeedSource for HttpFetcher {
    async fn fetch_feed(&self, feed_url: &str) -> Result<Vec<RawEntry>> {
        let body = self.get(feed_url).await?.bytes().await?;
        self.normalizer.normalize(&body)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        Ok(self.get(url).await?.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::GleanerError;

    #[test]
    fn test_builds_with_default_config() {
        assert!(HttpFetcher::new(&HttpConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_fetch_failure() {
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        let result = fetcher.fetch_page("not a url").await;
        assert!(matches!(result, Err(GleanerError::Http(_))));
    }

    #[tokio::test]
    async fn test_get_rejects_invalid_url() {
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        assert!(matches!(
            fetcher.get("not a url").await,
            Err(GleanerError::Http(_))
        ));
        assert!(matches!(
            fetcher.fetch_feed("not a url").await,
            Err(GleanerError::Http(_))
        ));
    }
}
