//! Article content simplification.
//!
//! Turns an arbitrary publisher page into a small, safe subset of HTML:
//!
//! ```text
//! fetch → locate content → drop denylist → images → links → unwrap → prune → serialize
//! ```
//!
//! [`ContentSimplifier::simplify`] never fails: any error is logged and
//! replaced by a placeholder linking back to the original article.

mod config;
pub mod dom;
pub mod passes;
pub mod resolve;

pub use config::SimplifierConfig;

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::app::{GleanerError, Result};
use crate::domain::ArticleEntry;
use crate::fetcher::PageFetcher;

pub struct ContentSimplifier {
    fetcher: Arc<dyn PageFetcher + Send + Sync>,
    config: SimplifierConfig,
    content_selectors: Vec<(String, Selector)>,
    remove_selectors: Vec<Selector>,
}

impl ContentSimplifier {
    /// Compile the configured selectors. Fails on any invalid selector.
    pub fn new(fetcher: Arc<dyn PageFetcher + Send + Sync>, config: SimplifierConfig) -> Result<Self> {
        let content_selectors = config
            .content_selectors
            .iter()
            .map(|s| parse_selector(s).map(|selector| (s.clone(), selector)))
            .collect::<Result<Vec<_>>>()?;

        let remove_selectors = config
            .remove_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fetcher,
            config,
            content_selectors,
            remove_selectors,
        })
    }

    /// Fetch `url` and return its simplified article body.
    ///
    /// Returns the placeholder document on any failure.
    pub async fn simplify(&self, url: &str) -> String {
        info!("Simplifying article {}", url);
        match self.try_simplify(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to simplify {}: {}", url, e);
                placeholder(url)
            }
        }
    }

    async fn try_simplify(&self, url: &str) -> Result<String> {
        let html = self.fetcher.fetch_page(url).await?;
        self.simplify_html(url, &html)
    }

    /// Run the pipeline on an already fetched page.
    ///
    /// `url` is the page's address, used to resolve root-relative URLs
    /// when no canonical origin is configured.
    pub fn simplify_html(&self, url: &str, html: &str) -> Result<String> {
        let origin = resolve::origin_for(url, self.config.canonical_origin.as_deref())?;
        let document = Html::parse_document(html);

        let (matched, region) = self
            .content_selectors
            .iter()
            .find_map(|(name, selector)| document.select(selector).next().map(|el| (name, el)))
            .ok_or_else(|| GleanerError::ContentNotFound(url.to_string()))?;
        debug!("Content region for {} matched {}", url, matched);

        let mut nodes = dom::collect_children(region, &self.remove_selectors);
        passes::normalize_images(&mut nodes, &origin);
        passes::normalize_links(&mut nodes, &origin);
        let mut nodes = passes::reduce_tags(nodes, &self.config);
        passes::prune_empty(&mut nodes);

        Ok(dom::serialize(&nodes))
    }

    /// Simplify several entries concurrently, returning `(entry id, html)`
    /// pairs in input order.
    pub async fn simplify_entries(
        &self,
        entries: &[ArticleEntry],
        concurrency: usize,
    ) -> Vec<(String, String)> {
        stream::iter(entries)
            .map(|entry| async move { (entry.id.clone(), self.simplify(&entry.link).await) })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| GleanerError::InvalidSelector(format!("{selector}: {e}")))
}

/// Fallback document shown when an article cannot be simplified.
pub fn placeholder(url: &str) -> String {
    format!(
        "<p>Sorry, the article content could not be loaded.</p>\
         <p>Original link: <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></p>",
        encode_double_quoted_attribute(url),
        encode_text(url)
    )
}
