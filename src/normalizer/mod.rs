use feed_rs::parser;
use html_escape::decode_html_entities;
use scraper::Html;

use crate::app::{GleanerError, Result};
use crate::domain::RawEntry;

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse RSS/Atom/JSON Feed bytes into raw entries, in feed order.
    ///
    /// Entries without a link are dropped since the link is their identity.
    /// A feed that yields no usable entries is treated as malformed.
    pub fn normalize(&self, body: &[u8]) -> Result<Vec<RawEntry>> {
        let feed = parser::parse(body).map_err(|e| GleanerError::FeedParse(e.to_string()))?;

        let entries: Vec<RawEntry> = feed
            .entries
            .into_iter()
            .filter_map(|entry| {
                let Some(link) = entry.links.first().map(|l| l.href.clone()) else {
                    tracing::debug!("Skipping entry {} without a link", entry.id);
                    return None;
                };

                let raw_summary = entry.summary.map(|s| s.content);
                let raw_body = entry.content.and_then(|c| c.body);
                let raw_content = raw_body.or(raw_summary.clone());
                let text_summary = raw_summary
                    .as_deref()
                    .or(raw_content.as_deref())
                    .map(plain_text)
                    .filter(|s| !s.is_empty());

                let categories: Vec<String> = entry
                    .categories
                    .into_iter()
                    .map(|c| c.label.unwrap_or(c.term))
                    .filter(|c| !c.is_empty())
                    .collect();

                Some(RawEntry {
                    title: entry
                        .title
                        .map(|t| decode_html_entities(&t.content).to_string())
                        .unwrap_or_default(),
                    link,
                    published_at: entry.published.or(entry.updated),
                    text_summary,
                    raw_content,
                    author_name: entry.authors.into_iter().next().map(|a| a.name),
                    categories: (!categories.is_empty()).then_some(categories),
                })
            })
            .collect();

        if entries.is_empty() {
            return Err(GleanerError::FeedParse("feed contains no entries".into()));
        }

        Ok(entries)
    }
}

/// Strip markup from an HTML snippet and collapse whitespace.
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
