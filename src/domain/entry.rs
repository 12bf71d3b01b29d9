use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An entry as handed over by the feed parser, before any defaulting.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Summary with markup stripped
    pub text_summary: Option<String>,
    /// Summary or content body exactly as the feed carried it
    pub raw_content: Option<String>,
    pub author_name: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// A feed entry as served to readers.
///
/// Entries are immutable once built; a refresh produces new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleEntry {
    pub id: String,
    pub title: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    pub summary: String,
    pub author: String,
    pub categories: Vec<String>,
}

impl ArticleEntry {
    pub fn from_raw(raw: RawEntry, default_author: &str) -> Self {
        let summary = raw
            .text_summary
            .filter(|s| !s.trim().is_empty())
            .or(raw.raw_content)
            .unwrap_or_default();

        let author = raw
            .author_name
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| default_author.to_string());

        Self {
            id: Self::generate_id(&raw.link),
            title: raw.title,
            link: raw.link,
            published_at: raw.published_at,
            summary,
            author,
            categories: raw.categories.unwrap_or_default(),
        }
    }

    /// Generate a deterministic ID from the entry link
    pub fn generate_id(link: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(link.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }
}
