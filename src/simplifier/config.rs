use serde::{Deserialize, Serialize};

/// Configuration for the content simplifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifierConfig {
    /// CSS selectors locating the article body, in priority order.
    /// The first selector with a match wins.
    pub content_selectors: Vec<String>,

    /// CSS selectors for subtrees dropped before any rewriting
    pub remove_selectors: Vec<String>,

    /// Tags allowed to remain in the output; everything else is unwrapped
    pub allowed_tags: Vec<String>,

    /// Layout containers kept as-is (without attributes) instead of unwrapped.
    /// Empty by default; `["div", "span"]` restores the legacy pass-through.
    pub preserved_containers: Vec<String>,

    /// Origin used to resolve root-relative URLs, e.g. `https://www.ithome.com`.
    /// Falls back to the article URL's own origin.
    pub canonical_origin: Option<String>,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            content_selectors: vec![
                ".post_content".to_string(),
                ".content".to_string(),
                "article".to_string(),
                "main".to_string(),
                "#main".to_string(),
                ".main-content".to_string(),
            ],
            remove_selectors: vec![
                "script".to_string(),
                "style".to_string(),
                "iframe".to_string(),
                ".ad".to_string(),
                ".advertisement".to_string(),
                ".related".to_string(),
                ".comment".to_string(),
                ".social-share".to_string(),
                "nav".to_string(),
                "footer".to_string(),
                "header".to_string(),
                "noscript".to_string(),
            ],
            allowed_tags: [
                "p", "h1", "h2", "h3", "h4", "h5", "h6", "img", "a", "strong", "em", "ul", "ol",
                "li", "blockquote", "pre", "code", "br",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            preserved_containers: Vec::new(),
            canonical_origin: None,
        }
    }
}

impl SimplifierConfig {
    /// Restore the legacy behavior that keeps `div` and `span` wrappers
    pub fn with_layout_containers() -> Self {
        Self {
            preserved_containers: vec!["div".to_string(), "span".to_string()],
            ..Default::default()
        }
    }

    pub fn is_allowed(&self, tag: &str) -> bool {
        self.allowed_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn is_preserved(&self, tag: &str) -> bool {
        self.preserved_containers
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}
