//! Ordering and filtering helpers for presenting entry lists.

use crate::domain::ArticleEntry;

/// Whether the entry's title or any of its categories mentions a keyword.
pub fn is_featured(entry: &ArticleEntry, keywords: &[String]) -> bool {
    keywords.iter().any(|k| {
        entry.title.contains(k.as_str()) || entry.categories.iter().any(|c| c.contains(k.as_str()))
    })
}

/// Stable partition: featured entries first, everything else after.
pub fn featured_first(entries: &[ArticleEntry], keywords: &[String]) -> Vec<ArticleEntry> {
    let (mut featured, rest): (Vec<_>, Vec<_>) = entries
        .iter()
        .cloned()
        .partition(|e| is_featured(e, keywords));
    featured.extend(rest);
    featured
}

pub fn in_category(entries: &[ArticleEntry], name: &str) -> Vec<ArticleEntry> {
    entries
        .iter()
        .filter(|e| e.has_category(name))
        .cloned()
        .collect()
}

/// Distinct categories in the order they first appear.
pub fn categories(entries: &[ArticleEntry]) -> Vec<String> {
    let mut seen = Vec::new();
    for category in entries.iter().flat_map(|e| e.categories.iter()) {
        if !seen.contains(category) {
            seen.push(category.clone());
        }
    }
    seen
}
