use serde::Serialize;

use crate::app::{AppContext, GleanerError, Result};
use crate::domain::curation::{categories, featured_first, in_category};
use crate::domain::ArticleEntry;

/// JSON envelope for entry listings.
#[derive(Serialize)]
struct EntryList<'a> {
    success: bool,
    data: &'a [ArticleEntry],
}

pub fn entries_json(entries: &[ArticleEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&EntryList {
        success: true,
        data: entries,
    })?)
}

/// Entries to list: optionally narrowed to a category, featured first.
pub async fn listing(ctx: &AppContext, category: Option<&str>) -> Result<Vec<ArticleEntry>> {
    let entries = ctx.cache.entries().await?;
    let entries = match category {
        Some(name) => in_category(&entries, name),
        None => entries.to_vec(),
    };
    Ok(featured_first(
        &entries,
        &ctx.config.curation.featured_keywords,
    ))
}

pub async fn list_entries(ctx: &AppContext, category: Option<&str>, json: bool) -> Result<()> {
    let entries = listing(ctx, category).await?;

    if json {
        println!("{}", entries_json(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries");
        return Ok(());
    }

    for entry in entries {
        let date = entry
            .published_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "                ".to_string());

        println!("{} {}\n  {}", date, entry.display_title(), entry.id);
    }

    Ok(())
}

pub async fn list_categories(ctx: &AppContext) -> Result<()> {
    let entries = ctx.cache.entries().await?;
    for category in categories(&entries) {
        let count = entries.iter().filter(|e| e.has_category(&category)).count();
        println!("{} ({})", category, count);
    }
    Ok(())
}

pub async fn show_entry(ctx: &AppContext, id: &str) -> Result<()> {
    let entry = ctx.cache.find(id).await?;
    let content = ctx.simplifier.simplify(&entry.link).await;

    println!("<h1>{}</h1>", html_escape::encode_text(entry.display_title()));
    println!("{}", content);
    Ok(())
}

pub async fn simplify_url(ctx: &AppContext, url: &str) -> Result<()> {
    println!("{}", ctx.simplifier.simplify(url).await);
    Ok(())
}

pub async fn digest(ctx: &AppContext, limit: usize, concurrency: usize) -> Result<()> {
    let entries = listing(ctx, None).await?;
    let selected = &entries[..limit.min(entries.len())];

    let articles = ctx.simplifier.simplify_entries(selected, concurrency).await;
    for (entry, (_, content)) in selected.iter().zip(articles) {
        println!("<article>");
        println!("<h1>{}</h1>", html_escape::encode_text(entry.display_title()));
        println!("{}", content);
        println!("</article>");
    }
    Ok(())
}

pub async fn open_entry(ctx: &AppContext, id: &str) -> Result<()> {
    let entry = ctx.cache.find(id).await?;
    open::that(&entry.link)?;
    println!("Opened {}", entry.link);
    Ok(())
}
