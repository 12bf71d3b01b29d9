//! # Gleaner
//!
//! Reads a news feed and renders each article as clean, reader-friendly HTML.
//!
//! ## Architecture
//!
//! ```text
//! FeedSource → Normalizer → FeedCache ──┐
//!                                       ├→ CLI
//! PageFetcher → ContentSimplifier ──────┘
//! ```
//!
//! The cache and the simplifier share no state; the CLI picks an entry from
//! the cache and hands its link to the simplifier.
//!
//! ## Quick Start
//!
//! ```bash
//! # List entries, featured first
//! gleaner list
//!
//! # Read one article
//! gleaner show <id>
//!
//! # Simplify any page
//! gleaner simplify https://www.ithome.com/0/800/123.htm
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// feed cache and content simplifier.
pub mod app;

/// Feed entry cache with TTL and stale-on-error fallback.
pub mod cache;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/gleaner/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`RawEntry`](domain::RawEntry): entry as parsed from the feed
/// - [`ArticleEntry`](domain::ArticleEntry): entry with a SHA256 id and defaults applied
/// - [`Snapshot`](domain::Snapshot): cached entry list with capture time
pub mod domain;

/// Feed and page fetching.
///
/// - [`FeedSource`](fetcher::FeedSource) / [`PageFetcher`](fetcher::PageFetcher): async traits
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation of both
pub mod fetcher;

/// Feed parsing into [`RawEntry`](domain::RawEntry) values.
pub mod normalizer;

/// Article HTML simplification.
pub mod simplifier;
