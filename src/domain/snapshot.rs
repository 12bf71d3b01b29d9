use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::domain::ArticleEntry;

/// A captured copy of the feed's entries. Replaced wholesale, never edited.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub entries: Arc<Vec<ArticleEntry>>,
    /// Wall-clock capture time, for display
    pub captured_at: DateTime<Utc>,
    /// Monotonic capture time, for TTL checks
    captured: Instant,
}

impl Snapshot {
    pub fn new(entries: Vec<ArticleEntry>) -> Self {
        Self {
            entries: Arc::new(entries),
            captured_at: Utc::now(),
            captured: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.captured.elapsed()
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}
