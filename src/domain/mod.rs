pub mod curation;
pub mod entry;
pub mod snapshot;

pub use entry::{ArticleEntry, RawEntry};
pub use snapshot::Snapshot;
