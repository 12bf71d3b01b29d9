pub mod commands;

use clap::{Parser, Subcommand};

pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Parser)]
#[command(name = "gleaner")]
#[command(about = "Read a news feed as clean, simplified articles", long_about = None)]
pub struct Cli {
    /// Path to a config file (default: ~/.config/gleaner/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List feed entries, featured ones first
    List {
        /// Only show entries in this category
        #[arg(long)]
        category: Option<String>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the categories present in the feed
    Categories,
    /// Print the simplified article for an entry id
    Show {
        /// Entry id as shown by `list`
        id: String,
    },
    /// Print the simplified article for any URL
    Simplify {
        /// Article URL
        url: String,
    },
    /// Simplify the first entries of the feed concurrently
    Digest {
        /// Number of entries to include
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Articles fetched at once
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },
    /// Open an entry's original page in the browser
    Open {
        /// Entry id as shown by `list`
        id: String,
    },
}
