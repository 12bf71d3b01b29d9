//! Configuration management for Gleaner.
//!
//! Configuration is read from `~/.config/gleaner/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use crate::simplifier::SimplifierConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub http: HttpConfig,
    pub simplifier: SimplifierConfig,
    pub curation: CurationConfig,
}

/// Upstream feed and cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    /// How long a fetched snapshot is served without refetching
    pub ttl_secs: u64,
    /// Author shown when an entry carries none
    pub default_author: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "https://www.ithome.com/rss/".to_string(),
            ttl_secs: 300,
            default_author: "IT之家".to_string(),
        }
    }
}

impl FeedConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Outbound HTTP settings shared by feed and page fetches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 10,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Keywords that pull matching entries to the top of listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    pub featured_keywords: Vec<String>,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            featured_keywords: ["游戏", "Steam", "PS5", "Xbox", "任天堂", "Switch", "Game"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/gleaner/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gleaner").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Gleaner Configuration

[feed]
# RSS/Atom feed to read
url = "https://www.ithome.com/rss/"

# Seconds a fetched feed is served from memory before refetching
ttl_secs = 300

# Author shown for entries that carry none
default_author = "IT之家"

[http]
user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
timeout_secs = 10

[simplifier]
# CSS selectors locating the article body (first match wins)
content_selectors = [
    ".post_content",
    ".content",
    "article",
    "main",
    "#main",
    ".main-content",
]

# Subtrees removed before anything else (ads, navigation, etc.)
remove_selectors = [
    "script",
    "style",
    "iframe",
    ".ad",
    ".advertisement",
    ".related",
    ".comment",
    ".social-share",
    "nav",
    "footer",
    "header",
    "noscript",
]

# Layout containers kept instead of unwrapped, e.g. ["div", "span"]
preserved_containers = []

# Origin for root-relative image and link URLs.
# Defaults to the origin of each article URL.
# canonical_origin = "https://www.ithome.com"

[curation]
# Entries whose title or category mentions one of these are listed first
featured_keywords = ["游戏", "Steam", "PS5", "Xbox", "任天堂", "Switch", "Game"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
