//! Configuration for network sources and cache files.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// File holding encyclopedia URLs known to be missing or unreachable.
pub const BAD_TEXT_URLS_FILE: &str = "bad_wikipedia_urls.txt";
/// File holding image URLs known to be unusable.
pub const BAD_IMAGE_URLS_FILE: &str = "bad_image_urls.txt";
/// File holding image-corpus ids known to have no URL list.
pub const BAD_IMAGE_IDS_FILE: &str = "bad_image_ids.txt";

/// Network and cache settings shared by every source.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Attempts per call for transient failures (at most 10).
    pub max_attempts: u32,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Base URL for encyclopedia pages; the page key is appended.
    pub wikipedia_base: String,
    /// URL-list endpoint of the image corpus; the id is appended.
    pub imagenet_base: String,
    /// Directory holding the persisted negative caches. `None` keeps them in memory.
    pub cache_dir: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_attempts: 10,
            user_agent: concat!("procemon/", env!("CARGO_PKG_VERSION")).to_string(),
            wikipedia_base: "https://en.wikipedia.org/wiki/".to_string(),
            imagenet_base: "http://www.image-net.org/api/text/imagenet.synset.geturls?wnid="
                .to_string(),
            cache_dir: None,
        }
    }
}

impl ScrapeConfig {
    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the attempt count for transient failures (clamped to 1-10).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.clamp(1, 10);
        self
    }

    /// Persist negative caches under `dir`.
    pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cache_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Path of one cache file, if caches are persisted.
    pub fn cache_file(&self, name: &str) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|d| d.join(name))
    }
}
