//! Error types for the scraping layer.
//!
//! Network trouble is never an error here; it is a [`crate::Fetched`]
//! outcome. These cover setup and local persistence only.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for scraping setup and cache persistence.
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Errors that can occur while setting up sources or persisting caches.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A negative-cache file could not be read or appended to.
    #[error("cannot access cache file {}: {source}", path.display())]
    Io {
        /// The cache file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("cannot build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// An internal text pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
