//! Error types for roster generation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that abort a generation run.
///
/// Shortfalls in vocabulary, text, or images are not errors: they degrade
/// to placeholders. Everything here is a configuration or output problem.
#[derive(Debug, Error)]
pub enum GenError {
    /// Catalog or roster error.
    #[error("{0}")]
    Core(#[from] pm_core::CoreError),

    /// Scraper setup or cache error.
    #[error("{0}")]
    Scrape(#[from] pm_scrape::ScrapeError),

    /// A data or output file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A sprite could not be encoded.
    #[error("cannot write sprite: {0}")]
    Image(#[from] image::ImageError),

    /// Every entry needs a secondary category distinct from its primary.
    #[error("need at least 2 categories, got {got}")]
    TooFewCategories {
        /// How many categories the roster would have.
        got: usize,
    },
}
