//! Error types for the vocabulary tool.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for vocabulary operations.
pub type VocabResult<T> = Result<T, VocabError>;

/// Errors raised while loading the model or rewriting category files.
#[derive(Debug, Error)]
pub enum VocabError {
    /// Catalog load or save failed.
    #[error("{0}")]
    Core(#[from] pm_core::CoreError),

    /// A file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line of the embedding file is malformed.
    #[error("{}:{line}: {reason}", path.display())]
    Parse {
        /// The embedding file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },

    /// The embedding file has no vectors.
    #[error("embedding model {} is empty", .0.display())]
    EmptyModel(PathBuf),
}
