use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading, validating, or serializing core data.
///
/// All of these are configuration errors: a run that hits one cannot
/// produce a meaningful roster and should stop.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A file did not contain valid JSON for the expected shape.
    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        /// The offending path.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// A category definition is missing a required field.
    #[error("category definition is missing required field \"{0}\"")]
    MissingField(&'static str),

    /// A category definition has a field with an unusable value.
    #[error("invalid category \"{name}\": {reason}")]
    InvalidCategory {
        /// The category name, or an empty string if the name itself is bad.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two category files declare the same name.
    #[error("duplicate category: \"{0}\"")]
    DuplicateCategory(String),

    /// The catalog directory contains no category files.
    #[error("no category files found in {}", .0.display())]
    EmptyCatalog(PathBuf),

    /// A roster could not be converted to or from JSON.
    #[error("roster serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
