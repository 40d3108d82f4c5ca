//! Persistent sets of known-bad URLs and ids.
//!
//! A negative cache is consulted before any network attempt. New entries
//! are appended to the backing file immediately, so a killed run keeps
//! everything it learned.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ScrapeError, ScrapeResult};

/// An append-only set of keys that should never be fetched again.
#[derive(Debug, Clone, Default)]
pub struct NegativeCache {
    path: Option<PathBuf>,
    keys: HashSet<String>,
}

impl NegativeCache {
    /// A cache that lives only for this process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open (or start) a cache backed by a newline-separated file.
    ///
    /// A missing file is an empty cache; it is created on the first insert.
    pub fn open(path: &Path) -> ScrapeResult<Self> {
        let keys = match fs::read_to_string(path) {
            Ok(text) => text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(source) => {
                return Err(ScrapeError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(Self {
            path: Some(path.to_path_buf()),
            keys,
        })
    }

    /// Whether `key` is known to be bad.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Record a bad key. Returns `false` if it was already known.
    pub fn insert(&mut self, key: &str) -> ScrapeResult<bool> {
        if !self.keys.insert(key.to_string()) {
            return Ok(false);
        }
        if let Some(path) = &self.path {
            let io_err = |source: std::io::Error| ScrapeError::Io {
                path: path.clone(),
                source,
            };
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(io_err)?;
            writeln!(file, "{key}").map_err(io_err)?;
        }
        Ok(true)
    }

    /// Number of known-bad keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys are known.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
