//! Configuration for a roster generation run.

use std::path::{Path, PathBuf};

/// Configuration for building a dex.
#[derive(Debug, Clone)]
pub struct DexConfig {
    /// Number of categories in the roster.
    pub num_categories: usize,
    /// Number of entries generated per category.
    pub entries_per_category: usize,
    /// RNG seed for reproducible rosters.
    pub seed: u64,
    /// Root of the bundled data (`types/`, `moves/`, `cache/`).
    pub data_dir: PathBuf,
    /// Parent directory of the per-run output directories.
    pub output_root: PathBuf,
    /// Attempts at a fresh name before a colliding one gets a numeral.
    pub name_retries: usize,
    /// Size of the moods subset drawn once per run.
    pub moods_per_run: usize,
    /// Side length of generated sprites, in pixels.
    pub sprite_size: u32,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            num_categories: 12,
            entries_per_category: 9,
            seed: 42,
            data_dir: PathBuf::from("data"),
            output_root: PathBuf::from("dst/dex"),
            name_retries: 10,
            moods_per_run: 6,
            sprite_size: 192,
        }
    }
}

impl DexConfig {
    /// Set the number of categories.
    pub fn with_categories(mut self, n: usize) -> Self {
        self.num_categories = n;
        self
    }

    /// Set the number of entries per category.
    pub fn with_entries_per_category(mut self, n: usize) -> Self {
        self.entries_per_category = n;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the output root.
    pub fn with_output_root(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_root = dir.as_ref().to_path_buf();
        self
    }

    /// Set the sprite size (at least 1 pixel).
    pub fn with_sprite_size(mut self, size: u32) -> Self {
        self.sprite_size = size.max(1);
        self
    }

    /// Directory of category files.
    pub fn catalog_dir(&self) -> PathBuf {
        self.data_dir.join("types")
    }

    /// Directory of move word lists.
    pub fn moves_dir(&self) -> PathBuf {
        self.data_dir.join("moves")
    }

    /// Directory of persisted negative caches.
    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = DexConfig::default();
        assert_eq!(cfg.num_categories, 12);
        assert_eq!(cfg.entries_per_category, 9);
        assert_eq!(cfg.moods_per_run, 6);
        assert_eq!(cfg.catalog_dir(), PathBuf::from("data/types"));
    }

    #[test]
    fn builder_methods() {
        let cfg = DexConfig::default()
            .with_categories(3)
            .with_entries_per_category(5)
            .with_seed(7)
            .with_data_dir("/srv/pm")
            .with_sprite_size(0);
        assert_eq!(cfg.num_categories, 3);
        assert_eq!(cfg.entries_per_category, 5);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.moves_dir(), PathBuf::from("/srv/pm/moves"));
        assert_eq!(cfg.sprite_size, 1);
    }
}
