use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::entry::Entry;
use crate::error::{CoreError, CoreResult};
use crate::palette::{PALETTE, PaletteColor};

/// Metadata about one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterMeta {
    /// Short run identifier, also used as the output directory name.
    pub id: String,
    /// When the run started.
    pub created_at: DateTime<Utc>,
    /// RNG seed the run was generated with.
    pub seed: u64,
    /// Requested number of entries per category.
    pub entries_per_category: usize,
}

impl RosterMeta {
    /// Fresh metadata with a random run id.
    pub fn new(seed: u64, entries_per_category: usize) -> Self {
        let id = Uuid::new_v4().simple().to_string()[..8].to_string();
        Self {
            id,
            created_at: Utc::now(),
            seed,
            entries_per_category,
        }
    }
}

/// The generated collection for one run: categories, color buckets, entries.
///
/// Populated once by the builder, then only read or serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Run metadata.
    pub meta: RosterMeta,
    categories: Vec<Category>,
    colors: BTreeMap<String, usize>,
    entries: BTreeMap<String, BTreeMap<String, Entry>>,
}

impl Roster {
    /// Create an empty roster over a fixed, ordered set of categories.
    ///
    /// `colors` maps category names to palette indices.
    pub fn new(
        meta: RosterMeta,
        categories: Vec<Category>,
        colors: BTreeMap<String, usize>,
    ) -> CoreResult<Self> {
        let mut entries = BTreeMap::new();
        for c in &categories {
            if entries.insert(c.name().to_string(), BTreeMap::new()).is_some() {
                return Err(CoreError::DuplicateCategory(c.name().to_string()));
            }
        }
        Ok(Self {
            meta,
            categories,
            colors,
            entries,
        })
    }

    /// The roster's categories in their fixed order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a roster category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Whether `name` is one of the roster's categories.
    pub fn has_category(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The cyclic successor of `name` in the roster's category order.
    pub fn successor_of(&self, name: &str) -> Option<&str> {
        let i = self.categories.iter().position(|c| c.name() == name)?;
        let next = (i + 1) % self.categories.len();
        Some(self.categories[next].name())
    }

    /// Palette index assigned to a category.
    pub fn color_index(&self, category: &str) -> Option<usize> {
        self.colors.get(category).copied()
    }

    /// Palette color assigned to a category.
    pub fn color(&self, category: &str) -> Option<&'static PaletteColor> {
        self.color_index(category).map(|i| &PALETTE[i % PALETTE.len()])
    }

    /// Whether a category already has an entry with this name.
    pub fn contains(&self, category: &str, name: &str) -> bool {
        self.entries
            .get(category)
            .is_some_and(|by_name| by_name.contains_key(name))
    }

    /// Add an entry under its primary category.
    ///
    /// Returns the entry it displaced, if one had the same name. Entries
    /// whose primary category is not in the roster are rejected.
    pub fn insert(&mut self, entry: Entry) -> CoreResult<Option<Entry>> {
        let by_name = self
            .entries
            .get_mut(&entry.primary)
            .ok_or_else(|| CoreError::InvalidCategory {
                name: entry.primary.clone(),
                reason: "not part of this roster".into(),
            })?;
        Ok(by_name.insert(entry.name.clone(), entry))
    }

    /// Entries of one category, keyed by name.
    pub fn entries_of(&self, category: &str) -> Option<&BTreeMap<String, Entry>> {
        self.entries.get(category)
    }

    /// Every entry, grouped by category in roster order.
    pub fn iter_entries(&self) -> impl Iterator<Item = &Entry> {
        self.categories
            .iter()
            .filter_map(|c| self.entries.get(c.name()))
            .flat_map(|by_name| by_name.values())
    }

    /// Total number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Serialize to pretty JSON with alphabetical keys and two-space indent.
    pub fn to_json(&self) -> CoreResult<String> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Parse a roster from its JSON form.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write the roster file.
    pub fn write(&self, path: &Path) -> CoreResult<()> {
        let text = self.to_json()?;
        fs::write(path, text).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a roster file.
    pub fn read(path: &Path) -> CoreResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
