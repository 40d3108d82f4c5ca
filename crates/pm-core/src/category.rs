use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A themed bucket of vocabulary plus the keys used to look it up externally.
///
/// Categories are immutable once loaded. The only way to build one is the
/// validating [`Category::new`] constructor (or deserialization, which goes
/// through the same validation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CategoryRecord", into = "CategoryRecord")]
pub struct Category {
    name: String,
    nouns: Vec<String>,
    verbs: Vec<String>,
    adjectives: Vec<String>,
    wikipedia: String,
    imagenet: String,
}

impl Category {
    /// Create a category with no verbs or adjectives.
    ///
    /// Fails if the name is blank or no usable noun is given.
    pub fn new(
        name: impl Into<String>,
        nouns: Vec<String>,
        wikipedia: impl Into<String>,
        imagenet: impl Into<String>,
    ) -> CoreResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CoreError::InvalidCategory {
                name,
                reason: "name is blank".into(),
            });
        }
        let nouns = clean_words(nouns);
        if nouns.is_empty() {
            return Err(CoreError::InvalidCategory {
                name,
                reason: "no nouns".into(),
            });
        }
        Ok(Self {
            name,
            nouns,
            verbs: Vec::new(),
            adjectives: Vec::new(),
            wikipedia: wikipedia.into().trim().to_string(),
            imagenet: imagenet.into().trim().to_string(),
        })
    }

    /// Replace the verb pool.
    pub fn with_verbs(mut self, verbs: Vec<String>) -> Self {
        self.verbs = clean_words(verbs);
        self
    }

    /// Replace the adjective pool.
    pub fn with_adjectives(mut self, adjectives: Vec<String>) -> Self {
        self.adjectives = clean_words(adjectives);
        self
    }

    /// The unique category name, e.g. `"fire"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nouns used to build creature names.
    pub fn nouns(&self) -> &[String] {
        &self.nouns
    }

    /// Verbs used to name moves.
    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    /// Adjectives used to name moves.
    pub fn adjectives(&self) -> &[String] {
        &self.adjectives
    }

    /// Encyclopedia page key for this category.
    pub fn wikipedia(&self) -> &str {
        &self.wikipedia
    }

    /// Image-corpus identifier for this category.
    pub fn imagenet(&self) -> &str {
        &self.imagenet
    }
}

/// Trim words and drop blanks and duplicates, keeping first-seen order.
fn clean_words(words: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for w in words {
        let w = w.trim();
        if !w.is_empty() && !out.iter().any(|o| o == w) {
            out.push(w.to_string());
        }
    }
    out
}

/// The raw on-disk shape of a category file.
///
/// Fields are optional here so that a missing field can be reported by
/// name instead of as a generic parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Move adjectives. Absent in older vocabularies.
    #[serde(default)]
    pub adjectives: Vec<String>,
    /// Image-corpus identifier.
    pub imagenet: Option<String>,
    /// Category name.
    pub monster_type: Option<String>,
    /// Name nouns.
    pub nouns: Option<Vec<String>>,
    /// Move verbs. Absent in older vocabularies.
    #[serde(default)]
    pub verbs: Vec<String>,
    /// Encyclopedia page key.
    pub wikipedia: Option<String>,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = CoreError;

    fn try_from(record: CategoryRecord) -> CoreResult<Self> {
        let name = record
            .monster_type
            .ok_or(CoreError::MissingField("monster_type"))?;
        let nouns = record.nouns.ok_or(CoreError::MissingField("nouns"))?;
        let wikipedia = record
            .wikipedia
            .ok_or(CoreError::MissingField("wikipedia"))?;
        let imagenet = record.imagenet.ok_or(CoreError::MissingField("imagenet"))?;
        Ok(Category::new(name, nouns, wikipedia, imagenet)?
            .with_verbs(record.verbs)
            .with_adjectives(record.adjectives))
    }
}

impl From<Category> for CategoryRecord {
    fn from(c: Category) -> Self {
        Self {
            adjectives: c.adjectives,
            imagenet: Some(c.imagenet),
            monster_type: Some(c.name),
            nouns: Some(c.nouns),
            verbs: c.verbs,
            wikipedia: Some(c.wikipedia),
        }
    }
}

/// Read every `*.json` category file in `dir`, sorted by file name.
///
/// Any malformed file aborts the load: a broken catalog is a deployment
/// problem, not something to paper over.
pub fn load_all(dir: &Path) -> CoreResult<Vec<Category>> {
    Ok(Catalog::load(dir)?.into_categories())
}

/// The full set of category definitions on disk.
#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
    categories: Vec<Category>,
    paths: BTreeMap<String, PathBuf>,
}

impl Catalog {
    /// Load the catalog from a directory of category files.
    pub fn load(dir: &Path) -> CoreResult<Self> {
        let entries = fs::read_dir(dir).map_err(|source| CoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(CoreError::EmptyCatalog(dir.to_path_buf()));
        }

        let mut categories = Vec::with_capacity(files.len());
        let mut paths = BTreeMap::new();
        for path in files {
            let text = fs::read_to_string(&path).map_err(|source| CoreError::Io {
                path: path.clone(),
                source,
            })?;
            let category: Category =
                serde_json::from_str(&text).map_err(|source| CoreError::Json {
                    path: path.clone(),
                    source,
                })?;
            if paths.contains_key(category.name()) {
                return Err(CoreError::DuplicateCategory(category.name().to_string()));
            }
            tracing::debug!(category = category.name(), path = %path.display(), "loaded category");
            paths.insert(category.name().to_string(), path);
            categories.push(category);
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            categories,
            paths,
        })
    }

    /// The directory this catalog was loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All categories, in file-name order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Consume the catalog, keeping only the categories.
    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    /// Look up a category by name.
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Replace a category's definition in memory and rewrite its file.
    ///
    /// New categories are written to `<dir>/<name>.json`.
    pub fn save(&mut self, category: Category) -> CoreResult<()> {
        let path = self
            .paths
            .get(category.name())
            .cloned()
            .unwrap_or_else(|| self.dir.join(format!("{}.json", category.name())));
        write_category(&path, &category)?;

        match self
            .categories
            .iter_mut()
            .find(|c| c.name() == category.name())
        {
            Some(slot) => *slot = category,
            None => {
                self.paths.insert(category.name().to_string(), path);
                self.categories.push(category);
            }
        }
        Ok(())
    }
}

/// Write one category file: alphabetical keys, two-space indent.
pub fn write_category(path: &Path, category: &Category) -> CoreResult<()> {
    // Going through `Value` sorts the keys.
    let value = serde_json::to_value(category)?;
    let text = serde_json::to_string_pretty(&value)?;
    fs::write(path, text).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
