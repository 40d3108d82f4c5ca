//! Reading word lists and writing partition results back to disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use pm_core::{Catalog, Category};

use crate::config::PartitionConfig;
use crate::error::{VocabError, VocabResult};
use crate::model::EmbeddingModel;
use crate::partition::{Partition, VocabInput, partition};

/// Every candidate verb.
pub const VERBS_FILE: &str = "verbs.txt";
/// Every candidate adjective.
pub const ADJECTIVES_FILE: &str = "adjectives.txt";
/// Verbs that never name a move. Optional.
pub const AUXILIARY_VERBS_FILE: &str = "auxiliary_verbs.txt";
/// Output file for the generic attack verbs.
pub const ATTACK_VERBS_FILE: &str = "attack_verbs.txt";
/// Category whose nouns are excluded from the verb list.
pub const ANIMAL_CATEGORY: &str = "animal";

/// Read a newline-separated word list.
pub fn read_words(path: &Path) -> VocabResult<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| VocabError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

fn read_optional_words(path: &Path) -> VocabResult<Vec<String>> {
    match read_words(path) {
        Err(VocabError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        other => other,
    }
}

/// Write the generic attack verbs, one per line.
pub fn write_attack_verbs(moves_dir: &Path, words: &[String]) -> VocabResult<()> {
    let path = moves_dir.join(ATTACK_VERBS_FILE);
    fs::write(&path, words.join("\n")).map_err(|source| VocabError::Io { path, source })
}

/// Store each category's pools in its definition file.
pub fn apply_partition(catalog: &mut Catalog, partition: &Partition) -> VocabResult<()> {
    let updated: Vec<Category> = catalog
        .categories()
        .iter()
        .filter_map(|c| {
            let pools = partition.pools.get(c.name())?;
            Some(
                c.clone()
                    .with_verbs(pools.verbs.clone())
                    .with_adjectives(pools.adjectives.clone()),
            )
        })
        .collect();
    for category in updated {
        catalog.save(category)?;
    }
    Ok(())
}

/// A category whose pool is smaller than it should be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    /// Category name.
    pub category: String,
    /// `"verbs"` or `"adjectives"`.
    pub part: &'static str,
    /// Current pool size.
    pub size: usize,
}

/// Every pool under `min` words.
pub fn shortfalls(categories: &[Category], min: usize) -> Vec<Shortfall> {
    let mut out = Vec::new();
    for c in categories {
        for (part, size) in [("verbs", c.verbs().len()), ("adjectives", c.adjectives().len())] {
            if size < min {
                out.push(Shortfall {
                    category: c.name().to_string(),
                    part,
                    size,
                });
            }
        }
    }
    out
}

/// Partition the vocabulary under `data_dir` and rewrite the category
/// files and the attack-verb list.
pub fn partition_catalog(
    data_dir: &Path,
    model: &EmbeddingModel,
    config: &PartitionConfig,
) -> VocabResult<Partition> {
    let types_dir = data_dir.join("types");
    let moves_dir = data_dir.join("moves");

    let mut catalog = Catalog::load(&types_dir)?;
    let verbs = read_words(&moves_dir.join(VERBS_FILE))?;
    let adjectives = read_words(&moves_dir.join(ADJECTIVES_FILE))?;

    let mut exclude = read_optional_words(&moves_dir.join(AUXILIARY_VERBS_FILE))?;
    if let Some(animal) = catalog.get(ANIMAL_CATEGORY) {
        exclude.extend(animal.nouns().iter().cloned());
    }

    let categories: Vec<String> = catalog
        .categories()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    let input = VocabInput {
        verbs: &verbs,
        adjectives: &adjectives,
        categories: &categories,
        exclude: &exclude,
    };
    let result = partition(model, &input, config);

    write_attack_verbs(&moves_dir, &result.generic)?;
    apply_partition(&mut catalog, &result)?;

    for s in shortfalls(catalog.categories(), config.min_pool) {
        tracing::warn!(category = %s.category, part = s.part, size = s.size, "category needs more words");
    }
    Ok(result)
}
