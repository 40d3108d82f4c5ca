//! Word vectors in word2vec / GloVe text format.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{VocabError, VocabResult};

/// An in-memory embedding model with unit-length vectors.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingModel {
    index: HashMap<String, usize>,
    words: Vec<String>,
    vectors: Vec<Vec<f32>>,
    dim: usize,
}

fn normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl EmbeddingModel {
    /// Load a model file. An optional `count dim` header line is skipped.
    pub fn load(path: &Path) -> VocabResult<Self> {
        let file = File::open(path).map_err(|source| VocabError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::read(BufReader::new(file), path)?;
        if model.is_empty() {
            return Err(VocabError::EmptyModel(path.to_path_buf()));
        }
        tracing::info!(path = %path.display(), words = model.len(), dim = model.dim, "loaded embedding model");
        Ok(model)
    }

    /// Parse a model from any reader. `origin` is only used in errors.
    pub fn read(reader: impl BufRead, origin: &Path) -> VocabResult<Self> {
        let mut model = Self::default();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| VocabError::Io {
                path: origin.to_path_buf(),
                source,
            })?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();
            if i == 0 && rest.len() == 1 && word.parse::<usize>().is_ok() {
                continue;
            }

            let parse_err = |reason: String| VocabError::Parse {
                path: origin.to_path_buf(),
                line: i + 1,
                reason,
            };
            let vector = rest
                .iter()
                .map(|f| f.parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| parse_err(e.to_string()))?;
            if vector.is_empty() {
                return Err(parse_err(format!("no vector for \"{word}\"")));
            }
            if model.dim != 0 && vector.len() != model.dim {
                return Err(parse_err(format!(
                    "expected {} components, got {}",
                    model.dim,
                    vector.len()
                )));
            }
            model.insert(word, vector);
        }
        Ok(model)
    }

    /// Build a model from word/vector pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, Vec<f32>)>) -> Self {
        let mut model = Self::default();
        for (word, vector) in pairs {
            model.insert(word, vector);
        }
        model
    }

    fn insert(&mut self, word: &str, mut vector: Vec<f32>) {
        if self.index.contains_key(word) {
            return;
        }
        if self.dim == 0 {
            self.dim = vector.len();
        }
        normalize(&mut vector);
        self.index.insert(word.to_string(), self.words.len());
        self.words.push(word.to_string());
        self.vectors.push(vector);
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the model has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Vector dimensionality.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Whether the model knows a word.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn vector(&self, word: &str) -> Option<&[f32]> {
        self.index.get(word).map(|&i| self.vectors[i].as_slice())
    }

    /// Cosine distance between two words, `None` if either is unknown.
    pub fn distance(&self, a: &str, b: &str) -> Option<f32> {
        let similarity = dot(self.vector(a)?, self.vector(b)?);
        Some((1.0 - similarity).clamp(0.0, 2.0))
    }

    /// The `topn` words most similar to `word`, closest first.
    pub fn most_similar(&self, word: &str, topn: usize) -> Vec<(String, f32)> {
        let Some(target) = self.vector(word) else {
            return Vec::new();
        };
        let mut scored: Vec<(String, f32)> = self
            .words
            .iter()
            .zip(&self.vectors)
            .filter(|(w, _)| w.as_str() != word)
            .map(|(w, v)| (w.clone(), dot(target, v)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(topn);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    const GLOVE: &str = "3 2\nfire 1 0\nflame 0.9 0.1\nwater 0 1\n";

    fn model() -> EmbeddingModel {
        EmbeddingModel::read(Cursor::new(GLOVE), Path::new("test.txt")).unwrap()
    }

    #[test]
    fn header_is_skipped() {
        let m = model();
        assert_eq!(m.len(), 3);
        assert_eq!(m.dim(), 2);
        assert!(!m.contains("3"));
    }

    #[test]
    fn distances() {
        let m = model();
        assert!(m.distance("fire", "fire").unwrap().abs() < 1e-6);
        assert!((m.distance("fire", "water").unwrap() - 1.0).abs() < 1e-6);
        assert!(m.distance("fire", "flame").unwrap() < 0.01);
        assert!(m.distance("fire", "ice").is_none());
    }

    #[test]
    fn most_similar_excludes_self() {
        let m = model();
        let near = m.most_similar("fire", 5);
        assert_eq!(near.len(), 2);
        assert_eq!(near[0].0, "flame");
        assert_eq!(near[1].0, "water");
        assert!(m.most_similar("ice", 5).is_empty());
    }

    #[test]
    fn ragged_rows_are_errors() {
        let err = EmbeddingModel::read(Cursor::new("a 1 2\nb 1\n"), Path::new("m.txt")).unwrap_err();
        assert!(matches!(err, VocabError::Parse { line: 2, .. }), "{err}");
        let err = EmbeddingModel::read(Cursor::new("a x y\n"), Path::new("m.txt")).unwrap_err();
        assert!(matches!(err, VocabError::Parse { line: 1, .. }));
    }

    #[test]
    fn load_rejects_empty_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();
        assert!(matches!(EmbeddingModel::load(&path), Err(VocabError::EmptyModel(_))));
    }

    proptest! {
        #[test]
        fn distance_is_bounded(a in proptest::collection::vec(-5.0f32..5.0, 3), b in proptest::collection::vec(-5.0f32..5.0, 3)) {
            let m = EmbeddingModel::from_pairs([("a", a), ("b", b)]);
            let d = m.distance("a", "b").unwrap();
            prop_assert!((0.0..=2.0).contains(&d));
            prop_assert!((d - m.distance("b", "a").unwrap()).abs() < 1e-5);
        }
    }
}
