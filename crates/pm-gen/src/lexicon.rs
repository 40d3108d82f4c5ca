//! Category-agnostic word lists used by move synthesis.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{GenError, GenResult};

/// File of verbs generic enough to name any attack.
pub const ATTACK_VERBS_FILE: &str = "attack_verbs.txt";
/// File of every mood a move can inflict.
pub const MOODS_FILE: &str = "moods.txt";

/// Generic attack verbs and the full mood list.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    /// Verbs close to "attack"; usable by every category.
    pub attack_verbs: Vec<String>,
    /// Every mood a special effect can set.
    pub moods: Vec<String>,
}

impl Lexicon {
    /// Load both lists from the moves directory. Both files must exist.
    pub fn load(moves_dir: &Path) -> GenResult<Self> {
        Ok(Self {
            attack_verbs: read_word_list(&moves_dir.join(ATTACK_VERBS_FILE))?,
            moods: read_word_list(&moves_dir.join(MOODS_FILE))?,
        })
    }

    /// Draw the per-run mood subset: `n` distinct moods in random order.
    pub fn sample_moods(&self, n: usize, rng: &mut StdRng) -> Vec<String> {
        let mut moods = self.moods.clone();
        moods.shuffle(rng);
        moods.truncate(n);
        moods
    }
}

/// Read a newline-separated word list, dropping blank lines.
pub fn read_word_list(path: &Path) -> GenResult<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| GenError::Io {
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
