//! Composite creature names with phonotactic repair.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Letters that count as vowels when checking a name.
pub const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Vowels used for repairs.
const REPAIR_VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Three-consonant clusters that read naturally in English.
pub const LEGAL_CLUSTERS: &[&str] = &[
    "chl", "chr", "ckl", "ght", "lch", "lds", "lks", "lms", "lps", "lth", "lts", "mbl", "mbr",
    "mps", "mpl", "mpt", "nch", "nct", "nds", "ndl", "ndr", "ngl", "ngs", "nks", "nst", "nth",
    "nts", "phr", "rch", "rks", "rld", "rms", "rns", "rst", "rth", "rts", "sch", "scr", "shr",
    "spl", "spr", "squ", "str", "tch", "thr", "ttl",
];

/// Longest words used whole instead of being cut.
const WHOLE_WORD_MAX: usize = 5;

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Whether three consonants in a row form an allowed cluster.
pub fn is_legal_cluster(triple: &[char]) -> bool {
    let s: String = triple.iter().collect();
    LEGAL_CLUSTERS.contains(&s.as_str())
}

/// Lower-case letters of a word with possessives removed.
fn letters(word: &str) -> Vec<char> {
    word.to_lowercase()
        .replace("'s", "")
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect()
}

/// Cut a fragment out of one noun: a prefix for the first word, a suffix
/// for the second. Short words are kept whole.
fn fragment(word: &str, first: bool, rng: &mut StdRng) -> Vec<char> {
    let chars = letters(word);
    if chars.len() <= WHOLE_WORD_MAX {
        return chars;
    }
    let take = rng.random_range(4..=8).min(chars.len());
    if first {
        chars[..take].to_vec()
    } else {
        chars[chars.len() - take..].to_vec()
    }
}

/// Build a display name from two nouns.
///
/// The result always has a vowel within its first four letters and never
/// contains three consonants in a row outside [`LEGAL_CLUSTERS`].
pub fn compose_name(first_word: &str, second_word: &str, rng: &mut StdRng) -> String {
    let mut name = fragment(first_word, true, rng);
    name.extend(fragment(second_word, false, rng));

    if !name.iter().take(4).any(|&c| is_vowel(c)) {
        name.insert(0, random_vowel(rng));
    }

    for i in 0..name.len().saturating_sub(2) {
        let triple = &name[i..i + 3];
        if triple.iter().all(|&c| !is_vowel(c)) && !is_legal_cluster(triple) {
            name[i + 1] = random_vowel(rng);
        }
    }

    capitalize(&name)
}

fn random_vowel(rng: &mut StdRng) -> char {
    REPAIR_VOWELS.choose(rng).copied().unwrap_or('a')
}

fn capitalize(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    for (i, c) in chars.iter().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else {
            out.push(*c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn has_illegal_run(name: &str) -> bool {
        let chars: Vec<char> = name.to_lowercase().chars().collect();
        chars
            .windows(3)
            .any(|w| w.iter().all(|&c| !is_vowel(c)) && !is_legal_cluster(w))
    }

    #[test]
    fn short_words_are_kept_whole() {
        assert_eq!(compose_name("fox", "owl", &mut rng(1)), "Foxowl");
    }

    #[test]
    fn long_words_are_cut() {
        let name = compose_name("elephantine", "hippopotamus", &mut rng(2));
        let lower = name.to_lowercase();
        assert!(lower.len() >= 8 && lower.len() <= 16, "{name}");
        assert!(lower.starts_with("elep"), "{name}");
        assert!(lower.ends_with("amus"), "{name}");
    }

    #[test]
    fn possessives_and_punctuation_removed() {
        let name = compose_name("Fox's", "o-wl", &mut rng(3));
        assert_eq!(name, "Foxowl");
    }

    #[test]
    fn vowelless_start_gets_a_vowel() {
        let name = compose_name("st", "rk", &mut rng(4));
        let first = name.chars().next().unwrap().to_ascii_lowercase();
        assert!(REPAIR_VOWELS.contains(&first), "{name}");
        assert!(!has_illegal_run(&name), "{name}");
    }

    #[test]
    fn illegal_runs_are_broken() {
        let name = compose_name("ab", "bcdfg", &mut rng(5));
        assert!(!has_illegal_run(&name), "{name}");
        assert_eq!(name.len(), 7);
    }

    #[test]
    fn legal_clusters_survive() {
        assert_eq!(compose_name("astr", "al", &mut rng(6)), "Astral");
    }

    #[test]
    fn empty_words_still_name() {
        let name = compose_name("", "42", &mut rng(7));
        assert_eq!(name.len(), 1);
    }

    proptest! {
        #[test]
        fn names_are_pronounceable(a in "[a-z]{1,14}", b in "[a-z']{1,14}", seed in any::<u64>()) {
            let name = compose_name(&a, &b, &mut rng(seed));
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().next().unwrap().is_uppercase());
            let lower = name.to_lowercase();
            prop_assert!(lower.chars().take(4).any(is_vowel), "{}", name);
            prop_assert!(!has_illegal_run(&name), "{}", name);
        }
    }
}
