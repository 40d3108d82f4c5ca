//! Second-order Markov chain over the words of scraped prose.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Sentence boundary marker in chain states.
const BOUNDARY: &str = "";
/// Sentences containing any of these are dropped from the corpus.
const REJECT_CHARS: &[char] = &['"', '(', ')', '[', ']'];
/// Attempts per [`MarkovText::make_sentence`] call.
const TRIES: usize = 10;
/// Longest sentence the walk will produce before giving up.
const MAX_WORDS: usize = 200;

type State = (String, String);

/// Sentence generator trained on a text corpus.
#[derive(Debug, Clone)]
pub struct MarkovText {
    chain: HashMap<State, Vec<String>>,
    rejoined: String,
    max_overlap_ratio: f64,
    max_overlap_total: usize,
}

/// Split prose into candidate sentences.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    for line in text.lines() {
        let mut start = 0;
        let mut chars = line.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let at_end = matches!(c, '.' | '!' | '?')
                && chars.peek().is_some_and(|&(_, next)| next.is_whitespace());
            if at_end {
                out.push(line[start..=i].trim());
                start = i + 1;
            }
        }
        out.push(line[start..].trim());
    }
    out.retain(|s| !s.is_empty());
    out
}

impl MarkovText {
    /// Train on a corpus. Sentences with quotes or brackets are skipped.
    pub fn new(corpus: &str) -> Self {
        let mut chain: HashMap<State, Vec<String>> = HashMap::new();
        let mut kept = Vec::new();

        for sentence in split_sentences(corpus) {
            if sentence.contains(REJECT_CHARS) {
                continue;
            }
            let words: Vec<&str> = sentence.split_whitespace().collect();
            let mut state = (BOUNDARY.to_string(), BOUNDARY.to_string());
            for word in words.iter().copied().chain(std::iter::once(BOUNDARY)) {
                chain.entry(state.clone()).or_default().push(word.to_string());
                state = (state.1, word.to_string());
            }
            kept.push(words.join(" "));
        }

        Self {
            chain,
            rejoined: format!(" {} ", kept.join(" ")),
            max_overlap_ratio: 0.7,
            max_overlap_total: 15,
        }
    }

    /// Change how much of the corpus a sentence may copy verbatim.
    pub fn with_overlap_limits(mut self, ratio: f64, total: usize) -> Self {
        self.max_overlap_ratio = ratio;
        self.max_overlap_total = total;
        self
    }

    /// Whether the corpus produced any usable sentence.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Walk the chain once.
    fn walk(&self, rng: &mut StdRng) -> Option<Vec<String>> {
        let mut state = (BOUNDARY.to_string(), BOUNDARY.to_string());
        let mut words = Vec::new();
        loop {
            let next = self.chain.get(&state)?.choose(rng)?;
            if next == BOUNDARY {
                return Some(words);
            }
            if words.len() >= MAX_WORDS {
                return None;
            }
            words.push(next.clone());
            state = (state.1, next.clone());
        }
    }

    /// Whether a sentence copies too long a run of the corpus.
    fn copies_corpus(&self, words: &[String]) -> bool {
        let by_ratio = (self.max_overlap_ratio * words.len() as f64).round() as usize;
        let window = by_ratio.min(self.max_overlap_total).min(words.len());
        if window == 0 {
            return false;
        }
        words
            .windows(window)
            .any(|gram| self.rejoined.contains(&format!(" {} ", gram.join(" "))))
    }

    /// A novel sentence, or `None` after a bounded number of tries.
    pub fn make_sentence(&self, rng: &mut StdRng) -> Option<String> {
        self.make_sentence_where(rng, |_| true)
    }

    /// A novel sentence of at most `max_chars` characters.
    pub fn make_short_sentence(&self, max_chars: usize, rng: &mut StdRng) -> Option<String> {
        self.make_sentence_where(rng, |s| s.chars().count() <= max_chars)
    }

    fn make_sentence_where(
        &self,
        rng: &mut StdRng,
        accept: impl Fn(&str) -> bool,
    ) -> Option<String> {
        for _ in 0..TRIES {
            let Some(words) = self.walk(rng) else {
                continue;
            };
            if words.is_empty() || self.copies_corpus(&words) {
                continue;
            }
            let sentence = words.join(" ");
            if accept(&sentence) {
                return Some(sentence);
            }
        }
        None
    }
}
