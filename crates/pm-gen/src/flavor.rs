//! Flavor text drawn from scraped encyclopedia prose.

use pm_core::Category;
use pm_scrape::Scraper;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::markov::MarkovText;

/// Description used when no sentence could be generated.
pub const NO_DESCRIPTION: &str = "Little is known about this Procemon.";
/// Longest description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 80;
/// Most pages concatenated into one corpus.
pub const MAX_PAGES: usize = 4;
/// Sentence draws before giving up on a corpus.
pub const SENTENCE_ATTEMPTS: usize = 20;

/// Page keys to try, best first: both categories' articles, then the two
/// nouns in random order. Duplicates and blanks are dropped.
pub fn candidate_pages(
    primary: &Category,
    secondary: &Category,
    words: &[&str],
    rng: &mut StdRng,
) -> Vec<String> {
    let mut shuffled: Vec<&str> = words.to_vec();
    shuffled.shuffle(rng);

    let mut pages: Vec<String> = Vec::new();
    let keys = [secondary.wikipedia(), primary.wikipedia()]
        .into_iter()
        .chain(shuffled);
    for key in keys {
        let key = key.trim();
        if !key.is_empty() && !pages.iter().any(|p| p == key) {
            pages.push(key.to_string());
        }
    }
    pages
}

/// Generate one short description from the first few available pages.
pub fn describe(pages: &[String], scraper: &mut Scraper, rng: &mut StdRng) -> String {
    let mut corpus = String::new();
    let mut used = 0;
    for page in pages {
        if used >= MAX_PAGES {
            break;
        }
        let Some(text) = scraper.page_text(page) else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }
        corpus.push_str(&text);
        corpus.push('\n');
        used += 1;
    }

    let model = MarkovText::new(&corpus);
    if !model.is_empty() {
        for _ in 0..SENTENCE_ATTEMPTS {
            if let Some(sentence) = model.make_short_sentence(MAX_DESCRIPTION_CHARS, rng) {
                return sentence;
            }
        }
    }
    tracing::warn!(?pages, used, "no description generated, using placeholder");
    NO_DESCRIPTION.to_string()
}
