//! Synthesis of one complete entry.

use pm_core::{Category, Entry, Rarity};
use pm_scrape::Scraper;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::error::{GenError, GenResult};
use crate::flavor::{candidate_pages, describe};
use crate::moves::{MoveRequest, synthesize_move};
use crate::naming::compose_name;
use crate::tables::hp_range;

/// Run-wide inputs shared by every entry.
#[derive(Debug, Clone, Copy)]
pub struct EntryContext<'a> {
    /// Roster categories in their fixed order.
    pub categories: &'a [Category],
    /// Category-agnostic attack verbs.
    pub attack_verbs: &'a [String],
    /// The run's mood subset.
    pub moods: &'a [String],
    /// Fresh names to try before numbering a colliding one.
    pub name_retries: usize,
}

/// Generate one entry for `primary`.
///
/// `is_taken` reports whether a name is already used in the primary
/// category. Colliding names are redrawn up to `ctx.name_retries` times,
/// then disambiguated with a roman numeral.
pub fn synthesize_entry(
    primary: &Category,
    rarity: Rarity,
    ctx: &EntryContext<'_>,
    scraper: &mut Scraper,
    rng: &mut StdRng,
    is_taken: impl Fn(&str) -> bool,
) -> GenResult<Entry> {
    let others: Vec<&Category> = ctx
        .categories
        .iter()
        .filter(|c| c.name() != primary.name())
        .collect();
    let secondary = *others.choose(rng).ok_or(GenError::TooFewCategories {
        got: ctx.categories.len(),
    })?;

    let position = ctx
        .categories
        .iter()
        .position(|c| c.name() == primary.name())
        .ok_or_else(|| {
            pm_core::CoreError::InvalidCategory {
                name: primary.name().to_string(),
                reason: "not part of this roster".into(),
            }
        })?;
    let strong_against = ctx.categories[(position + 1) % ctx.categories.len()].name();

    let (name, words) = pick_name(primary, secondary, ctx.name_retries, rng, &is_taken);

    let word_refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let pages = candidate_pages(primary, secondary, &word_refs, rng);
    let description = describe(&pages, scraper, rng);

    let request = MoveRequest {
        category: primary.name(),
        rarity,
        type_verbs: primary.verbs(),
        type_adjectives: primary.adjectives(),
        attack_verbs: ctx.attack_verbs,
        moods: ctx.moods,
        force_damage: false,
        force_no_special: false,
    };
    let first = synthesize_move(&request, rng);
    let second = synthesize_move(&request, rng);

    let hp = rng.random_range(hp_range(rarity));

    tracing::info!(
        category = primary.name(),
        name = %name,
        rarity = %rarity,
        secondary = secondary.name(),
        "created entry"
    );

    Ok(Entry {
        name,
        primary: primary.name().to_string(),
        secondary: secondary.name().to_string(),
        rarity,
        description,
        moves: [first, second],
        hp,
        strong_against: strong_against.to_string(),
    })
}

/// Draw a name plus the nouns it was built from.
fn pick_name(
    primary: &Category,
    secondary: &Category,
    retries: usize,
    rng: &mut StdRng,
    is_taken: &impl Fn(&str) -> bool,
) -> (String, [String; 2]) {
    let draw = |rng: &mut StdRng| {
        let a = primary.nouns().choose(rng).cloned().unwrap_or_default();
        let b = secondary.nouns().choose(rng).cloned().unwrap_or_default();
        (compose_name(&a, &b, rng), [a, b])
    };

    let (mut name, mut words) = draw(rng);
    for _ in 0..retries {
        if !is_taken(&name) {
            return (name, words);
        }
        (name, words) = draw(rng);
    }
    if !is_taken(&name) {
        return (name, words);
    }

    tracing::debug!(name = %name, "name still taken after retries, numbering it");
    let base = name;
    let mut n = 2;
    loop {
        let numbered = format!("{base} {}", roman(n));
        if !is_taken(&numbered) {
            return (numbered, words);
        }
        n += 1;
    }
}

/// Roman numeral for small positive numbers.
fn roman(mut n: usize) -> String {
    const TABLE: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, digits) in TABLE {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_scrape::ScrapeConfig;
    use rand::SeedableRng;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    fn categories() -> Vec<Category> {
        ["fire", "water", "rock"]
            .iter()
            .map(|n| {
                Category::new(*n, words(&["salamander", "ember", "lava"]), *n, "n0")
                    .unwrap()
                    .with_verbs(words(&["scorch"]))
                    .with_adjectives(words(&["molten"]))
            })
            .collect()
    }

    fn offline() -> Scraper {
        Scraper::offline(&ScrapeConfig::default()).unwrap()
    }

    #[test]
    fn roman_numerals() {
        assert_eq!(roman(2), "II");
        assert_eq!(roman(4), "IV");
        assert_eq!(roman(14), "XIV");
    }

    #[test]
    fn entry_fields_are_consistent() {
        let cats = categories();
        let attack = words(&["strike"]);
        let moods = words(&["sleepy"]);
        let ctx = EntryContext {
            categories: &cats,
            attack_verbs: &attack,
            moods: &moods,
            name_retries: 3,
        };
        let mut scraper = offline();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let e = synthesize_entry(&cats[2], Rarity::Rare, &ctx, &mut scraper, &mut rng, |_| false)
                .unwrap();
            assert_eq!(e.primary, "rock");
            assert_ne!(e.secondary, "rock");
            assert_eq!(e.strong_against, "fire");
            assert!(hp_range(Rarity::Rare).contains(&e.hp));
            assert!(e.moves.iter().all(|m| m.category == "rock"));
        }
    }

    #[test]
    fn both_moves_can_skip_damage() {
        let cats = categories();
        let ctx = EntryContext {
            categories: &cats,
            attack_verbs: &[],
            moods: &[],
            name_retries: 0,
        };
        let mut scraper = offline();
        let mut rng = StdRng::seed_from_u64(12);
        let mut second_zero = 0;
        let mut both_zero = 0;
        for _ in 0..400 {
            let e = synthesize_entry(&cats[0], Rarity::Common, &ctx, &mut scraper, &mut rng, |_| false)
                .unwrap();
            if e.moves[1].damage == 0 {
                second_zero += 1;
                if e.moves[0].damage == 0 {
                    both_zero += 1;
                }
            }
        }
        // 30% per move for commons, rolled independently.
        assert!((80..=160).contains(&second_zero), "{second_zero}");
        assert!(both_zero >= 10, "{both_zero}");
    }

    #[test]
    fn colliding_names_get_numbered() {
        let cats = categories();
        let ctx = EntryContext {
            categories: &cats,
            attack_verbs: &[],
            moods: &[],
            name_retries: 2,
        };
        let mut scraper = offline();
        let mut rng = StdRng::seed_from_u64(10);
        let e = synthesize_entry(&cats[0], Rarity::Common, &ctx, &mut scraper, &mut rng, |n| {
            !n.ends_with(" III")
        })
        .unwrap();
        assert!(e.name.ends_with(" III"), "{}", e.name);
    }

    #[test]
    fn lone_category_is_an_error() {
        let cats = categories();
        let ctx = EntryContext {
            categories: &cats[..1],
            attack_verbs: &[],
            moods: &[],
            name_retries: 0,
        };
        let mut scraper = offline();
        let mut rng = StdRng::seed_from_u64(11);
        let result = synthesize_entry(&cats[0], Rarity::Common, &ctx, &mut scraper, &mut rng, |_| false);
        assert!(matches!(result, Err(GenError::TooFewCategories { got: 1 })));
    }
}
