//! Move synthesis: name, cost, damage, and special-effect text.

use pm_core::{Move, Rarity};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::tables::{NO_DAMAGE_COST, no_damage_chance, stat_band};

/// What creatures are called in effect text.
pub const CREATURE: &str = "Procemon";
/// Verb used when every verb pool is empty.
pub const FALLBACK_VERB: &str = "strike";

/// Everything needed to roll one move.
#[derive(Debug, Clone, Copy)]
pub struct MoveRequest<'a> {
    /// Owning category name.
    pub category: &'a str,
    /// Rarity of the creature the move belongs to.
    pub rarity: Rarity,
    /// Verbs associated with the category.
    pub type_verbs: &'a [String],
    /// Adjectives associated with the category.
    pub type_adjectives: &'a [String],
    /// Category-agnostic attack verbs.
    pub attack_verbs: &'a [String],
    /// The run's mood subset.
    pub moods: &'a [String],
    /// Never roll a zero-damage move.
    pub force_damage: bool,
    /// Never add a special effect to a damaging move.
    pub force_no_special: bool,
}

/// Roll one move.
///
/// A zero-damage move always costs 1 or 2 and always has a special
/// effect, even under `force_no_special`.
pub fn synthesize_move(req: &MoveRequest<'_>, rng: &mut StdRng) -> Move {
    let no_damage = if req.force_damage {
        0.0
    } else {
        no_damage_chance(req.rarity)
    };

    let (damage, cost, special) = if rng.random::<f64>() < no_damage {
        (0, rng.random_range(NO_DAMAGE_COST), true)
    } else {
        let band = stat_band(req.rarity, rng);
        let damage = rng.random_range(band.damage);
        let cost = rng.random_range(band.cost);
        let special = rng.random::<f64>() < band.special && !req.force_no_special;
        (damage, cost, special)
    };

    let name = move_name(req, damage, rng);
    let special = if special {
        special_effect(req.category, damage, req.moods, rng)
    } else {
        String::new()
    };

    Move {
        category: req.category.to_string(),
        name,
        damage,
        cost,
        special,
    }
}

fn move_name(req: &MoveRequest<'_>, damage: u32, rng: &mut StdRng) -> String {
    let adjective = if rng.random::<f64>() < 0.75 {
        req.type_adjectives.choose(rng)
    } else {
        None
    };

    // Damaging moves split between category and generic verbs; support
    // moves always sound like their category.
    let use_type_verb = damage == 0 || rng.random::<f64>() < 0.5;
    let (first, second) = if use_type_verb {
        (req.type_verbs, req.attack_verbs)
    } else {
        (req.attack_verbs, req.type_verbs)
    };
    let verb = first
        .choose(rng)
        .or_else(|| second.choose(rng))
        .map(String::as_str)
        .unwrap_or(FALLBACK_VERB);

    match adjective {
        Some(adj) => title_case(&format!("{adj} {verb}")),
        None => title_case(verb),
    }
}

/// Build the special-effect sentence, optionally behind a die roll.
fn special_effect(category: &str, damage: u32, moods: &[String], rng: &mut StdRng) -> String {
    let conditional = if rng.random::<f64>() < 0.4 {
        Some(format!(
            "Roll a die. If the roll is at least {}, ",
            rng.random_range(2..=5)
        ))
    } else {
        None
    };

    let mut effect = None;
    if damage > 0 && rng.random::<f64>() < 0.3 {
        let amount = rng.random_range(1..=3);
        effect = Some(if rng.random::<f64>() < 0.34 {
            format!("+{amount} damage.")
        } else {
            format!("This {CREATURE} deals {amount} damage to itself.")
        });
    }
    if effect.is_none() && !moods.is_empty() && rng.random::<f64>() < 0.7 {
        let mood = &moods[rng.random_range(0..moods.len())];
        effect = Some(if rng.random::<f64>() < 0.33 {
            format!("This {CREATURE} is now {mood}.")
        } else {
            format!("The defending {CREATURE} is now {mood}.")
        });
    }
    let effect = effect.unwrap_or_else(|| {
        let n = rng.random_range(1..=4);
        let plural = if n == 1 { "" } else { "s" };
        format!("Add {n} {} counter{plural}.", title_case(category))
    });

    match conditional {
        Some(cond) => format!("{cond}{}", lower_first(&effect)),
        None => effect,
    }
}

/// Capitalize the first letter of every whitespace-separated word.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    struct Pools {
        verbs: Vec<String>,
        adjectives: Vec<String>,
        attack: Vec<String>,
        moods: Vec<String>,
    }

    fn pools() -> Pools {
        Pools {
            verbs: words(&["scorch", "ignite", "smolder"]),
            adjectives: words(&["molten", "fiery"]),
            attack: words(&["strike", "bash"]),
            moods: words(&["sleepy", "angry", "confused"]),
        }
    }

    fn request(p: &Pools, rarity: Rarity) -> MoveRequest<'_> {
        MoveRequest {
            category: "fire",
            rarity,
            type_verbs: &p.verbs,
            type_adjectives: &p.adjectives,
            attack_verbs: &p.attack,
            moods: &p.moods,
            force_damage: false,
            force_no_special: false,
        }
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("molten  SCORCH"), "Molten Scorch");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn zero_damage_moves_use_category_verbs() {
        let p = pools();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = 0;
        for _ in 0..300 {
            let m = synthesize_move(&request(&p, Rarity::Common), &mut rng);
            if m.damage == 0 {
                seen += 1;
                let verb = m.name.split(' ').next_back().unwrap().to_lowercase();
                assert!(p.verbs.contains(&verb), "{}", m.name);
            }
        }
        assert!(seen > 0);
    }

    #[test]
    fn force_damage_never_rolls_zero() {
        let p = pools();
        let mut rng = StdRng::seed_from_u64(2);
        let req = MoveRequest {
            force_damage: true,
            ..request(&p, Rarity::Common)
        };
        for _ in 0..300 {
            assert!(synthesize_move(&req, &mut rng).damage > 0);
        }
    }

    #[test]
    fn force_no_special_only_spares_duds() {
        let p = pools();
        let mut rng = StdRng::seed_from_u64(3);
        let req = MoveRequest {
            force_no_special: true,
            ..request(&p, Rarity::Uncommon)
        };
        for _ in 0..300 {
            let m = synthesize_move(&req, &mut rng);
            assert_eq!(m.has_special(), m.damage == 0, "{m:?}");
        }
    }

    #[test]
    fn specials_cover_every_effect_kind() {
        let p = pools();
        let mut rng = StdRng::seed_from_u64(4);
        let specials: Vec<String> = (0..2000)
            .map(|_| synthesize_move(&request(&p, Rarity::Rare), &mut rng).special)
            .filter(|s| !s.is_empty())
            .collect();
        assert!(specials.iter().any(|s| s.contains("damage.")));
        assert!(specials.iter().any(|s| s.contains("to itself")));
        assert!(specials.iter().any(|s| s.contains("The defending Procemon is now")));
        assert!(specials.iter().any(|s| s.ends_with("Fire counter.")));
        assert!(specials.iter().any(|s| s.ends_with("Fire counters.")));
        assert!(
            specials
                .iter()
                .any(|s| s.starts_with("Roll a die. If the roll is at least "))
        );
        for s in specials.iter().filter(|s| s.starts_with("Roll a die")) {
            let rest = s.split(", ").nth(1).unwrap();
            let first = rest.chars().next().unwrap();
            assert!(!first.is_uppercase() || rest.starts_with("Fire"), "{s}");
        }
    }

    #[test]
    fn moodless_runs_fall_back_to_counters() {
        let mut p = pools();
        p.moods.clear();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..300 {
            let m = synthesize_move(&request(&p, Rarity::Common), &mut rng);
            assert!(!m.special.contains(" is now "), "{}", m.special);
        }
    }

    #[test]
    fn single_word_pools_still_name_moves() {
        let p = Pools {
            verbs: words(&["glow"]),
            adjectives: words(&["dim"]),
            attack: vec![],
            moods: words(&["sleepy"]),
        };
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..100 {
            let m = synthesize_move(&request(&p, Rarity::Rare), &mut rng);
            assert!(m.name == "Glow" || m.name == "Dim Glow", "{}", m.name);
        }
    }

    #[test]
    fn empty_pools_use_fallback_verb() {
        let p = Pools {
            verbs: vec![],
            adjectives: vec![],
            attack: vec![],
            moods: vec![],
        };
        let mut rng = StdRng::seed_from_u64(7);
        let m = synthesize_move(&request(&p, Rarity::Common), &mut rng);
        assert_eq!(m.name, "Strike");
    }

    proptest! {
        #[test]
        fn zero_damage_implies_cheap_special(seed in any::<u64>(), tier in 0usize..3, fd in any::<bool>(), fns in any::<bool>()) {
            let p = pools();
            let mut rng = StdRng::seed_from_u64(seed);
            let req = MoveRequest {
                force_damage: fd,
                force_no_special: fns,
                ..request(&p, Rarity::ALL[tier])
            };
            let m = synthesize_move(&req, &mut rng);
            prop_assert!(m.cost >= 1);
            prop_assert!(!m.name.is_empty());
            if m.damage == 0 {
                prop_assert!(m.has_special());
                prop_assert!(m.cost <= 2);
            }
        }
    }
}
