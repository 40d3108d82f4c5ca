//! Rarity-keyed probability tables.

use std::ops::RangeInclusive;

use pm_core::Rarity;
use rand::Rng;
use rand::rngs::StdRng;

/// Damage, cost, and special-effect odds for one move roll.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBand {
    /// Damage range.
    pub damage: RangeInclusive<u32>,
    /// Energy-cost range.
    pub cost: RangeInclusive<u32>,
    /// Chance of a special effect.
    pub special: f64,
}

/// Cost range for moves that deal no damage.
pub const NO_DAMAGE_COST: RangeInclusive<u32> = 1..=2;

/// Chance that a move deals no damage (and gets a forced special effect).
pub fn no_damage_chance(rarity: Rarity) -> f64 {
    match rarity {
        Rarity::Common => 0.3,
        Rarity::Uncommon => 0.2,
        Rarity::Rare => 0.1,
    }
}

/// Pick the stat band for a damaging move. Uncommon and rare tiers
/// occasionally roll a stronger band.
pub fn stat_band(rarity: Rarity, rng: &mut StdRng) -> StatBand {
    match rarity {
        Rarity::Common => StatBand {
            damage: 1..=3,
            cost: 1..=4,
            special: 0.2,
        },
        Rarity::Uncommon => {
            if rng.random::<f64>() < 0.75 {
                StatBand {
                    damage: 1..=3,
                    cost: 1..=4,
                    special: 0.4,
                }
            } else {
                StatBand {
                    damage: 2..=4,
                    cost: 1..=3,
                    special: 0.6,
                }
            }
        }
        Rarity::Rare => {
            if rng.random::<f64>() < 0.75 {
                StatBand {
                    damage: 2..=5,
                    cost: 2..=5,
                    special: 0.4,
                }
            } else {
                StatBand {
                    damage: 2..=6,
                    cost: 1..=5,
                    special: 0.4,
                }
            }
        }
    }
}

/// Hit-point range per tier.
pub fn hp_range(rarity: Rarity) -> RangeInclusive<u32> {
    match rarity {
        Rarity::Common => 2..=5,
        Rarity::Uncommon => 3..=7,
        Rarity::Rare => 5..=12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn rarer_means_fewer_duds() {
        assert!(no_damage_chance(Rarity::Common) > no_damage_chance(Rarity::Uncommon));
        assert!(no_damage_chance(Rarity::Uncommon) > no_damage_chance(Rarity::Rare));
    }

    #[test]
    fn bands_stay_within_tier_limits() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let c = stat_band(Rarity::Common, &mut rng);
            assert_eq!(c.damage, 1..=3);
            let u = stat_band(Rarity::Uncommon, &mut rng);
            assert!(*u.damage.end() <= 4 && *u.cost.start() >= 1);
            let r = stat_band(Rarity::Rare, &mut rng);
            assert!(*r.damage.start() >= 2 && *r.damage.end() <= 6);
            assert!((r.special - 0.4).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn both_uncommon_bands_occur() {
        let mut rng = StdRng::seed_from_u64(5);
        let strong = (0..400)
            .filter(|_| stat_band(Rarity::Uncommon, &mut rng).damage == (2..=4))
            .count();
        assert!(strong > 40 && strong < 200, "{strong}");
    }

    #[test]
    fn hp_ranges() {
        assert_eq!(hp_range(Rarity::Common), 2..=5);
        assert_eq!(hp_range(Rarity::Uncommon), 3..=7);
        assert_eq!(hp_range(Rarity::Rare), 5..=12);
    }
}
