use std::fmt;

use serde::{Deserialize, Serialize};

/// How scarce a creature is. Ordered from most to least common.
///
/// Every probability table in move and entry synthesis is keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// The bulk of every category.
    Common,
    /// Somewhat stronger, somewhat rarer.
    Uncommon,
    /// The strongest and scarcest tier.
    Rare,
}

impl Rarity {
    /// All tiers, most common first.
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];

    /// The lowercase tier name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
