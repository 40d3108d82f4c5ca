use serde::{Deserialize, Serialize};

use crate::moves::Move;
use crate::rarity::Rarity;

/// One generated creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display name, unique within its primary category.
    pub name: String,
    /// The category the entry was generated for.
    pub primary: String,
    /// A second category, never equal to `primary`.
    pub secondary: String,
    /// Scarcity tier.
    pub rarity: Rarity,
    /// Flavor text. A fixed placeholder when synthesis failed.
    pub description: String,
    /// Exactly two moves, both of the primary category.
    pub moves: [Move; 2],
    /// Hit points.
    pub hp: u32,
    /// The category this entry deals extra damage to.
    pub strong_against: String,
}

impl Entry {
    /// Both categories, primary first.
    pub fn categories(&self) -> [&str; 2] {
        [&self.primary, &self.secondary]
    }
}
