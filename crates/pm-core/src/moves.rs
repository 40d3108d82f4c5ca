use std::fmt;

use serde::{Deserialize, Serialize};

/// One combat action belonging to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Name of the category the move belongs to.
    pub category: String,
    /// Display name, e.g. "Molten Scorch".
    pub name: String,
    /// Damage dealt. Zero-damage moves always carry a special effect.
    pub damage: u32,
    /// Energy cost, at least 1.
    pub cost: u32,
    /// Special-effect text. Empty means none.
    pub special: String,
}

impl Move {
    /// Whether this move has a special effect.
    pub fn has_special(&self) -> bool {
        !self.special.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cost {}, damage {})", self.name, self.cost, self.damage)?;
        if self.has_special() {
            write!(f, " {}", self.special)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_special() {
        let m = Move {
            category: "fire".into(),
            name: "Hot Burn".into(),
            damage: 0,
            cost: 1,
            special: "Add 1 Fire counter.".into(),
        };
        assert!(m.has_special());
        assert_eq!(m.to_string(), "Hot Burn (cost 1, damage 0) Add 1 Fire counter.");
    }
}
