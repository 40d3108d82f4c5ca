//! Core types for Procemon: categories, moves, entries, and the roster.
//!
//! This crate defines the data model that the generators fill in. It knows
//! nothing about randomness or the network; you can construct a [`Roster`]
//! by hand or read one back from its JSON file.

/// Category definitions and the on-disk catalog.
pub mod category;
/// Generated creatures.
pub mod entry;
/// Error types used throughout the crate.
pub mod error;
/// Combat moves.
pub mod moves;
/// The fixed card color palette.
pub mod palette;
/// Scarcity tiers.
pub mod rarity;
/// The roster ("dex") that owns every generated entry.
pub mod roster;

/// Re-export category types.
pub use category::{Catalog, Category};
/// Re-export the entry type.
pub use entry::Entry;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the move type.
pub use moves::Move;
/// Re-export palette types.
pub use palette::{PALETTE, PaletteColor};
/// Re-export the rarity tier.
pub use rarity::Rarity;
/// Re-export roster types.
pub use roster::{Roster, RosterMeta};
