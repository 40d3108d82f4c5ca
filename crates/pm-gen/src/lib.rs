//! Procedural generation of Procemon rosters.
//!
//! The [`Dex`] builder picks categories, allocates rarity tiers, and asks
//! the entry synthesizer for each creature. Entries get a composite name
//! with phonotactic repair, Markov-chain flavor text seeded from scraped
//! prose, two moves from rarity-keyed probability tables, and hit points.
//! All randomness comes from one seeded RNG and all run-level caches are
//! owned by the builder.

pub mod config;
pub mod dex;
pub mod entry;
pub mod error;
pub mod flavor;
pub mod lexicon;
pub mod markov;
pub mod moves;
pub mod naming;
pub mod tables;

pub use config::DexConfig;
pub use dex::{Dex, ImagePool, allocate_rarities, assign_colors};
pub use entry::{EntryContext, synthesize_entry};
pub use error::{GenError, GenResult};
pub use lexicon::Lexicon;
pub use markov::MarkovText;
pub use moves::{MoveRequest, synthesize_move};
pub use naming::compose_name;
