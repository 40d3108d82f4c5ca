//! Offline assignment of verbs and adjectives to categories.
//!
//! A word-embedding model decides which words belong to which category:
//! words near a set of combat archetypes become the generic attack pool,
//! the rest go to the nearest category, and thin pools are topped up by
//! widening the distance threshold or borrowing from the category's
//! nearest neighbours in the model.

pub mod config;
pub mod error;
pub mod model;
pub mod partition;
pub mod persist;

pub use config::PartitionConfig;
pub use error::{VocabError, VocabResult};
pub use model::EmbeddingModel;
pub use partition::{Partition, Pools, VocabInput, partition};
pub use persist::{Shortfall, apply_partition, partition_catalog, shortfalls};
