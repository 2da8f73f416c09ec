//! Relation store — the in-memory `User` and `Tweet` tables.
//!
//! All reads and writes go through [`RelationStore`]. Both tables sit behind
//! one lock: mutations are serialized, reads see the latest committed state.

pub mod engine;
pub mod seed;
pub mod types;

pub use engine::RelationStore;
pub use seed::Seed;
pub use types::{IdPolicy, StoreStats, Tweet, User};
