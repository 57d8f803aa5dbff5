//! # Flagfog Game
//!
//! The daily puzzle state manager. One country per UTC day, selected
//! deterministically from the seed-shuffled pool; derived artifacts
//! (blurred/unblurred flag, hint fields) cached for the remainder of the
//! day; atomic reset at UTC midnight; bounded hint progression per guess.
//!
//! Invariants:
//! - exactly one country per day stamp
//! - the cache entry is valid iff its stamp equals the current UTC date
//! - hint levels are strictly ordered and reveal nothing from a higher
//!   level
//! - at most one derivation runs concurrently for a given day stamp

pub mod cache;
pub mod guess;
pub mod manager;

pub use cache::PuzzleCache;
pub use guess::{evaluate, normalize, MAX_HINT_LEVEL};
pub use manager::DailyPuzzleManager;
