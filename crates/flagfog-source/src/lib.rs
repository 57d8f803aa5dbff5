//! # Flagfog Source
//!
//! Candidate country pool for the daily puzzle.
//!
//! Fetches the full country list from the REST Countries provider, filters
//! it to records with population > 500,000 and a resolvable country code +
//! flag URL, writes the sorted autocomplete name list as a side effect, and
//! shuffles the pool with a PCG-64 generator seeded from the day stamp.
//!
//! Determinism: for a fixed day stamp and a fixed provider snapshot, two
//! independent fetches produce the same ordering, across process restarts.

pub mod backup;
pub mod provider;
pub mod shuffle;

pub use backup::backup_pool;
pub use provider::RestCountriesSource;
pub use shuffle::{seed_from_stamp, shuffle_pool};
