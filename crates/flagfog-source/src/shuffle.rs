//! Date-seeded deterministic pool shuffle.
//!
//! The seed is derived only from the `YYYY-MM-DD` day stamp, so the same
//! date and the same raw provider snapshot always yield the same order,
//! without persisting the chosen country anywhere.

use flagfog_core::{CountryRecord, DayStamp};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use sha2::{Digest, Sha256};

/// Derive the shuffle seed from a day stamp: first 8 bytes of the SHA-256
/// of the `YYYY-MM-DD` string.
pub fn seed_from_stamp(stamp: DayStamp) -> u64 {
    let digest = Sha256::digest(stamp.seed_string().as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Fisher-Yates shuffle driven by a PCG-64 generator seeded from `stamp`.
pub fn shuffle_pool(pool: &mut [CountryRecord], stamp: DayStamp) {
    let mut rng = Pcg64::seed_from_u64(seed_from_stamp(stamp));
    pool.shuffle(&mut rng);
}
