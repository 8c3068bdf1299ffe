//! Seed resolution and per-worker seed derivation.
//!
//! Every parallel sampler owns an independent copy of its source
//! distribution, reseeded from an explicit top-level seed. Worker seeds are
//! derived with a SplitMix64 step so that adjacent worker indices land far
//! apart in the underlying stream.

use std::time::{SystemTime, UNIX_EPOCH};

/// SplitMix64 increment (golden-ratio constant).
const SPLITMIX_GAMMA: u64 = 0x9e3779b97f4a7c15;

/// Resolve an optional fixed seed into a concrete one.
///
/// `Some(seed)` is reproducible mode; `None` is production mode and derives
/// a seed from the current wall clock.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(SPLITMIX_GAMMA),
    }
}

/// Derive the seed for worker `index` from a top-level seed.
///
/// SplitMix64 finalizer over `seed + (index + 1) * gamma`; bijective in the
/// index for a fixed seed, so no two workers share a seed.
pub fn worker_seed(seed: u64, index: usize) -> u64 {
    let mut z = seed.wrapping_add((index as u64 + 1).wrapping_mul(SPLITMIX_GAMMA));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
