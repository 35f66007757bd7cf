//! Integer draws from the single generator threaded through the pipeline.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform draw from `0..bound`.
pub(crate) fn random_below<R: Rng>(rng: &mut R, bound: usize) -> usize {
    debug_assert!(bound > 0);
    (rng.next_u64() % bound as u64) as usize
}

/// Uniform draw from `min..=max`.
pub(crate) fn random_inclusive<R: Rng>(rng: &mut R, min_value: usize, max_value: usize) -> usize {
    debug_assert!(min_value <= max_value);
    min_value + random_below(rng, max_value - min_value + 1)
}
