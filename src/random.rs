//! Seedable randomness helpers shared by the engines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, drawing a fresh seed when absent.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Draws `amount` distinct indices from `0..length`, skipping `exclude`.
///
/// Each call samples independently: indices are unique within one call
/// but may repeat across calls.
///
/// # Panics
///
/// Panics if fewer than `amount` indices are available. Engine
/// configurations validate their population sizes so this cannot happen
/// during a run.
pub fn sample_without_replacement<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    amount: usize,
    exclude: Option<usize>,
) -> Vec<usize> {
    match exclude {
        Some(skip) if skip < length => rand::seq::index::sample(rng, length - 1, amount)
            .into_iter()
            .map(|i| if i >= skip { i + 1 } else { i })
            .collect(),
        _ => rand::seq::index::sample(rng, length, amount).into_vec(),
    }
}

/// One draw from N(0, 1).
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.sample(StandardNormal)
}

/// One draw from N(mean, std).
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    mean + std * standard_normal(rng)
}
