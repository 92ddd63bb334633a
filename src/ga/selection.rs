//! Parent selection for the GA.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::problem::Objective;
use crate::random::sample_without_replacement;
use rand::Rng;

/// k-way tournament selection.
///
/// Draws `k` distinct individuals uniformly and returns the index of the
/// strictly best one, keeping the first drawn on ties.
///
/// Higher `k` means stronger selection pressure:
/// - k=2: light pressure (good for diversity)
/// - k=3-5: moderate pressure (typical default)
/// - k>5: strong pressure (risk of premature convergence)
///
/// # Panics
/// Panics if `k > fitness.len()`. [`GaConfig::validate`](super::GaConfig::validate)
/// rules this out.
pub fn tournament<R: Rng>(fitness: &[f64], k: usize, objective: Objective, rng: &mut R) -> usize {
    let entrants = sample_without_replacement(rng, fitness.len(), k, None);
    let mut winner = entrants[0];
    for &idx in &entrants[1..] {
        if objective.is_better(fitness[idx], fitness[winner]) {
            winner = idx;
        }
    }
    winner
}
