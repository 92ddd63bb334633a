//! Real-coded genetic operators.
//!
//! # Crossover
//!
//! - [`sbx_crossover`]: Simulated Binary Crossover, Deb & Agrawal (1995)
//!
//! # Mutation
//!
//! - [`polynomial_mutation`]: Deb & Goyal (1996), step scaled by the
//!   bound range of each gene
//!
//! Neither operator enforces bounds; the caller clips afterwards.

use rand::Rng;

/// Distribution index shared by both operators. Larger keeps children
/// closer to their parents.
pub const DISTRIBUTION_INDEX: f64 = 20.0;

/// Parent genes closer than this are treated as equal and left alone.
const GENE_EPSILON: f64 = 1e-14;

/// Simulated Binary Crossover.
///
/// Each gene is recombined with probability 0.5; otherwise both children
/// inherit it unchanged. The children are symmetric around the parents'
/// midpoint.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn sbx_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    eta: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    let exponent = 1.0 / (eta + 1.0);

    for i in 0..parent1.len() {
        if rng.random::<f64>() > 0.5 {
            continue;
        }
        let (x1, x2) = (parent1[i], parent2[i]);
        if (x1 - x2).abs() <= GENE_EPSILON {
            continue;
        }
        let u: f64 = rng.random();
        let beta = if u <= 0.5 {
            (2.0 * u).powf(exponent)
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(exponent)
        };
        child1[i] = 0.5 * ((1.0 + beta) * x1 + (1.0 - beta) * x2);
        child2[i] = 0.5 * ((1.0 - beta) * x1 + (1.0 + beta) * x2);
    }

    (child1, child2)
}

/// Polynomial mutation, in place.
///
/// Each gene mutates independently with probability `rate` by
/// `delta · (upper − lower)`, where `delta ∈ [−1, 1]` follows the
/// polynomial distribution with index `eta`.
pub fn polynomial_mutation<R: Rng>(
    genes: &mut [f64],
    bounds: &[(f64, f64)],
    rate: f64,
    eta: f64,
    rng: &mut R,
) {
    let exponent = 1.0 / (eta + 1.0);
    for (gene, &(lower, upper)) in genes.iter_mut().zip(bounds) {
        if rng.random::<f64>() >= rate {
            continue;
        }
        let u: f64 = rng.random();
        let delta = if u < 0.5 {
            (2.0 * u).powf(exponent) - 1.0
        } else {
            1.0 - (2.0 * (1.0 - u)).powf(exponent)
        };
        *gene += delta * (upper - lower);
    }
}
