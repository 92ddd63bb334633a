//! Standard continuous test functions.
//!
//! All five have their global minimum `0` at the origin, except
//! Rosenbrock whose minimum sits at `(1, …, 1)`.
//!
//! ```
//! use optimize_hub::benchmarks::Benchmark;
//!
//! let rastrigin = Benchmark::by_name("rastrigin").unwrap();
//! assert!(rastrigin.evaluate(&[0.0, 0.0]).abs() < 1e-12);
//! assert_eq!(rastrigin.recommended_bounds(2), vec![(-5.12, 5.12); 2]);
//! ```

use crate::error::ValidationError;
use crate::problem::Problem;
use std::f64::consts::{E, PI};

/// Bound applied by [`recommended_bounds`] to unknown names.
pub const FALLBACK_BOUND: (f64, f64) = (-10.0, 10.0);

/// Sum of squares. Unimodal, separable.
#[must_use]
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

/// Highly multimodal with a regular lattice of local minima.
#[must_use]
pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
            .sum::<f64>()
}

/// Narrow curved valley. Minimum at `(1, …, 1)`.
#[must_use]
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = 1.0 - w[0];
            100.0 * a * a + b * b
        })
        .sum()
}

/// Nearly flat outer region with a deep central funnel.
#[must_use]
pub fn ackley(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|v| v * v).sum();
    let sum_cos: f64 = x.iter().map(|v| (2.0 * PI * v).cos()).sum();
    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
}

/// Many widespread, regularly distributed local minima.
#[must_use]
pub fn griewank(x: &[f64]) -> f64 {
    let sum = x.iter().map(|v| v * v).sum::<f64>() / 4000.0;
    let product: f64 = x
        .iter()
        .enumerate()
        .map(|(i, v)| (v / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - product + 1.0
}

/// The benchmark functions by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Benchmark {
    Sphere,
    Rastrigin,
    Rosenbrock,
    Ackley,
    Griewank,
}

impl Benchmark {
    pub fn all() -> [Benchmark; 5] {
        [
            Benchmark::Sphere,
            Benchmark::Rastrigin,
            Benchmark::Rosenbrock,
            Benchmark::Ackley,
            Benchmark::Griewank,
        ]
    }

    /// Looks up a benchmark by its lowercase name.
    pub fn by_name(name: &str) -> Option<Benchmark> {
        Benchmark::all().into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Benchmark::Sphere => "sphere",
            Benchmark::Rastrigin => "rastrigin",
            Benchmark::Rosenbrock => "rosenbrock",
            Benchmark::Ackley => "ackley",
            Benchmark::Griewank => "griewank",
        }
    }

    pub fn evaluate(self, x: &[f64]) -> f64 {
        match self {
            Benchmark::Sphere => sphere(x),
            Benchmark::Rastrigin => rastrigin(x),
            Benchmark::Rosenbrock => rosenbrock(x),
            Benchmark::Ackley => ackley(x),
            Benchmark::Griewank => griewank(x),
        }
    }

    /// Conventional per-dimension search interval.
    pub fn bound(self) -> (f64, f64) {
        match self {
            Benchmark::Sphere | Benchmark::Rastrigin => (-5.12, 5.12),
            Benchmark::Rosenbrock => (-2.048, 2.048),
            Benchmark::Ackley => (-32.768, 32.768),
            Benchmark::Griewank => (-600.0, 600.0),
        }
    }

    pub fn recommended_bounds(self, dimensions: usize) -> Vec<(f64, f64)> {
        vec![self.bound(); dimensions]
    }

    /// Location of the global minimum.
    pub fn optimum(self, dimensions: usize) -> Vec<f64> {
        let at = if self == Benchmark::Rosenbrock { 1.0 } else { 0.0 };
        vec![at; dimensions]
    }

    /// A minimization problem over the recommended bounds.
    pub fn problem(self, dimensions: usize) -> Result<Problem, ValidationError> {
        Problem::builder(dimensions)
            .bounds(self.recommended_bounds(dimensions))
            .minimize()
            .fitness(move |x| self.evaluate(x))
            .build()
    }
}

/// Recommended bounds for a benchmark name, falling back to
/// [`FALLBACK_BOUND`] for names that are not benchmarks.
pub fn recommended_bounds(name: &str, dimensions: usize) -> Vec<(f64, f64)> {
    let bound = Benchmark::by_name(name).map_or(FALLBACK_BOUND, Benchmark::bound);
    vec![bound; dimensions]
}
