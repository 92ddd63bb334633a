//! Problem descriptor: the search space and the objective.
//!
//! A [`Problem`] is immutable once built. It is cheap to clone (the
//! fitness function is shared behind an `Arc`), which lets every engine
//! own its copy outright.
//!
//! # Examples
//!
//! ```
//! use optimize_hub::problem::{Objective, Problem};
//!
//! let problem = Problem::builder(2)
//!     .uniform_bounds(-5.0, 5.0)
//!     .objective(Objective::Minimize)
//!     .fitness(|x| x.iter().map(|v| v * v).sum())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(problem.dimensions(), 2);
//! assert_eq!(problem.evaluate(&[3.0, 4.0]).unwrap(), 25.0);
//! ```

use crate::error::{FitnessEvaluationError, FitnessFailure, ValidationError};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// Platform ceiling on the number of decision variables.
pub const MAX_DIMENSIONS: usize = 50;

/// Above this many dimensions a run is still allowed but logged as expensive.
const HIGH_DIMENSION_ADVISORY: usize = 30;

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Objective {
    #[default]
    Minimize,
    Maximize,
}

impl Objective {
    /// Strict comparison: `true` only if `candidate` is strictly better
    /// than `incumbent` in this direction.
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Minimize => candidate < incumbent,
            Objective::Maximize => candidate > incumbent,
        }
    }

    /// Index of the best value, taking the first one on ties.
    ///
    /// Returns `None` for an empty slice.
    pub fn best_index(self, values: &[f64]) -> Option<usize> {
        let mut iter = values.iter().enumerate();
        let (mut best_idx, mut best) = iter.next().map(|(i, &v)| (i, v))?;
        for (i, &v) in iter {
            if self.is_better(v, best) {
                best_idx = i;
                best = v;
            }
        }
        Some(best_idx)
    }

    /// A value every finite fitness improves on.
    pub fn worst(self) -> f64 {
        match self {
            Objective::Minimize => f64::INFINITY,
            Objective::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Orders two fitness values best-first.
    pub fn compare(self, a: f64, b: f64) -> std::cmp::Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal);
        match self {
            Objective::Minimize => ord,
            Objective::Maximize => ord.reverse(),
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::Minimize => f.write_str("minimize"),
            Objective::Maximize => f.write_str("maximize"),
        }
    }
}

type FitnessFn = dyn Fn(&[f64]) -> Result<f64, String> + Send + Sync;

/// Immutable specification of a bounded, real-valued optimization problem.
#[derive(Clone)]
pub struct Problem {
    bounds: Vec<(f64, f64)>,
    objective: Objective,
    fitness: Arc<FitnessFn>,
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("dimensions", &self.bounds.len())
            .field("bounds", &self.bounds)
            .field("objective", &self.objective)
            .finish_non_exhaustive()
    }
}

impl Problem {
    /// Starts building a problem with the given number of dimensions.
    pub fn builder(dimensions: usize) -> ProblemBuilder {
        ProblemBuilder {
            dimensions,
            bounds: None,
            objective: Objective::default(),
            fitness: None,
        }
    }

    /// Length of every solution vector.
    pub fn dimensions(&self) -> usize {
        self.bounds.len()
    }

    /// `(lower, upper)` per dimension.
    pub fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Width of the bound interval for dimension `d`.
    pub fn range(&self, d: usize) -> f64 {
        let (lo, hi) = self.bounds[d];
        hi - lo
    }

    /// Whether every coordinate lies within its closed bound interval.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.bounds.len()
            && x
                .iter()
                .zip(&self.bounds)
                .all(|(&v, &(lo, hi))| v >= lo && v <= hi)
    }

    /// Draws a point uniformly inside the bounds.
    pub fn sample_uniform<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.bounds
            .iter()
            .map(|&(lo, hi)| rng.random_range(lo..hi))
            .collect()
    }

    /// Evaluates the objective on `x`.
    ///
    /// Fails if the fitness function reports an error or returns NaN/Inf.
    /// The offending vector is carried in the error.
    pub fn evaluate(&self, x: &[f64]) -> Result<f64, FitnessEvaluationError> {
        let failure = match (self.fitness)(x) {
            Ok(value) if value.is_finite() => return Ok(value),
            Ok(value) => FitnessFailure::NonFinite(value),
            Err(message) => FitnessFailure::Raised(message),
        };
        Err(FitnessEvaluationError {
            solution: x.to_vec(),
            failure,
        })
    }
}

/// Builder for [`Problem`]. Validation happens in [`build`](Self::build).
pub struct ProblemBuilder {
    dimensions: usize,
    bounds: Option<Vec<(f64, f64)>>,
    objective: Objective,
    fitness: Option<Arc<FitnessFn>>,
}

impl ProblemBuilder {
    /// Sets explicit `(lower, upper)` bounds, one pair per dimension.
    pub fn bounds(mut self, bounds: Vec<(f64, f64)>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Uses the same `(lower, upper)` pair for every dimension.
    pub fn uniform_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Some(vec![(lower, upper); self.dimensions]);
        self
    }

    pub fn objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn minimize(self) -> Self {
        self.objective(Objective::Minimize)
    }

    pub fn maximize(self) -> Self {
        self.objective(Objective::Maximize)
    }

    /// Sets an infallible fitness function.
    pub fn fitness<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.fitness = Some(Arc::new(move |x: &[f64]| Ok::<f64, String>(f(x))));
        self
    }

    /// Sets a fitness function that may fail.
    ///
    /// An `Err` aborts the run with a
    /// [`FitnessEvaluationError`](crate::error::FitnessEvaluationError).
    pub fn try_fitness<F, E>(mut self, f: F) -> Self
    where
        F: Fn(&[f64]) -> Result<f64, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.fitness = Some(Arc::new(move |x: &[f64]| {
            f(x).map_err(|e| e.to_string())
        }));
        self
    }

    /// Validates and builds the problem.
    pub fn build(self) -> Result<Problem, ValidationError> {
        if self.dimensions == 0 || self.dimensions > MAX_DIMENSIONS {
            return Err(ValidationError::out_of_range(
                "dimensions",
                self.dimensions,
                format!("1..={MAX_DIMENSIONS}"),
            ));
        }
        if self.dimensions > HIGH_DIMENSION_ADVISORY {
            tracing::warn!(
                dimensions = self.dimensions,
                "high dimension count may increase computation time"
            );
        }

        let bounds = self.bounds.ok_or(ValidationError::DimensionMismatch {
            dimensions: self.dimensions,
            bounds: 0,
        })?;
        if bounds.len() != self.dimensions {
            return Err(ValidationError::DimensionMismatch {
                dimensions: self.dimensions,
                bounds: bounds.len(),
            });
        }
        for (index, &(lower, upper)) in bounds.iter().enumerate() {
            // `!(lower < upper)` also rejects NaN. The width must stay finite
            // for uniform sampling.
            if !lower.is_finite()
                || !upper.is_finite()
                || !(lower < upper)
                || !(upper - lower).is_finite()
            {
                return Err(ValidationError::InvalidBound {
                    index,
                    lower,
                    upper,
                });
            }
        }

        let fitness = self.fitness.ok_or(ValidationError::MissingFitness)?;

        Ok(Problem {
            bounds,
            objective: self.objective,
            fitness,
        })
    }
}
