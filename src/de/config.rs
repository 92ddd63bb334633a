//! DE configuration and mutation strategies.

use crate::boundary::BoundaryPolicy;
use crate::engine::{require_finite, validate_run_limits, DEFAULT_TIMEOUT};
use crate::error::ValidationError;
use std::fmt;
use std::time::Duration;

/// Smallest population accepted by [`DeConfig::validate`].
pub const MIN_POPULATION_SIZE: usize = 10;

/// Mutation strategy. All three use binomial crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DeStrategy {
    /// `a + F·(b − c)`: explorative, the classic default.
    #[default]
    Rand1,

    /// `best + F·(b − c)`: greedy, converges fast on unimodal landscapes.
    Best1,

    /// `a + F·(b − c + d − e)`: wider steps, more diversity.
    Rand2,
}

impl DeStrategy {
    /// Distinct population members, other than the target, one mutant needs.
    pub fn donors(self) -> usize {
        match self {
            DeStrategy::Rand1 => 3,
            DeStrategy::Best1 => 2,
            DeStrategy::Rand2 => 5,
        }
    }
}

impl fmt::Display for DeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeStrategy::Rand1 => "rand/1/bin",
            DeStrategy::Best1 => "best/1/bin",
            DeStrategy::Rand2 => "rand/2/bin",
        })
    }
}

/// Parameters for Differential Evolution.
///
/// ```
/// use optimize_hub::boundary::BoundaryPolicy;
/// use optimize_hub::de::{DeConfig, DeStrategy};
///
/// let config = DeConfig::default()
///     .with_strategy(DeStrategy::Best1)
///     .with_boundary(BoundaryPolicy::Reflect)
///     .with_differential_weight(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeConfig {
    pub population_size: usize,
    pub max_iterations: usize,

    /// Differential weight `F`, in `(0, 2]`.
    pub f: f64,

    /// Crossover probability `CR`, in `[0, 1]`.
    pub cr: f64,

    pub strategy: DeStrategy,

    /// Applied to the mutant and again to the trial vector.
    pub boundary: BoundaryPolicy,

    pub timeout: Duration,
    pub seed: Option<u64>,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_iterations: 50,
            f: 0.8,
            cr: 0.9,
            strategy: DeStrategy::default(),
            boundary: BoundaryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
            seed: None,
        }
    }
}

impl DeConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the differential weight `F`.
    pub fn with_differential_weight(mut self, f: f64) -> Self {
        self.f = f;
        self
    }

    /// Sets the crossover probability `CR`.
    pub fn with_crossover_probability(mut self, cr: f64) -> Self {
        self.cr = cr;
        self
    }

    pub fn with_strategy(mut self, strategy: DeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.population_size < MIN_POPULATION_SIZE {
            return Err(ValidationError::out_of_range(
                "population_size",
                self.population_size,
                format!(">= {MIN_POPULATION_SIZE}"),
            ));
        }
        if self.population_size - 1 < self.strategy.donors() {
            return Err(ValidationError::conflict(
                "population_size, strategy",
                format!(
                    "{} needs at least {} members besides the target, population_size is {}",
                    self.strategy,
                    self.strategy.donors(),
                    self.population_size
                ),
            ));
        }
        validate_run_limits(self.max_iterations, self.timeout)?;
        require_finite("F", self.f)?;
        if !(self.f > 0.0 && self.f <= 2.0) {
            return Err(ValidationError::out_of_range("F", self.f, "(0, 2]"));
        }
        require_finite("CR", self.cr)?;
        if !(0.0..=1.0).contains(&self.cr) {
            return Err(ValidationError::out_of_range("CR", self.cr, "[0, 1]"));
        }
        Ok(())
    }
}
