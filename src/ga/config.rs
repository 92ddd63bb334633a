//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::algorithm::AlgorithmKind;
use crate::engine::{
    log_population_advisory, require_finite, validate_run_limits, DEFAULT_TIMEOUT,
};
use crate::error::ValidationError;
use std::time::Duration;

/// Smallest population that keeps enough genetic diversity.
pub const MIN_POPULATION_SIZE: usize = 10;

/// Above this per-gene mutation rate the search degrades into random walk.
const HIGH_MUTATION_ADVISORY: f64 = 0.5;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use optimize_hub::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.tournament_size, 3);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use optimize_hub::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Number of generations.
    pub max_iterations: usize,

    /// Probability of applying SBX to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the children are copies of the parents.
    pub crossover_rate: f64,

    /// Per-gene probability of polynomial mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of distinct entrants per tournament.
    pub tournament_size: usize,

    pub timeout: Duration,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_iterations: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            tournament_size: 3,
            timeout: DEFAULT_TIMEOUT,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the random seed for reproducibility.
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
        validate_run_limits(self.max_iterations, self.timeout)?;
        require_finite("crossover_rate", self.crossover_rate)?;
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ValidationError::out_of_range(
                "crossover_rate",
                self.crossover_rate,
                "[0.0, 1.0]",
            ));
        }
        require_finite("mutation_rate", self.mutation_rate)?;
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ValidationError::out_of_range(
                "mutation_rate",
                self.mutation_rate,
                "[0.0, 1.0]",
            ));
        }
        if self.tournament_size < 2 {
            return Err(ValidationError::out_of_range(
                "tournament_size",
                self.tournament_size,
                ">= 2",
            ));
        }
        if self.tournament_size > self.population_size {
            return Err(ValidationError::conflict(
                "tournament_size, population_size",
                format!(
                    "tournament_size ({}) cannot exceed population_size ({})",
                    self.tournament_size, self.population_size
                ),
            ));
        }
        Ok(())
    }

    pub(crate) fn log_advisories(&self) {
        if self.mutation_rate > HIGH_MUTATION_ADVISORY {
            tracing::warn!(
                mutation_rate = self.mutation_rate,
                "high mutation rate may prevent convergence"
            );
        }
        log_population_advisory(AlgorithmKind::Ga, "population_size", self.population_size);
    }
}
