//! ACOR configuration.

use crate::engine::{require_finite, validate_run_limits, DEFAULT_TIMEOUT};
use crate::error::ValidationError;
use std::time::Duration;

/// Smallest colony accepted by [`AcorConfig::validate`].
pub const MIN_COLONY_SIZE: usize = 5;

/// Parameters for Ant Colony Optimization in continuous domains.
///
/// ```
/// use optimize_hub::acor::AcorConfig;
///
/// let config = AcorConfig::default()
///     .with_archive_size(20)
///     .with_colony_size(40)
///     .with_locality(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcorConfig {
    /// New candidates (ants) built per iteration.
    pub colony_size: usize,

    pub max_iterations: usize,

    /// Solutions kept in the archive, `k`.
    pub archive_size: usize,

    /// Locality `q`. Small values concentrate sampling on the top ranks.
    pub q: f64,

    /// Convergence speed `xi` in `(0, 1]`, scales the sampling spread.
    pub xi: f64,

    pub timeout: Duration,
    pub seed: Option<u64>,
}

impl Default for AcorConfig {
    fn default() -> Self {
        Self {
            colony_size: 30,
            max_iterations: 50,
            archive_size: 10,
            q: 0.01,
            xi: 0.85,
            timeout: DEFAULT_TIMEOUT,
            seed: None,
        }
    }
}

impl AcorConfig {
    pub fn with_colony_size(mut self, n: usize) -> Self {
        self.colony_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_archive_size(mut self, k: usize) -> Self {
        self.archive_size = k;
        self
    }

    /// Sets the locality parameter `q`.
    pub fn with_locality(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the convergence speed `xi`.
    pub fn with_convergence_speed(mut self, xi: f64) -> Self {
        self.xi = xi;
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
        if self.colony_size < MIN_COLONY_SIZE {
            return Err(ValidationError::out_of_range(
                "colony_size",
                self.colony_size,
                format!(">= {MIN_COLONY_SIZE}"),
            ));
        }
        if self.archive_size == 0 {
            return Err(ValidationError::out_of_range(
                "archive_size",
                self.archive_size,
                ">= 1",
            ));
        }
        if self.archive_size > self.colony_size {
            return Err(ValidationError::conflict(
                "archive_size, colony_size",
                format!(
                    "archive_size ({}) cannot exceed colony_size ({})",
                    self.archive_size, self.colony_size
                ),
            ));
        }
        validate_run_limits(self.max_iterations, self.timeout)?;
        require_finite("q", self.q)?;
        if self.q <= 0.0 {
            return Err(ValidationError::out_of_range("q", self.q, "> 0"));
        }
        require_finite("xi", self.xi)?;
        if !(self.xi > 0.0 && self.xi <= 1.0) {
            return Err(ValidationError::out_of_range("xi", self.xi, "(0, 1]"));
        }
        Ok(())
    }
}
