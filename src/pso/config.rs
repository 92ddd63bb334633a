//! PSO configuration.

use crate::algorithm::AlgorithmKind;
use crate::engine::{
    log_population_advisory, require_finite, validate_run_limits, DEFAULT_TIMEOUT,
};
use crate::error::ValidationError;
use std::time::Duration;

/// Smallest swarm that still behaves like a swarm.
pub const MIN_SWARM_SIZE: usize = 10;

/// Parameters for Particle Swarm Optimization.
///
/// Builders store values as given; [`validate`](Self::validate) decides
/// whether they are acceptable.
///
/// ```
/// use optimize_hub::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_swarm_size(40)
///     .with_inertia(0.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles.
    pub swarm_size: usize,

    pub max_iterations: usize,

    /// Inertia weight `w`.
    ///
    /// Values outside `[0, 1)` are accepted for research variants but logged.
    pub w: f64,

    /// Cognitive coefficient: pull towards each particle's personal best.
    pub c1: f64,

    /// Social coefficient: pull towards the global best.
    pub c2: f64,

    pub timeout: Duration,

    /// `None` draws a fresh seed per engine.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 30,
            max_iterations: 50,
            w: 0.7,
            c1: 1.5,
            c2: 1.5,
            timeout: DEFAULT_TIMEOUT,
            seed: None,
        }
    }
}

impl PsoConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    /// Sets the cognitive and social coefficients.
    pub fn with_coefficients(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
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
        if self.swarm_size < MIN_SWARM_SIZE {
            return Err(ValidationError::out_of_range(
                "swarm_size",
                self.swarm_size,
                format!(">= {MIN_SWARM_SIZE}"),
            ));
        }
        validate_run_limits(self.max_iterations, self.timeout)?;
        require_finite("w", self.w)?;
        require_finite("c1", self.c1)?;
        require_finite("c2", self.c2)?;
        if self.c1 == 0.0 && self.c2 == 0.0 {
            return Err(ValidationError::conflict(
                "c1, c2",
                "both coefficients are zero so particles would not move; \
                 use c1 > 0 for cognition-only or c2 > 0 for social-only PSO",
            ));
        }
        Ok(())
    }

    pub(crate) fn log_advisories(&self) {
        if self.w < 0.0 {
            tracing::warn!(w = self.w, "negative inertia weight is non-standard");
        } else if self.w >= 1.0 {
            tracing::warn!(w = self.w, "inertia weight >= 1 may cause divergence");
        }
        log_population_advisory(AlgorithmKind::Pso, "swarm_size", self.swarm_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PsoConfig::default();
        assert_eq!(config.swarm_size, 30);
        assert_eq!(config.max_iterations, 50);
        assert!((config.w - 0.7).abs() < 1e-10);
        assert!((config.c1 - 1.5).abs() < 1e-10);
        assert!((config.c2 - 1.5).abs() < 1e-10);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_does_not_clamp() {
        let config = PsoConfig::default()
            .with_swarm_size(5)
            .with_inertia(-0.4)
            .with_coefficients(-1.0, 3.0);
        assert_eq!(config.swarm_size, 5);
        assert!((config.w + 0.4).abs() < 1e-12);
        assert!((config.c1 + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_small_swarm() {
        let err = PsoConfig::default().with_swarm_size(5).validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "swarm_size",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_both_coefficients_zero() {
        let err = PsoConfig::default()
            .with_coefficients(0.0, 0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::Conflict { .. }));
    }

    #[test]
    fn test_single_sided_variants_allowed() {
        assert!(PsoConfig::default().with_coefficients(0.0, 2.0).validate().is_ok());
        assert!(PsoConfig::default().with_coefficients(2.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_unconventional_inertia_allowed() {
        assert!(PsoConfig::default().with_inertia(-0.5).validate().is_ok());
        assert!(PsoConfig::default().with_inertia(1.2).validate().is_ok());
        assert!(PsoConfig::default().with_inertia(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_large_swarm_is_flagged_but_valid() {
        let config = PsoConfig::default().with_swarm_size(201);
        assert!(config.validate().is_ok());
        let logs = crate::testing::captured_warnings(|| config.log_advisories());
        assert!(logs.contains("computationally expensive"), "{logs}");

        let logs = crate::testing::captured_warnings(|| {
            PsoConfig::default().with_swarm_size(200).log_advisories()
        });
        assert!(!logs.contains("computationally expensive"), "{logs}");
    }

    #[test]
    fn test_validate_iteration_cap() {
        assert!(PsoConfig::default().with_max_iterations(101).validate().is_err());
        assert!(PsoConfig::default().with_max_iterations(0).validate().is_err());
    }
}
