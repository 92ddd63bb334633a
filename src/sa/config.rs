//! SA configuration and cooling schedules.

use crate::engine::{require_finite, validate_run_limits, DEFAULT_TIMEOUT};
use crate::error::ValidationError;
use std::fmt;
use std::time::Duration;

/// How the temperature falls after each temperature level.
///
/// # References
///
/// - Geometric: Kirkpatrick et al. (1983), standard textbook approach
/// - Logarithmic: Geman & Geman (1984), here in an accelerated form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CoolingSchedule {
    /// `T ← cooling_rate · T`.
    ///
    /// Most widely used. Typical `cooling_rate`: 0.90–0.99.
    #[default]
    Geometric,

    /// `T ← T − (T₀ − T_f) / 100`, clamped at `T_f`.
    ///
    /// Fixed duration of 100 temperature levels.
    Linear,

    /// `T = T₀ / (1 + 2.5 · k · ln(1 + k))`, `k` = proposals made so far.
    ///
    /// The classic `T₀ / ln(1 + k)` schedule needs astronomically many
    /// steps to cool. The damping factor `2.5 · k` brings it down to a
    /// handful of levels while keeping the logarithmic shape.
    Logarithmic,
}

impl fmt::Display for CoolingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoolingSchedule::Geometric => "geometric",
            CoolingSchedule::Linear => "linear",
            CoolingSchedule::Logarithmic => "logarithmic",
        })
    }
}

/// Configuration for Simulated Annealing.
///
/// # Examples
///
/// ```
/// use optimize_hub::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_temperatures(50.0, 0.001)
///     .with_cooling_rate(0.9)
///     .with_cooling_schedule(CoolingSchedule::Geometric)
///     .with_neighbor_std(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Starting temperature `T₀`. Higher values allow more exploration.
    pub initial_temp: f64,

    /// The run stops once the temperature is no longer above this.
    pub final_temp: f64,

    /// Geometric cooling factor in `(0, 1)`. Ignored by other schedules.
    pub cooling_rate: f64,

    /// Proposals per temperature level.
    pub max_iterations: usize,

    /// Proposal standard deviation as a fraction of each dimension's range.
    pub neighbor_std: f64,

    pub cooling_schedule: CoolingSchedule,

    pub timeout: Duration,
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temp: 100.0,
            final_temp: 0.01,
            cooling_rate: 0.95,
            max_iterations: 50,
            neighbor_std: 0.1,
            cooling_schedule: CoolingSchedule::default(),
            timeout: DEFAULT_TIMEOUT,
            seed: None,
        }
    }
}

impl SaConfig {
    /// Sets the initial and final temperatures.
    pub fn with_temperatures(mut self, initial: f64, final_temp: f64) -> Self {
        self.initial_temp = initial;
        self.final_temp = final_temp;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_cooling_schedule(mut self, schedule: CoolingSchedule) -> Self {
        self.cooling_schedule = schedule;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_neighbor_std(mut self, std: f64) -> Self {
        self.neighbor_std = std;
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
        require_finite("initial_temp", self.initial_temp)?;
        require_finite("final_temp", self.final_temp)?;
        if self.final_temp <= 0.0 {
            return Err(ValidationError::out_of_range(
                "final_temp",
                self.final_temp,
                "> 0",
            ));
        }
        if self.initial_temp <= self.final_temp {
            return Err(ValidationError::out_of_range(
                "initial_temp",
                self.initial_temp,
                format!("> final_temp ({})", self.final_temp),
            ));
        }
        validate_run_limits(self.max_iterations, self.timeout)?;
        require_finite("neighbor_std", self.neighbor_std)?;
        if self.neighbor_std <= 0.0 {
            return Err(ValidationError::out_of_range(
                "neighbor_std",
                self.neighbor_std,
                "> 0",
            ));
        }
        if self.cooling_schedule == CoolingSchedule::Geometric
            && !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0)
        {
            return Err(ValidationError::out_of_range(
                "cooling_rate",
                self.cooling_rate,
                "(0, 1) for geometric cooling",
            ));
        }
        Ok(())
    }

    pub(crate) fn log_advisories(&self) {
        if self.cooling_schedule == CoolingSchedule::Logarithmic {
            tracing::warn!(
                "logarithmic cooling runs the accelerated variant T0 / (1 + 2.5·k·ln(1 + k)); \
                 the textbook schedule would take far too many iterations"
            );
        }
    }
}
