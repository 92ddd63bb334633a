//! Error types.
//!
//! Three conditions are surfaced to the caller:
//!
//! - [`ValidationError`]: malformed problem or parameters, raised at
//!   construction and never during the optimization loop.
//! - [`FitnessEvaluationError`]: the objective failed or returned a
//!   non-finite value. Aborts the current `initialize`/`optimize` call.
//! - A timeout, which is *not* an error: the run ends with
//!   [`RunStatus::TimedOut`](crate::engine::RunStatus::TimedOut) and a
//!   valid partial result.

use thiserror::Error;

/// A problem descriptor or parameter set was rejected.
///
/// Every variant names the offending field together with the value that
/// was received and the accepted range. Nothing is clamped or corrected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A scalar parameter lies outside its accepted range.
    #[error("{field} = {value} is out of range: expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// A bound pair must be finite with `lower < upper` and a finite width.
    #[error("invalid bound at index {index}: lower ({lower}) must be finite and less than upper ({upper})")]
    InvalidBound { index: usize, lower: f64, upper: f64 },

    /// The number of bound pairs differs from the declared dimensions.
    #[error("bounds length ({bounds}) does not match dimensions ({dimensions})")]
    DimensionMismatch { dimensions: usize, bounds: usize },

    /// Two or more parameters are individually valid but inconsistent.
    #[error("{fields}: {reason}")]
    Conflict {
        fields: &'static str,
        reason: String,
    },

    /// The problem was built without a fitness function.
    #[error("fitness function is required")]
    MissingFitness,
}

impl ValidationError {
    pub(crate) fn out_of_range(
        field: &'static str,
        value: impl std::fmt::Display,
        expected: impl Into<String>,
    ) -> Self {
        ValidationError::OutOfRange {
            field,
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    pub(crate) fn conflict(fields: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::Conflict {
            fields,
            reason: reason.into(),
        }
    }
}

/// Why a single fitness evaluation was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitnessFailure {
    /// The objective returned NaN or an infinity.
    #[error("fitness function returned invalid value: {0}")]
    NonFinite(f64),

    /// The objective itself reported an error.
    #[error("fitness function raised: {0}")]
    Raised(String),
}

/// The user-supplied objective failed on a specific candidate.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("error evaluating fitness function at {solution:?}: {failure}")]
pub struct FitnessEvaluationError {
    /// The candidate that was being evaluated.
    pub solution: Vec<f64>,

    /// What went wrong.
    pub failure: FitnessFailure,
}

/// Any error an optimizer can return.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    FitnessEvaluation(#[from] FitnessEvaluationError),

    /// A result was requested before the search state existed.
    #[error("optimizer has not been initialized")]
    NotInitialized,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OptimizeError>;
