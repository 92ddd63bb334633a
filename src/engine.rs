//! The algorithm contract and the bookkeeping every engine shares.
//!
//! An engine is driven through [`Optimizer`]:
//!
//! 1. construction validates the problem and parameters,
//! 2. [`initialize`](Optimizer::initialize) builds the search state and
//!    records the first convergence point,
//! 3. [`optimize`](Optimizer::optimize) runs the iterative loop until the
//!    iteration cap or the timeout,
//! 4. [`report`](Optimizer::report) returns a [`ResultRecord`].

use crate::algorithm::AlgorithmKind;
use crate::boundary::BoundaryPolicy;
use crate::clock::{Clock, Deadline};
use crate::de::DeStrategy;
use crate::error::{FitnessEvaluationError, Result, ValidationError};
use crate::problem::{Objective, Problem};
use crate::sa::CoolingSchedule;
use std::time::Duration;

/// Platform ceiling on `max_iterations` for every engine.
pub const MAX_ITERATIONS: usize = 100;

/// Wall-clock budget applied when a configuration does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const LOW_ITERATION_ADVISORY: usize = 10;

/// Populations above this size are flagged as expensive.
const LARGE_POPULATION_ADVISORY: usize = 200;

/// Lifecycle shared by all optimizers.
///
/// The trait is object safe, so heterogeneous engines can be driven
/// through `Box<dyn Optimizer>`.
pub trait Optimizer: Send {
    fn kind(&self) -> AlgorithmKind;

    fn problem(&self) -> &Problem;

    /// Creates the search state and evaluates it.
    ///
    /// Calling it again discards the previous state.
    fn initialize(&mut self) -> Result<()>;

    /// Runs the iterative loop.
    ///
    /// Initializes first if no state exists. A timeout ends the loop early
    /// with [`RunStatus::TimedOut`]; it is never an error.
    fn optimize(&mut self) -> Result<()>;

    /// Snapshot of the current result.
    fn report(&self) -> Result<ResultRecord>;

    /// `initialize`, `optimize`, then `report`.
    fn run(&mut self) -> Result<ResultRecord> {
        self.initialize()?;
        self.optimize()?;
        self.report()
    }
}

/// How the last `optimize` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RunStatus {
    /// The loop ran to its natural end.
    #[default]
    Completed,
    /// The wall-clock budget ran out first.
    TimedOut,
}

/// Strategy-specific details attached to a [`ResultRecord`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunMetadata {
    Pso {
        swarm_size: usize,
    },
    Ga {
        population_size: usize,
        tournament_size: usize,
    },
    De {
        strategy: DeStrategy,
        boundary: BoundaryPolicy,
    },
    Acor {
        archive_size: usize,
        colony_size: usize,
    },
    Sa {
        /// Accepted proposals over all proposals, 0 when none were made.
        acceptance_rate: f64,
        accepted_moves: usize,
        improving_moves: usize,
        final_temperature: f64,
        cooling_schedule: CoolingSchedule,
    },
}

/// Outcome of a run, returned by value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultRecord {
    pub algorithm: AlgorithmKind,
    pub objective: Objective,
    pub best_solution: Vec<f64>,
    pub best_fitness: f64,

    /// Best-so-far fitness, one entry after initialization and one per
    /// completed iteration (temperature level for SA).
    pub convergence: Vec<f64>,

    /// Iterations actually completed since the last `initialize`.
    pub iterations: usize,

    /// Fitness evaluations since the last `initialize`, initialization included.
    pub evaluations: usize,

    /// Wall-clock time of the last `optimize` call.
    pub elapsed: Duration,

    pub status: RunStatus,
    pub metadata: RunMetadata,
}

/// Best-so-far tracking and the convergence trace.
#[derive(Debug, Clone)]
pub(crate) struct Progress {
    objective: Objective,
    pub best_solution: Vec<f64>,
    pub best_fitness: f64,
    pub convergence: Vec<f64>,
    pub iterations: usize,
    pub evaluations: usize,
    pub elapsed: Duration,
    pub status: RunStatus,
}

impl Progress {
    pub fn new(objective: Objective) -> Self {
        Self {
            objective,
            best_solution: Vec::new(),
            best_fitness: objective.worst(),
            convergence: Vec::new(),
            iterations: 0,
            evaluations: 0,
            elapsed: Duration::ZERO,
            status: RunStatus::Completed,
        }
    }

    /// Seeds the best-so-far from an evaluated population and records the
    /// first trace point.
    pub fn start(objective: Objective, population: &[Vec<f64>], fitness: &[f64]) -> Self {
        let mut progress = Self::new(objective);
        progress.evaluations = fitness.len();
        for (x, &f) in population.iter().zip(fitness) {
            progress.offer(x, f);
        }
        progress.convergence.push(progress.best_fitness);
        progress
    }

    /// Replaces the best-so-far if `fitness` is strictly better.
    pub fn offer(&mut self, solution: &[f64], fitness: f64) -> bool {
        if self.objective.is_better(fitness, self.best_fitness) {
            self.best_fitness = fitness;
            self.best_solution.clear();
            self.best_solution.extend_from_slice(solution);
            true
        } else {
            false
        }
    }

    /// Closes an iteration and appends its trace point.
    pub fn complete_iteration(&mut self) {
        self.iterations += 1;
        self.convergence.push(self.best_fitness);
        tracing::trace!(
            iteration = self.iterations,
            best_fitness = self.best_fitness,
            "iteration complete"
        );
    }

    pub fn finish(&mut self, algorithm: AlgorithmKind, outcome: LoopOutcome) {
        self.status = outcome.status;
        self.elapsed = outcome.elapsed;
        tracing::info!(
            algorithm = %algorithm,
            iterations = self.iterations,
            evaluations = self.evaluations,
            best_fitness = self.best_fitness,
            status = ?self.status,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "optimization finished"
        );
    }

    pub fn to_record(&self, algorithm: AlgorithmKind, metadata: RunMetadata) -> ResultRecord {
        ResultRecord {
            algorithm,
            objective: self.objective,
            best_solution: self.best_solution.clone(),
            best_fitness: self.best_fitness,
            convergence: self.convergence.clone(),
            iterations: self.iterations,
            evaluations: self.evaluations,
            elapsed: self.elapsed,
            status: self.status,
            metadata,
        }
    }
}

/// How a timed loop ended.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoopOutcome {
    pub status: RunStatus,
    pub elapsed: Duration,
}

/// Calls `step` up to `max_iterations` times, checking the deadline
/// before each call.
pub(crate) fn run_iterations<F>(
    algorithm: AlgorithmKind,
    clock: &dyn Clock,
    timeout: Duration,
    max_iterations: usize,
    mut step: F,
) -> Result<LoopOutcome>
where
    F: FnMut() -> Result<()>,
{
    let deadline = Deadline::start(clock, timeout);
    let mut status = RunStatus::Completed;
    for completed in 0..max_iterations {
        if deadline.expired(clock) {
            tracing::warn!(
                algorithm = %algorithm,
                completed,
                timeout_ms = timeout.as_millis() as u64,
                "timeout reached, stopping early"
            );
            status = RunStatus::TimedOut;
            break;
        }
        step()?;
    }
    Ok(LoopOutcome {
        status,
        elapsed: deadline.elapsed(clock),
    })
}

/// Evaluates every candidate in order, stopping at the first failure.
pub(crate) fn evaluate_all(
    problem: &Problem,
    candidates: &[Vec<f64>],
) -> std::result::Result<Vec<f64>, FitnessEvaluationError> {
    candidates.iter().map(|x| problem.evaluate(x)).collect()
}

/// Checks the limits every configuration shares.
pub(crate) fn validate_run_limits(
    max_iterations: usize,
    timeout: Duration,
) -> std::result::Result<(), ValidationError> {
    if max_iterations == 0 || max_iterations > MAX_ITERATIONS {
        return Err(ValidationError::out_of_range(
            "max_iterations",
            max_iterations,
            format!("1..={MAX_ITERATIONS}"),
        ));
    }
    if timeout.is_zero() {
        return Err(ValidationError::out_of_range(
            "timeout",
            format!("{timeout:?}"),
            "> 0",
        ));
    }
    Ok(())
}

/// Rejects NaN and infinities for a float parameter.
pub(crate) fn require_finite(
    field: &'static str,
    value: f64,
) -> std::result::Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, value, "a finite number"))
    }
}

/// Logs the advisories that apply to every engine.
pub(crate) fn log_common_advisories(algorithm: AlgorithmKind, max_iterations: usize) {
    if max_iterations < LOW_ITERATION_ADVISORY {
        tracing::warn!(
            algorithm = %algorithm,
            max_iterations,
            "low iteration count may not allow convergence"
        );
    }
}

/// Warns when a swarm or population is large enough to be slow.
pub(crate) fn log_population_advisory(algorithm: AlgorithmKind, field: &'static str, size: usize) {
    if size > LARGE_POPULATION_ADVISORY {
        tracing::warn!(
            algorithm = %algorithm,
            field,
            size,
            "large population may be computationally expensive"
        );
    }
}
