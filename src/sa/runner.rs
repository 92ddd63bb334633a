//! SA execution loop.

use super::config::{CoolingSchedule, SaConfig};
use crate::algorithm::AlgorithmKind;
use crate::boundary::BoundaryPolicy;
use crate::clock::{Clock, Deadline, SystemClock};
use crate::engine::{
    log_common_advisories, LoopOutcome, Optimizer, Progress, ResultRecord, RunMetadata, RunStatus,
};
use crate::error::{OptimizeError, Result};
use crate::problem::{Objective, Problem};
use crate::random::{rng_from_seed, standard_normal};
use rand::rngs::StdRng;
use rand::Rng;

/// Number of levels linear cooling takes from `T₀` to `T_f`.
const LINEAR_LEVELS: f64 = 100.0;

/// Damping constant of the accelerated logarithmic schedule.
const LOG_DAMPING: f64 = 2.5;

/// Simulated Annealing engine.
///
/// `iterations` in the [`ResultRecord`] counts completed temperature
/// levels; each level makes `max_iterations` proposals.
///
/// ```
/// use optimize_hub::engine::{Optimizer, RunMetadata};
/// use optimize_hub::problem::Problem;
/// use optimize_hub::sa::{SaConfig, SaOptimizer};
///
/// let problem = Problem::builder(3)
///     .uniform_bounds(-5.0, 5.0)
///     .fitness(|x| x.iter().map(|v| v * v).sum())
///     .build()
///     .unwrap();
/// let mut sa = SaOptimizer::new(problem, SaConfig::default().with_seed(42)).unwrap();
/// let result = sa.run().unwrap();
/// if let RunMetadata::Sa { final_temperature, .. } = result.metadata {
///     assert!(final_temperature <= 0.01);
/// }
/// ```
pub struct SaOptimizer<R = StdRng> {
    problem: Problem,
    config: SaConfig,
    rng: R,
    clock: Box<dyn Clock>,
    annealer: Option<Annealer>,
}

struct Annealer {
    current: Vec<f64>,
    current_fitness: f64,
    temperature: f64,
    proposals: usize,
    accepted_moves: usize,
    improving_moves: usize,
    progress: Progress,
}

impl SaOptimizer<StdRng> {
    /// Validates `config` and creates an engine seeded from `config.seed`.
    pub fn new(problem: Problem, config: SaConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(problem, config, rng)
    }
}

impl<R: Rng + Send> SaOptimizer<R> {
    /// Validates `config` and creates an engine drawing from `rng`.
    pub fn with_rng(problem: Problem, config: SaConfig, rng: R) -> Result<Self> {
        config.validate()?;
        config.log_advisories();
        log_common_advisories(AlgorithmKind::Sa, config.max_iterations);
        Ok(Self {
            problem,
            config,
            rng,
            clock: Box::new(SystemClock::new()),
            annealer: None,
        })
    }

    /// Replaces the time source used for the timeout.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }
}

impl Annealer {
    /// Gaussian perturbation of every coordinate, clipped to bounds.
    fn neighbor<R: Rng>(&self, problem: &Problem, neighbor_std: f64, rng: &mut R) -> Vec<f64> {
        let mut candidate: Vec<f64> = self
            .current
            .iter()
            .enumerate()
            .map(|(d, &x)| x + neighbor_std * problem.range(d) * standard_normal(rng))
            .collect();
        BoundaryPolicy::Clip.apply(&mut candidate, problem.bounds());
        candidate
    }

    /// Metropolis criterion.
    fn accepts<R: Rng>(&mut self, fitness: f64, objective: Objective, rng: &mut R) -> bool {
        if objective.is_better(fitness, self.current_fitness) {
            self.improving_moves += 1;
            return true;
        }
        // Non-negative: the move is no better than the current one.
        let delta = match objective {
            Objective::Minimize => fitness - self.current_fitness,
            Objective::Maximize => self.current_fitness - fitness,
        };
        let probability = (-delta / self.temperature).exp();
        probability.is_finite() && rng.random::<f64>() < probability
    }

    /// Runs one temperature level. Returns `false` if the deadline passed
    /// before all proposals were made.
    fn run_level<R: Rng>(
        &mut self,
        problem: &Problem,
        config: &SaConfig,
        rng: &mut R,
        clock: &dyn Clock,
        deadline: &Deadline,
    ) -> Result<bool> {
        let objective = problem.objective();
        for _ in 0..config.max_iterations {
            if deadline.expired(clock) {
                return Ok(false);
            }
            let candidate = self.neighbor(problem, config.neighbor_std, rng);
            let fitness = problem.evaluate(&candidate)?;
            self.progress.evaluations += 1;
            self.proposals += 1;

            self.progress.offer(&candidate, fitness);
            if self.accepts(fitness, objective, rng) {
                self.accepted_moves += 1;
                self.current = candidate;
                self.current_fitness = fitness;
            }
        }
        Ok(true)
    }

    fn cool(&mut self, config: &SaConfig) {
        let next = match config.cooling_schedule {
            CoolingSchedule::Geometric => self.temperature * config.cooling_rate,
            CoolingSchedule::Linear => (self.temperature
                - (config.initial_temp - config.final_temp) / LINEAR_LEVELS)
                .max(config.final_temp),
            CoolingSchedule::Logarithmic => {
                let k = self.proposals as f64;
                config.initial_temp / (1.0 + LOG_DAMPING * k * k.ln_1p())
            }
        };
        // A non-positive temperature ends the run at the final temperature.
        self.temperature = if next > 0.0 { next } else { config.final_temp };
    }

    fn acceptance_rate(&self) -> f64 {
        if self.proposals == 0 {
            0.0
        } else {
            self.accepted_moves as f64 / self.proposals as f64
        }
    }
}

impl<R: Rng + Send> Optimizer for SaOptimizer<R> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Sa
    }

    fn problem(&self) -> &Problem {
        &self.problem
    }

    fn initialize(&mut self) -> Result<()> {
        let current = self.problem.sample_uniform(&mut self.rng);
        let current_fitness = self.problem.evaluate(&current)?;
        let progress = Progress::start(
            self.problem.objective(),
            std::slice::from_ref(&current),
            &[current_fitness],
        );

        tracing::debug!(
            algorithm = %AlgorithmKind::Sa,
            dimensions = self.problem.dimensions(),
            schedule = %self.config.cooling_schedule,
            initial_temp = self.config.initial_temp,
            initial_fitness = current_fitness,
            "annealer initialized"
        );

        self.annealer = Some(Annealer {
            current,
            current_fitness,
            temperature: self.config.initial_temp,
            proposals: 0,
            accepted_moves: 0,
            improving_moves: 0,
            progress,
        });
        Ok(())
    }

    fn optimize(&mut self) -> Result<()> {
        if self.annealer.is_none() {
            self.initialize()?;
        }
        let annealer = self.annealer.as_mut().ok_or(OptimizeError::NotInitialized)?;
        let clock = self.clock.as_ref();
        let config = &self.config;
        let deadline = Deadline::start(clock, config.timeout);
        let mut status = RunStatus::Completed;

        while annealer.temperature > config.final_temp {
            let finished = !deadline.expired(clock)
                && annealer.run_level(&self.problem, config, &mut self.rng, clock, &deadline)?;
            if !finished {
                tracing::warn!(
                    algorithm = %AlgorithmKind::Sa,
                    levels = annealer.progress.iterations,
                    temperature = annealer.temperature,
                    "timeout reached, stopping early"
                );
                status = RunStatus::TimedOut;
                break;
            }
            annealer.progress.complete_iteration();
            annealer.cool(config);
        }

        annealer.progress.finish(
            AlgorithmKind::Sa,
            LoopOutcome {
                status,
                elapsed: deadline.elapsed(clock),
            },
        );
        Ok(())
    }

    fn report(&self) -> Result<ResultRecord> {
        let annealer = self.annealer.as_ref().ok_or(OptimizeError::NotInitialized)?;
        Ok(annealer.progress.to_record(
            AlgorithmKind::Sa,
            RunMetadata::Sa {
                acceptance_rate: annealer.acceptance_rate(),
                accepted_moves: annealer.accepted_moves,
                improving_moves: annealer.improving_moves,
                final_temperature: annealer.temperature,
                cooling_schedule: self.config.cooling_schedule,
            },
        ))
    }
}
