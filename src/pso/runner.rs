//! PSO engine.

use super::config::PsoConfig;
use crate::algorithm::AlgorithmKind;
use crate::boundary::BoundaryPolicy;
use crate::clock::{Clock, SystemClock};
use crate::engine::{
    evaluate_all, log_common_advisories, run_iterations, Optimizer, Progress, ResultRecord,
    RunMetadata,
};
use crate::error::{OptimizeError, Result};
use crate::problem::Problem;
use crate::random::rng_from_seed;
use rand::rngs::StdRng;
use rand::Rng;

/// Particle Swarm Optimization engine.
///
/// # Usage
///
/// ```
/// use optimize_hub::engine::Optimizer;
/// use optimize_hub::problem::Problem;
/// use optimize_hub::pso::{PsoConfig, PsoOptimizer};
///
/// let problem = Problem::builder(2)
///     .uniform_bounds(-5.0, 5.0)
///     .fitness(|x| x.iter().map(|v| v * v).sum())
///     .build()
///     .unwrap();
/// let mut pso = PsoOptimizer::new(problem, PsoConfig::default().with_seed(42)).unwrap();
/// let result = pso.run().unwrap();
/// assert!(result.best_fitness < 1e-2);
/// ```
pub struct PsoOptimizer<R = StdRng> {
    problem: Problem,
    config: PsoConfig,
    rng: R,
    clock: Box<dyn Clock>,
    swarm: Option<Swarm>,
}

struct Swarm {
    positions: Vec<Vec<f64>>,
    velocities: Vec<Vec<f64>>,
    personal_best: Vec<Vec<f64>>,
    personal_best_fitness: Vec<f64>,
    progress: Progress,
}

impl PsoOptimizer<StdRng> {
    /// Validates `config` and creates an engine seeded from `config.seed`.
    pub fn new(problem: Problem, config: PsoConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(problem, config, rng)
    }
}

impl<R: Rng + Send> PsoOptimizer<R> {
    /// Validates `config` and creates an engine drawing from `rng`.
    pub fn with_rng(problem: Problem, config: PsoConfig, rng: R) -> Result<Self> {
        config.validate()?;
        config.log_advisories();
        log_common_advisories(AlgorithmKind::Pso, config.max_iterations);
        Ok(Self {
            problem,
            config,
            rng,
            clock: Box::new(SystemClock::new()),
            swarm: None,
        })
    }

    /// Replaces the time source used for the timeout.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }
}

impl Swarm {
    fn step<R: Rng>(&mut self, problem: &Problem, config: &PsoConfig, rng: &mut R) -> Result<()> {
        let bounds = problem.bounds();
        let global_best = &self.progress.best_solution;

        for ((position, velocity), personal_best) in self
            .positions
            .iter_mut()
            .zip(&mut self.velocities)
            .zip(&self.personal_best)
        {
            for d in 0..position.len() {
                let r1: f64 = rng.random();
                let r2: f64 = rng.random();
                velocity[d] = config.w * velocity[d]
                    + config.c1 * r1 * (personal_best[d] - position[d])
                    + config.c2 * r2 * (global_best[d] - position[d]);
                position[d] += velocity[d];
            }
            BoundaryPolicy::Clip.apply(position, bounds);
        }

        let objective = problem.objective();
        for i in 0..self.positions.len() {
            let fitness = problem.evaluate(&self.positions[i])?;
            self.progress.evaluations += 1;
            if objective.is_better(fitness, self.personal_best_fitness[i]) {
                self.personal_best[i].clone_from(&self.positions[i]);
                self.personal_best_fitness[i] = fitness;
                self.progress.offer(&self.positions[i], fitness);
            }
        }

        self.progress.complete_iteration();
        Ok(())
    }
}

impl<R: Rng + Send> Optimizer for PsoOptimizer<R> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Pso
    }

    fn problem(&self) -> &Problem {
        &self.problem
    }

    fn initialize(&mut self) -> Result<()> {
        let n = self.config.swarm_size;
        let positions: Vec<Vec<f64>> = (0..n)
            .map(|_| self.problem.sample_uniform(&mut self.rng))
            .collect();
        let velocities: Vec<Vec<f64>> = (0..n)
            .map(|_| {
                self.problem
                    .bounds()
                    .iter()
                    .map(|&(lo, hi)| {
                        let span = 0.1 * (hi - lo);
                        self.rng.random_range(-span..span)
                    })
                    .collect()
            })
            .collect();

        let fitness = evaluate_all(&self.problem, &positions)?;
        let progress = Progress::start(self.problem.objective(), &positions, &fitness);

        tracing::debug!(
            algorithm = %AlgorithmKind::Pso,
            dimensions = self.problem.dimensions(),
            swarm_size = n,
            initial_best = progress.best_fitness,
            "swarm initialized"
        );

        self.swarm = Some(Swarm {
            personal_best: positions.clone(),
            personal_best_fitness: fitness,
            positions,
            velocities,
            progress,
        });
        Ok(())
    }

    fn optimize(&mut self) -> Result<()> {
        if self.swarm.is_none() {
            self.initialize()?;
        }
        let swarm = self.swarm.as_mut().ok_or(OptimizeError::NotInitialized)?;
        let problem = &self.problem;
        let config = &self.config;
        let rng = &mut self.rng;

        let outcome = run_iterations(
            AlgorithmKind::Pso,
            self.clock.as_ref(),
            config.timeout,
            config.max_iterations,
            || swarm.step(problem, config, rng),
        )?;
        swarm.progress.finish(AlgorithmKind::Pso, outcome);
        Ok(())
    }

    fn report(&self) -> Result<ResultRecord> {
        let swarm = self.swarm.as_ref().ok_or(OptimizeError::NotInitialized)?;
        Ok(swarm.progress.to_record(
            AlgorithmKind::Pso,
            RunMetadata::Pso {
                swarm_size: self.config.swarm_size,
            },
        ))
    }
}
