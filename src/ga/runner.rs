//! GA evolutionary loop execution.
//!
//! [`GaOptimizer`] orchestrates the evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.

use super::config::GaConfig;
use super::operators::{polynomial_mutation, sbx_crossover, DISTRIBUTION_INDEX};
use super::selection::tournament;
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

/// Genetic Algorithm engine.
///
/// # Usage
///
/// ```
/// use optimize_hub::engine::Optimizer;
/// use optimize_hub::ga::{GaConfig, GaOptimizer};
/// use optimize_hub::problem::Problem;
///
/// let problem = Problem::builder(3)
///     .uniform_bounds(-5.0, 5.0)
///     .fitness(|x| x.iter().map(|v| v * v).sum())
///     .build()
///     .unwrap();
/// let mut ga = GaOptimizer::new(problem, GaConfig::default().with_seed(42)).unwrap();
/// let result = ga.run().unwrap();
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaOptimizer<R = StdRng> {
    problem: Problem,
    config: GaConfig,
    rng: R,
    clock: Box<dyn Clock>,
    population: Option<Population>,
}

struct Population {
    individuals: Vec<Vec<f64>>,
    fitness: Vec<f64>,
    progress: Progress,
}

impl GaOptimizer<StdRng> {
    /// Validates `config` and creates an engine seeded from `config.seed`.
    pub fn new(problem: Problem, config: GaConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(problem, config, rng)
    }
}

impl<R: Rng + Send> GaOptimizer<R> {
    /// Validates `config` and creates an engine drawing from `rng`.
    pub fn with_rng(problem: Problem, config: GaConfig, rng: R) -> Result<Self> {
        config.validate()?;
        config.log_advisories();
        log_common_advisories(AlgorithmKind::Ga, config.max_iterations);
        Ok(Self {
            problem,
            config,
            rng,
            clock: Box::new(SystemClock::new()),
            population: None,
        })
    }

    /// Replaces the time source used for the timeout.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

impl Population {
    /// Breeds and evaluates one full replacement generation.
    fn step<R: Rng>(&mut self, problem: &Problem, config: &GaConfig, rng: &mut R) -> Result<()> {
        let n = config.population_size;
        let objective = problem.objective();
        let bounds = problem.bounds();

        let mut offspring: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        while offspring.len() < n {
            let p1 = tournament(&self.fitness, config.tournament_size, objective, rng);
            let p2 = tournament(&self.fitness, config.tournament_size, objective, rng);

            let (mut c1, mut c2) = if rng.random::<f64>() < config.crossover_rate {
                sbx_crossover(
                    &self.individuals[p1],
                    &self.individuals[p2],
                    DISTRIBUTION_INDEX,
                    rng,
                )
            } else {
                (self.individuals[p1].clone(), self.individuals[p2].clone())
            };

            for child in [&mut c1, &mut c2] {
                polynomial_mutation(child, bounds, config.mutation_rate, DISTRIBUTION_INDEX, rng);
                BoundaryPolicy::Clip.apply(child, bounds);
            }
            offspring.push(c1);
            offspring.push(c2);
        }
        // Odd sizes drop the last child.
        offspring.truncate(n);

        let fitness = evaluate_all(problem, &offspring)?;
        self.progress.evaluations += fitness.len();
        if let Some(best) = objective.best_index(&fitness) {
            self.progress.offer(&offspring[best], fitness[best]);
        }

        self.individuals = offspring;
        self.fitness = fitness;
        self.progress.complete_iteration();
        Ok(())
    }
}

impl<R: Rng + Send> Optimizer for GaOptimizer<R> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Ga
    }

    fn problem(&self) -> &Problem {
        &self.problem
    }

    fn initialize(&mut self) -> Result<()> {
        let individuals: Vec<Vec<f64>> = (0..self.config.population_size)
            .map(|_| self.problem.sample_uniform(&mut self.rng))
            .collect();
        let fitness = evaluate_all(&self.problem, &individuals)?;
        let progress = Progress::start(self.problem.objective(), &individuals, &fitness);

        tracing::debug!(
            algorithm = %AlgorithmKind::Ga,
            dimensions = self.problem.dimensions(),
            population_size = self.config.population_size,
            initial_best = progress.best_fitness,
            "population initialized"
        );

        self.population = Some(Population {
            individuals,
            fitness,
            progress,
        });
        Ok(())
    }

    fn optimize(&mut self) -> Result<()> {
        if self.population.is_none() {
            self.initialize()?;
        }
        let population = self.population.as_mut().ok_or(OptimizeError::NotInitialized)?;
        let problem = &self.problem;
        let config = &self.config;
        let rng = &mut self.rng;

        let outcome = run_iterations(
            AlgorithmKind::Ga,
            self.clock.as_ref(),
            config.timeout,
            config.max_iterations,
            || population.step(problem, config, rng),
        )?;
        population.progress.finish(AlgorithmKind::Ga, outcome);
        Ok(())
    }

    fn report(&self) -> Result<ResultRecord> {
        let population = self
            .population
            .as_ref()
            .ok_or(OptimizeError::NotInitialized)?;
        Ok(population.progress.to_record(
            AlgorithmKind::Ga,
            RunMetadata::Ga {
                population_size: self.config.population_size,
                tournament_size: self.config.tournament_size,
            },
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
