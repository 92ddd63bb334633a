//! DE engine.

use super::config::{DeConfig, DeStrategy};
use crate::algorithm::AlgorithmKind;
use crate::clock::{Clock, SystemClock};
use crate::engine::{
    evaluate_all, log_common_advisories, run_iterations, Optimizer, Progress, ResultRecord,
    RunMetadata,
};
use crate::error::{OptimizeError, Result};
use crate::problem::Problem;
use crate::random::{rng_from_seed, sample_without_replacement};
use rand::rngs::StdRng;
use rand::Rng;

/// Differential Evolution engine.
///
/// ```
/// use optimize_hub::de::{DeConfig, DeOptimizer};
/// use optimize_hub::engine::Optimizer;
/// use optimize_hub::problem::Problem;
///
/// let problem = Problem::builder(2)
///     .uniform_bounds(-5.0, 5.0)
///     .maximize()
///     .fitness(|x| -((x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2)) + 10.0)
///     .build()
///     .unwrap();
/// let config = DeConfig::default().with_population_size(30).with_seed(42);
/// let result = DeOptimizer::new(problem, config).unwrap().run().unwrap();
/// assert!(result.best_fitness > 9.0);
/// ```
pub struct DeOptimizer<R = StdRng> {
    problem: Problem,
    config: DeConfig,
    rng: R,
    clock: Box<dyn Clock>,
    population: Option<Population>,
}

struct Population {
    individuals: Vec<Vec<f64>>,
    fitness: Vec<f64>,
    progress: Progress,
}

impl DeOptimizer<StdRng> {
    /// Validates `config` and creates an engine seeded from `config.seed`.
    pub fn new(problem: Problem, config: DeConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(problem, config, rng)
    }
}

impl<R: Rng + Send> DeOptimizer<R> {
    /// Validates `config` and creates an engine drawing from `rng`.
    pub fn with_rng(problem: Problem, config: DeConfig, rng: R) -> Result<Self> {
        config.validate()?;
        log_common_advisories(AlgorithmKind::De, config.max_iterations);
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

    pub fn config(&self) -> &DeConfig {
        &self.config
    }
}

impl Population {
    fn mutant<R: Rng>(&self, target: usize, config: &DeConfig, rng: &mut R) -> Vec<f64> {
        let pop = &self.individuals;
        let donors =
            sample_without_replacement(rng, pop.len(), config.strategy.donors(), Some(target));
        let f = config.f;
        let dims = pop[target].len();

        match config.strategy {
            DeStrategy::Rand1 => {
                let (a, b, c) = (&pop[donors[0]], &pop[donors[1]], &pop[donors[2]]);
                (0..dims).map(|d| a[d] + f * (b[d] - c[d])).collect()
            }
            DeStrategy::Best1 => {
                let best = &self.progress.best_solution;
                let (b, c) = (&pop[donors[0]], &pop[donors[1]]);
                (0..dims).map(|d| best[d] + f * (b[d] - c[d])).collect()
            }
            DeStrategy::Rand2 => {
                let a = &pop[donors[0]];
                let (b, c) = (&pop[donors[1]], &pop[donors[2]]);
                let (d2, e) = (&pop[donors[3]], &pop[donors[4]]);
                (0..dims)
                    .map(|d| a[d] + f * (b[d] - c[d] + d2[d] - e[d]))
                    .collect()
            }
        }
    }

    /// One pass over every target, replacing in place.
    fn step<R: Rng>(&mut self, problem: &Problem, config: &DeConfig, rng: &mut R) -> Result<()> {
        let bounds = problem.bounds();
        let objective = problem.objective();

        for i in 0..self.individuals.len() {
            let mut mutant = self.mutant(i, config, rng);
            config.boundary.apply(&mut mutant, bounds);

            let mut trial = binomial_crossover(&self.individuals[i], &mutant, config.cr, rng);
            config.boundary.apply(&mut trial, bounds);

            let trial_fitness = problem.evaluate(&trial)?;
            self.progress.evaluations += 1;
            if objective.is_better(trial_fitness, self.fitness[i]) {
                self.progress.offer(&trial, trial_fitness);
                self.individuals[i] = trial;
                self.fitness[i] = trial_fitness;
            }
        }

        self.progress.complete_iteration();
        Ok(())
    }
}

/// Takes each coordinate from `mutant` with probability `cr`, otherwise
/// from `target`. At least one coordinate always comes from `mutant`.
fn binomial_crossover<R: Rng>(target: &[f64], mutant: &[f64], cr: f64, rng: &mut R) -> Vec<f64> {
    let dims = target.len();
    let mut mask: Vec<bool> = (0..dims).map(|_| rng.random::<f64>() < cr).collect();
    if !mask.contains(&true) {
        mask[rng.random_range(0..dims)] = true;
    }
    mask.iter()
        .zip(target.iter().zip(mutant))
        .map(|(&from_mutant, (&t, &m))| if from_mutant { m } else { t })
        .collect()
}

impl<R: Rng + Send> Optimizer for DeOptimizer<R> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::De
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
            algorithm = %AlgorithmKind::De,
            strategy = %self.config.strategy,
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
            AlgorithmKind::De,
            self.clock.as_ref(),
            config.timeout,
            config.max_iterations,
            || population.step(problem, config, rng),
        )?;
        population.progress.finish(AlgorithmKind::De, outcome);
        Ok(())
    }

    fn report(&self) -> Result<ResultRecord> {
        let population = self
            .population
            .as_ref()
            .ok_or(OptimizeError::NotInitialized)?;
        Ok(population.progress.to_record(
            AlgorithmKind::De,
            RunMetadata::De {
                strategy: self.config.strategy,
                boundary: self.config.boundary,
            },
        ))
    }
}
