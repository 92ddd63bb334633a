//! ACOR engine.

use super::config::AcorConfig;
use crate::algorithm::AlgorithmKind;
use crate::boundary::BoundaryPolicy;
use crate::clock::{Clock, SystemClock};
use crate::engine::{
    evaluate_all, log_common_advisories, run_iterations, Optimizer, Progress, ResultRecord,
    RunMetadata,
};
use crate::error::{OptimizeError, Result};
use crate::problem::{Objective, Problem};
use crate::random::{rng_from_seed, standard_normal};
use rand::rngs::StdRng;
use rand::Rng;

/// Spread used per dimension, as a fraction of its range, when the archive
/// holds a single solution.
const SINGLE_MEMBER_SPREAD: f64 = 0.1;

/// Normalized selection probabilities for archive ranks `1..=k`.
///
/// `w_r ∝ exp(−(r − 1)² / (2·(q·k)²))`. The Gaussian's normalizing
/// factor `1 / (q·k·√(2π))` cancels out, so it is left out and the best
/// rank always has a non-zero weight.
pub fn rank_weights(archive_size: usize, q: f64) -> Vec<f64> {
    let spread = q * archive_size as f64;
    let raw: Vec<f64> = (0..archive_size)
        .map(|r| {
            if r == 0 {
                1.0
            } else {
                (-((r * r) as f64) / (2.0 * spread * spread)).exp()
            }
        })
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Ant Colony Optimization engine for continuous domains.
///
/// ```
/// use optimize_hub::acor::{AcorConfig, AcorOptimizer};
/// use optimize_hub::engine::Optimizer;
/// use optimize_hub::problem::Problem;
///
/// let problem = Problem::builder(2)
///     .uniform_bounds(-5.0, 5.0)
///     .fitness(|x| x.iter().map(|v| v * v).sum())
///     .build()
///     .unwrap();
/// let mut acor = AcorOptimizer::new(problem, AcorConfig::default().with_seed(42)).unwrap();
/// let result = acor.run().unwrap();
/// assert!(result.best_fitness < 1.0);
/// ```
pub struct AcorOptimizer<R = StdRng> {
    problem: Problem,
    config: AcorConfig,
    rng: R,
    clock: Box<dyn Clock>,
    colony: Option<Colony>,
}

#[derive(Debug, Clone)]
struct Solution {
    position: Vec<f64>,
    fitness: f64,
}

struct Colony {
    /// Best-first.
    archive: Vec<Solution>,
    weights: Vec<f64>,
    progress: Progress,
}

impl AcorOptimizer<StdRng> {
    /// Validates `config` and creates an engine seeded from `config.seed`.
    pub fn new(problem: Problem, config: AcorConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(problem, config, rng)
    }
}

impl<R: Rng + Send> AcorOptimizer<R> {
    /// Validates `config` and creates an engine drawing from `rng`.
    pub fn with_rng(problem: Problem, config: AcorConfig, rng: R) -> Result<Self> {
        config.validate()?;
        log_common_advisories(AlgorithmKind::Acor, config.max_iterations);
        Ok(Self {
            problem,
            config,
            rng,
            clock: Box::new(SystemClock::new()),
            colony: None,
        })
    }

    /// Replaces the time source used for the timeout.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &AcorConfig {
        &self.config
    }
}

fn sort_best_first(solutions: &mut [Solution], objective: Objective) {
    // Stable: on ties the archive member already present stays ahead.
    solutions.sort_by(|a, b| objective.compare(a.fitness, b.fitness));
}

impl Colony {
    /// Roulette over the rank weights.
    fn pick_member<R: Rng>(&self, rng: &mut R) -> usize {
        let threshold: f64 = rng.random();
        let mut cumulative = 0.0;
        for (i, &w) in self.weights.iter().enumerate() {
            cumulative += w;
            if cumulative > threshold {
                return i;
            }
        }
        self.weights.len() - 1 // floating-point fallback
    }

    /// Per-dimension standard deviation around archive member `l`.
    fn spread(&self, l: usize, problem: &Problem, xi: f64) -> Vec<f64> {
        let k = self.archive.len();
        let selected = &self.archive[l].position;
        (0..selected.len())
            .map(|d| {
                if k == 1 {
                    SINGLE_MEMBER_SPREAD * problem.range(d)
                } else {
                    let total: f64 = self
                        .archive
                        .iter()
                        .map(|s| (s.position[d] - selected[d]).abs())
                        .sum();
                    xi * total / (k - 1) as f64
                }
            })
            .collect()
    }

    fn construct<R: Rng>(&self, problem: &Problem, xi: f64, rng: &mut R) -> Vec<f64> {
        let l = self.pick_member(rng);
        let sigma = self.spread(l, problem, xi);
        let mut candidate: Vec<f64> = self.archive[l]
            .position
            .iter()
            .zip(&sigma)
            .map(|(&mu, &s)| mu + s * standard_normal(rng))
            .collect();
        BoundaryPolicy::Clip.apply(&mut candidate, problem.bounds());
        candidate
    }

    fn step<R: Rng>(&mut self, problem: &Problem, config: &AcorConfig, rng: &mut R) -> Result<()> {
        let candidates: Vec<Vec<f64>> = (0..config.colony_size)
            .map(|_| self.construct(problem, config.xi, rng))
            .collect();
        let fitness = evaluate_all(problem, &candidates)?;
        self.progress.evaluations += fitness.len();

        for (position, fitness) in candidates.into_iter().zip(fitness) {
            self.progress.offer(&position, fitness);
            self.archive.push(Solution { position, fitness });
        }
        sort_best_first(&mut self.archive, problem.objective());
        self.archive.truncate(config.archive_size);

        self.progress.complete_iteration();
        Ok(())
    }
}

impl<R: Rng + Send> Optimizer for AcorOptimizer<R> {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Acor
    }

    fn problem(&self) -> &Problem {
        &self.problem
    }

    fn initialize(&mut self) -> Result<()> {
        let positions: Vec<Vec<f64>> = (0..self.config.archive_size)
            .map(|_| self.problem.sample_uniform(&mut self.rng))
            .collect();
        let fitness = evaluate_all(&self.problem, &positions)?;
        let progress = Progress::start(self.problem.objective(), &positions, &fitness);

        let mut archive: Vec<Solution> = positions
            .into_iter()
            .zip(fitness)
            .map(|(position, fitness)| Solution { position, fitness })
            .collect();
        sort_best_first(&mut archive, self.problem.objective());

        tracing::debug!(
            algorithm = %AlgorithmKind::Acor,
            dimensions = self.problem.dimensions(),
            archive_size = self.config.archive_size,
            colony_size = self.config.colony_size,
            initial_best = progress.best_fitness,
            "archive initialized"
        );

        self.colony = Some(Colony {
            archive,
            weights: rank_weights(self.config.archive_size, self.config.q),
            progress,
        });
        Ok(())
    }

    fn optimize(&mut self) -> Result<()> {
        if self.colony.is_none() {
            self.initialize()?;
        }
        let colony = self.colony.as_mut().ok_or(OptimizeError::NotInitialized)?;
        let problem = &self.problem;
        let config = &self.config;
        let rng = &mut self.rng;

        let outcome = run_iterations(
            AlgorithmKind::Acor,
            self.clock.as_ref(),
            config.timeout,
            config.max_iterations,
            || colony.step(problem, config, rng),
        )?;
        colony.progress.finish(AlgorithmKind::Acor, outcome);
        Ok(())
    }

    fn report(&self) -> Result<ResultRecord> {
        let colony = self.colony.as_ref().ok_or(OptimizeError::NotInitialized)?;
        Ok(colony.progress.to_record(
            AlgorithmKind::Acor,
            RunMetadata::Acor {
                archive_size: self.config.archive_size,
                colony_size: self.config.colony_size,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn sphere(dims: usize, objective: Objective) -> Problem {
        Problem::builder(dims)
            .uniform_bounds(-5.0, 5.0)
            .objective(objective)
            .fitness(|x| x.iter().map(|v| v * v).sum())
            .build()
            .unwrap()
    }

    #[test]
    fn test_rank_weights_normalized_and_decreasing() {
        for (k, q) in [(10, 0.01), (10, 0.5), (1, 0.01), (25, 1.0)] {
            let w = rank_weights(k, q);
            assert_eq!(w.len(), k);
            assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12, "k={k}, q={q}");
            for pair in w.windows(2) {
                assert!(pair[1] <= pair[0]);
            }
        }
        // Tiny q concentrates everything on rank 1.
        assert!(rank_weights(10, 0.01)[0] > 0.999);
    }

    #[test]
    fn test_acor_sphere_convergence() {
        let config = AcorConfig::default().with_locality(0.2).with_seed(42);
        let mut acor = AcorOptimizer::new(sphere(2, Objective::Minimize), config).unwrap();
        let result = acor.run().unwrap();
        assert!(result.best_fitness < 1e-2, "got {}", result.best_fitness);
        assert_eq!(result.iterations, 50);
        assert_eq!(result.evaluations, 10 + 30 * 50);
    }

    #[test]
    fn test_acor_archive_sorted_and_sized() {
        let config = AcorConfig::default().with_max_iterations(5).with_seed(1);
        let mut acor = AcorOptimizer::new(sphere(3, Objective::Maximize), config).unwrap();
        acor.run().unwrap();
        let colony = acor.colony.as_ref().unwrap();
        assert_eq!(colony.archive.len(), 10);
        for pair in colony.archive.windows(2) {
            assert!(pair[0].fitness >= pair[1].fitness, "archive not best-first");
        }
        assert_eq!(colony.archive[0].fitness, colony.progress.best_fitness);
    }

    #[test]
    fn test_acor_single_member_archive() {
        let config = AcorConfig::default()
            .with_archive_size(1)
            .with_colony_size(5)
            .with_max_iterations(30)
            .with_seed(42);
        let problem = sphere(2, Objective::Minimize);
        let result = AcorOptimizer::new(problem.clone(), config)
            .unwrap()
            .run()
            .unwrap();
        assert!(problem.contains(&result.best_solution));
        assert!(result.convergence.last().unwrap() < &result.convergence[0]);
    }

    #[test]
    fn test_spread_uses_mean_distance() {
        let problem = sphere(1, Objective::Minimize);
        let colony = Colony {
            archive: vec![
                Solution { position: vec![0.0], fitness: 0.0 },
                Solution { position: vec![1.0], fitness: 1.0 },
                Solution { position: vec![3.0], fitness: 9.0 },
            ],
            weights: rank_weights(3, 0.5),
            progress: Progress::new(Objective::Minimize),
        };
        // |0-0| + |1-0| + |3-0| = 4, over k-1 = 2, times xi.
        let sigma = colony.spread(0, &problem, 0.5);
        assert!((sigma[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pick_member_follows_weights() {
        let colony = Colony {
            archive: Vec::new(),
            weights: vec![0.7, 0.2, 0.1],
            progress: Progress::new(Objective::Minimize),
        };
        let mut rng = create_rng(42);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[colony.pick_member(&mut rng)] += 1;
        }
        assert!(counts[0] > 6500 && counts[0] < 7500, "{counts:?}");
        assert!(counts[2] > 700 && counts[2] < 1300, "{counts:?}");
    }

    #[test]
    fn test_acor_trace_monotonic_and_bounded() {
        let problem = Problem::builder(2)
            .bounds(vec![(0.0, 1.0), (0.0, 1.0)])
            .fitness(|x| (x[0] - 0.9).abs() + (x[1] - 0.1).abs())
            .build()
            .unwrap();
        let config = AcorConfig::default().with_seed(9);
        let mut acor = AcorOptimizer::new(problem.clone(), config).unwrap();
        let result = acor.run().unwrap();
        for pair in result.convergence.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        for s in &acor.colony.as_ref().unwrap().archive {
            assert!(problem.contains(&s.position));
        }
    }
}
