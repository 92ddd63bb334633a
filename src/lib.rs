//! Bounded continuous metaheuristic optimization.
//!
//! Five engines search a box-bounded, real-valued space to minimize or
//! maximize a caller-supplied fitness function:
//!
//! - **Particle Swarm Optimization (PSO)**: particles pulled towards their
//!   personal best and the swarm's global best.
//! - **Genetic Algorithm (GA)**: tournament selection, SBX crossover and
//!   polynomial mutation under generational replacement.
//! - **Differential Evolution (DE)**: `rand/1`, `best/1` and `rand/2`
//!   mutation with binomial crossover and greedy selection.
//! - **ACOR**: ant colony optimization over a ranked solution archive.
//! - **Simulated Annealing (SA)**: single-trajectory Metropolis search with
//!   geometric, linear or logarithmic cooling.
//!
//! Every engine implements [`engine::Optimizer`] and returns an
//! [`engine::ResultRecord`] holding the best solution, a monotone
//! convergence trace, the number of completed iterations and the run
//! status. A wall-clock timeout ends a run early without raising.
//!
//! # Quick start
//!
//! ```
//! use optimize_hub::engine::Optimizer;
//! use optimize_hub::problem::Problem;
//! use optimize_hub::pso::{PsoConfig, PsoOptimizer};
//!
//! let problem = Problem::builder(2)
//!     .uniform_bounds(-5.0, 5.0)
//!     .minimize()
//!     .fitness(|x| x.iter().map(|v| v * v).sum())
//!     .build()?;
//! let config = PsoConfig::default().with_swarm_size(30).with_seed(7);
//! let result = PsoOptimizer::new(problem, config)?.run()?;
//! assert!(result.best_fitness < 1e-3);
//! # Ok::<(), optimize_hub::error::OptimizeError>(())
//! ```
//!
//! # Architecture
//!
//! Engines depend only on the shared leaves ([`problem`], [`boundary`],
//! [`clock`], [`random`], [`engine`]) and never on each other.
//! [`algorithm`] adds runtime dispatch over all five, and [`benchmarks`],
//! [`problems`] and [`stats`] are conveniences layered on top.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for configurations and results.
//! - `parallel`: [`algorithm::compare`] runs on rayon's thread pool.

pub mod acor;
pub mod algorithm;
pub mod benchmarks;
pub mod boundary;
pub mod clock;
pub mod de;
pub mod engine;
pub mod error;
pub mod ga;
pub mod problem;
pub mod problems;
pub mod pso;
pub mod random;
pub mod sa;
pub mod stats;

#[cfg(test)]
mod testing;
