//! Algorithm catalogue and tagged-union dispatch.
//!
//! [`AlgorithmConfig`] lets callers pick an engine at runtime and drive it
//! through a single call site:
//!
//! ```
//! use optimize_hub::algorithm::{optimize, AlgorithmConfig};
//! use optimize_hub::de::DeConfig;
//! use optimize_hub::problem::Problem;
//!
//! let problem = Problem::builder(2)
//!     .uniform_bounds(-5.0, 5.0)
//!     .fitness(|x| x.iter().map(|v| v * v).sum())
//!     .build()
//!     .unwrap();
//! let config = AlgorithmConfig::De(DeConfig::default().with_seed(1));
//! let result = optimize(&problem, &config).unwrap();
//! assert!(result.best_fitness < 1e-2);
//! ```

use crate::acor::{AcorConfig, AcorOptimizer};
use crate::de::{DeConfig, DeOptimizer};
use crate::engine::{Optimizer, ResultRecord};
use crate::error::{Result, ValidationError};
use crate::ga::{GaConfig, GaOptimizer};
use crate::problem::Problem;
use crate::pso::{PsoConfig, PsoOptimizer};
use crate::sa::{SaConfig, SaOptimizer};
use std::fmt;
use std::str::FromStr;

/// The five available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmKind {
    #[cfg_attr(feature = "serde", serde(rename = "particle_swarm"))]
    Pso,
    #[cfg_attr(feature = "serde", serde(rename = "genetic_algorithm"))]
    Ga,
    #[cfg_attr(feature = "serde", serde(rename = "differential_evolution"))]
    De,
    #[cfg_attr(feature = "serde", serde(rename = "ant_colony"))]
    Acor,
    #[cfg_attr(feature = "serde", serde(rename = "simulated_annealing"))]
    Sa,
}

impl AlgorithmKind {
    /// Every kind, in catalogue order.
    pub fn all() -> [AlgorithmKind; 5] {
        [
            AlgorithmKind::Pso,
            AlgorithmKind::Ga,
            AlgorithmKind::De,
            AlgorithmKind::Acor,
            AlgorithmKind::Sa,
        ]
    }

    /// Stable identifier, also used by [`FromStr`].
    pub fn id(self) -> &'static str {
        match self {
            AlgorithmKind::Pso => "particle_swarm",
            AlgorithmKind::Ga => "genetic_algorithm",
            AlgorithmKind::De => "differential_evolution",
            AlgorithmKind::Acor => "ant_colony",
            AlgorithmKind::Sa => "simulated_annealing",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Pso => "Particle Swarm Optimization",
            AlgorithmKind::Ga => "Genetic Algorithm",
            AlgorithmKind::De => "Differential Evolution",
            AlgorithmKind::Acor => "Ant Colony Optimization",
            AlgorithmKind::Sa => "Simulated Annealing",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AlgorithmKind::Pso => {
                "Particles move through the search space pulled towards their own best \
                 position and the swarm's global best."
            }
            AlgorithmKind::Ga => {
                "A population evolves under tournament selection, simulated binary \
                 crossover and polynomial mutation."
            }
            AlgorithmKind::De => {
                "New candidates are built from scaled vector differences between \
                 population members and kept only when they improve."
            }
            AlgorithmKind::Acor => {
                "Ants sample around members of a ranked archive of good solutions \
                 using Gaussian kernels."
            }
            AlgorithmKind::Sa => {
                "A single trajectory accepts worse moves with a probability that \
                 shrinks as the temperature falls."
            }
        }
    }

    pub fn use_cases(self) -> &'static [&'static str] {
        match self {
            AlgorithmKind::Pso => &[
                "Continuous optimization",
                "Non-convex problems",
                "Smooth function optimization",
            ],
            AlgorithmKind::Ga => &[
                "Multi-modal optimization",
                "Combinatorial problems via random keys",
                "Search spaces with many local optima",
            ],
            AlgorithmKind::De => &[
                "Global optimization",
                "Non-differentiable functions",
                "Numerical optimization",
            ],
            AlgorithmKind::Acor => &[
                "High-precision continuous optimization",
                "Engineering design optimization",
            ],
            AlgorithmKind::Sa => &[
                "Escaping local minima",
                "Cheap single-solution search",
            ],
        }
    }

    /// Catalogue entry with the default parameters.
    pub fn info(self) -> AlgorithmInfo {
        AlgorithmInfo {
            kind: self,
            id: self.id(),
            name: self.name(),
            description: self.description(),
            use_cases: self.use_cases(),
            default_config: AlgorithmConfig::default_for(self),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AlgorithmKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AlgorithmKind::all()
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| {
                ValidationError::out_of_range(
                    "algorithm",
                    s,
                    "particle_swarm, genetic_algorithm, differential_evolution, \
                     ant_colony or simulated_annealing",
                )
            })
    }
}

/// Describes one algorithm for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmInfo {
    pub kind: AlgorithmKind,
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub use_cases: &'static [&'static str],
    pub default_config: AlgorithmConfig,
}

/// Lists every algorithm with its defaults.
pub fn catalogue() -> Vec<AlgorithmInfo> {
    AlgorithmKind::all().into_iter().map(AlgorithmKind::info).collect()
}

/// Parameters for any one engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "algorithm", content = "params")
)]
pub enum AlgorithmConfig {
    #[cfg_attr(feature = "serde", serde(rename = "particle_swarm"))]
    Pso(PsoConfig),
    #[cfg_attr(feature = "serde", serde(rename = "genetic_algorithm"))]
    Ga(GaConfig),
    #[cfg_attr(feature = "serde", serde(rename = "differential_evolution"))]
    De(DeConfig),
    #[cfg_attr(feature = "serde", serde(rename = "ant_colony"))]
    Acor(AcorConfig),
    #[cfg_attr(feature = "serde", serde(rename = "simulated_annealing"))]
    Sa(SaConfig),
}

impl AlgorithmConfig {
    /// Default parameters for `kind`.
    pub fn default_for(kind: AlgorithmKind) -> Self {
        match kind {
            AlgorithmKind::Pso => AlgorithmConfig::Pso(PsoConfig::default()),
            AlgorithmKind::Ga => AlgorithmConfig::Ga(GaConfig::default()),
            AlgorithmKind::De => AlgorithmConfig::De(DeConfig::default()),
            AlgorithmKind::Acor => AlgorithmConfig::Acor(AcorConfig::default()),
            AlgorithmKind::Sa => AlgorithmConfig::Sa(SaConfig::default()),
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        match self {
            AlgorithmConfig::Pso(_) => AlgorithmKind::Pso,
            AlgorithmConfig::Ga(_) => AlgorithmKind::Ga,
            AlgorithmConfig::De(_) => AlgorithmKind::De,
            AlgorithmConfig::Acor(_) => AlgorithmKind::Acor,
            AlgorithmConfig::Sa(_) => AlgorithmKind::Sa,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        match self {
            AlgorithmConfig::Pso(c) => c.validate(),
            AlgorithmConfig::Ga(c) => c.validate(),
            AlgorithmConfig::De(c) => c.validate(),
            AlgorithmConfig::Acor(c) => c.validate(),
            AlgorithmConfig::Sa(c) => c.validate(),
        }
    }

    /// Constructs the matching engine for `problem`.
    pub fn build(&self, problem: Problem) -> Result<Box<dyn Optimizer>> {
        let engine: Box<dyn Optimizer> = match self {
            AlgorithmConfig::Pso(c) => Box::new(PsoOptimizer::new(problem, c.clone())?),
            AlgorithmConfig::Ga(c) => Box::new(GaOptimizer::new(problem, c.clone())?),
            AlgorithmConfig::De(c) => Box::new(DeOptimizer::new(problem, c.clone())?),
            AlgorithmConfig::Acor(c) => Box::new(AcorOptimizer::new(problem, c.clone())?),
            AlgorithmConfig::Sa(c) => Box::new(SaOptimizer::new(problem, c.clone())?),
        };
        Ok(engine)
    }
}

/// Builds the engine named by `config` and runs it to completion.
pub fn optimize(problem: &Problem, config: &AlgorithmConfig) -> Result<ResultRecord> {
    config.build(problem.clone())?.run()
}

/// Runs every configuration against `problem` on its own engine instance.
///
/// Results come back in the order of `configs`. With the `parallel`
/// feature the runs execute on rayon's thread pool.
pub fn compare(problem: &Problem, configs: &[AlgorithmConfig]) -> Vec<Result<ResultRecord>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        configs
            .par_iter()
            .map(|config| optimize(problem, config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        configs
            .iter()
            .map(|config| optimize(problem, config))
            .collect()
    }
}
