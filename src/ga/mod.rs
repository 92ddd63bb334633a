//! Real-coded Genetic Algorithm.
//!
//! Pure generational replacement: every generation the whole population is
//! replaced by offspring produced by tournament selection, SBX crossover and
//! polynomial mutation. Nothing is carried over, so the best-so-far is
//! tracked outside the population and only moves on strict improvement.
//!
//! # Key Types
//!
//! - [`GaConfig`]: algorithm parameters
//! - [`GaOptimizer`]: the engine
//!
//! # Submodules
//!
//! - [`operators`]: SBX crossover and polynomial mutation
//! - [`selection`]: tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Deb & Agrawal (1995), *Simulated Binary Crossover for Continuous Search Space*
//! - Deb & Goyal (1996), *A Combined Genetic Adaptive Search (GeneAS)*

mod config;
pub mod operators;
mod runner;
pub mod selection;

pub use config::{GaConfig, MIN_POPULATION_SIZE};
pub use runner::GaOptimizer;
