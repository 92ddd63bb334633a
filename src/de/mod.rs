//! Differential Evolution.
//!
//! For every target vector a mutant is built from scaled differences of
//! other members, projected by the configured [`BoundaryPolicy`], and mixed
//! with the target by binomial crossover. The trial replaces the target
//! only on strict improvement. Replacement happens in place, so targets
//! later in the same generation already see the updated members.
//!
//! [`BoundaryPolicy`]: crate::boundary::BoundaryPolicy
//!
//! # References
//!
//! - Storn & Price (1997), *Differential Evolution: A Simple and Efficient
//!   Heuristic for Global Optimization over Continuous Spaces*
//! - Das & Suganthan (2011), *Differential Evolution: A Survey of the
//!   State-of-the-Art*

mod config;
mod runner;

pub use config::{DeConfig, DeStrategy, MIN_POPULATION_SIZE};
pub use runner::DeOptimizer;
