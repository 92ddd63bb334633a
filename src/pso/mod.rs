//! Particle Swarm Optimization.
//!
//! Each particle carries a position, a velocity and its personal best.
//! Every iteration moves all particles with
//!
//! ```text
//! v = w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)
//! x = clip(x + v)
//! ```
//!
//! where `r1`, `r2` are fresh uniform draws per dimension, then
//! re-evaluates them and updates personal and global bests.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), *Particle Swarm Optimization*
//! - Shi & Eberhart (1998), *A Modified Particle Swarm Optimizer*

mod config;
mod runner;

pub use config::{PsoConfig, MIN_SWARM_SIZE};
pub use runner::PsoOptimizer;
