//! Ant Colony Optimization for continuous domains (ACOR).
//!
//! The pheromone model is an archive of the best `k` solutions, kept
//! sorted best-first. Each ant picks an archive member with probability
//! given by a Gaussian over its rank, then samples around it with a
//! per-dimension spread equal to `xi` times the mean distance from that
//! member to the rest of the archive. New solutions and the archive are
//! merged and truncated back to `k`, so the archive never loses its best.
//!
//! # References
//!
//! - Socha & Dorigo (2008), *Ant Colony Optimization for Continuous Domains*

mod config;
mod runner;

pub use config::{AcorConfig, MIN_COLONY_SIZE};
pub use runner::{rank_weights, AcorOptimizer};
