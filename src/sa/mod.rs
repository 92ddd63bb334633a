//! Simulated Annealing.
//!
//! A single-trajectory search that accepts worse moves with probability
//! `exp(−ΔE/T)` (Metropolis criterion), lowering `T` after each
//! temperature level until it reaches `final_temp`.
//!
//! # Key Types
//!
//! - [`SaConfig`]: temperatures, proposals per level, neighbor spread
//! - [`CoolingSchedule`]: geometric, linear or logarithmic cooling
//! - [`SaOptimizer`]: the engine
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod runner;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::SaOptimizer;
