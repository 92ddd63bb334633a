#![allow(dead_code)]

use optimize_hub::acor::AcorConfig;
use optimize_hub::algorithm::{AlgorithmConfig, AlgorithmKind};
use optimize_hub::de::DeConfig;
use optimize_hub::ga::GaConfig;
use optimize_hub::problem::{Objective, Problem};
use optimize_hub::pso::PsoConfig;
use optimize_hub::sa::SaConfig;
use std::time::Duration;

/// Routes engine events to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn sphere(dimensions: usize, bound: f64) -> Problem {
    Problem::builder(dimensions)
        .uniform_bounds(-bound, bound)
        .fitness(|x| x.iter().map(|v| v * v).sum())
        .build()
        .unwrap()
}

/// Negated sphere shifted by 10, maximized at the origin.
pub fn hill(dimensions: usize) -> Problem {
    Problem::builder(dimensions)
        .uniform_bounds(-5.0, 5.0)
        .objective(Objective::Maximize)
        .fitness(|x| 10.0 - x.iter().map(|v| v * v).sum::<f64>())
        .build()
        .unwrap()
}

/// Small, seeded configuration for each engine.
pub fn quick_config(kind: AlgorithmKind, seed: u64) -> AlgorithmConfig {
    match kind {
        AlgorithmKind::Pso => AlgorithmConfig::Pso(
            PsoConfig::default()
                .with_swarm_size(15)
                .with_max_iterations(20)
                .with_seed(seed),
        ),
        AlgorithmKind::Ga => AlgorithmConfig::Ga(
            GaConfig::default()
                .with_population_size(20)
                .with_max_iterations(20)
                .with_seed(seed),
        ),
        AlgorithmKind::De => AlgorithmConfig::De(
            DeConfig::default()
                .with_population_size(15)
                .with_max_iterations(20)
                .with_seed(seed),
        ),
        AlgorithmKind::Acor => AlgorithmConfig::Acor(
            AcorConfig::default()
                .with_colony_size(10)
                .with_archive_size(5)
                .with_max_iterations(20)
                .with_seed(seed),
        ),
        AlgorithmKind::Sa => AlgorithmConfig::Sa(
            SaConfig::default()
                .with_temperatures(10.0, 0.1)
                .with_cooling_rate(0.8)
                .with_max_iterations(10)
                .with_seed(seed),
        ),
    }
}

/// Same as [`quick_config`] with an explicit timeout.
pub fn with_timeout(config: AlgorithmConfig, timeout: Duration) -> AlgorithmConfig {
    match config {
        AlgorithmConfig::Pso(c) => AlgorithmConfig::Pso(c.with_timeout(timeout)),
        AlgorithmConfig::Ga(c) => AlgorithmConfig::Ga(c.with_timeout(timeout)),
        AlgorithmConfig::De(c) => AlgorithmConfig::De(c.with_timeout(timeout)),
        AlgorithmConfig::Acor(c) => AlgorithmConfig::Acor(c.with_timeout(timeout)),
        AlgorithmConfig::Sa(c) => AlgorithmConfig::Sa(c.with_timeout(timeout)),
    }
}
