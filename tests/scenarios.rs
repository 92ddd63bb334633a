//! End-to-end optimization scenarios.

mod common;

use common::init_tracing;
use optimize_hub::acor::{AcorConfig, AcorOptimizer};
use optimize_hub::algorithm::{compare, optimize, AlgorithmConfig, AlgorithmKind};
use optimize_hub::benchmarks::Benchmark;
use optimize_hub::boundary::BoundaryPolicy;
use optimize_hub::de::{DeConfig, DeOptimizer, DeStrategy};
use optimize_hub::engine::{Optimizer, RunMetadata, RunStatus};
use optimize_hub::ga::GaConfig;
use optimize_hub::problem::Problem;
use optimize_hub::problems::{Item, Knapsack, Tsp};
use optimize_hub::pso::{PsoConfig, PsoOptimizer};
use optimize_hub::sa::{CoolingSchedule, SaConfig, SaOptimizer};
use optimize_hub::stats::{downsample, ConvergenceSummary};

fn norm(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}

#[test]
fn pso_sphere_2d() {
    init_tracing();
    let problem = Problem::builder(2)
        .bounds(vec![(-5.0, 5.0), (-5.0, 5.0)])
        .minimize()
        .fitness(|x| x.iter().map(|v| v * v).sum())
        .build()
        .unwrap();
    let config = PsoConfig::default()
        .with_swarm_size(30)
        .with_max_iterations(50)
        .with_seed(42);
    let result = PsoOptimizer::new(problem, config).unwrap().run().unwrap();

    assert!(result.best_fitness < 1e-3, "best = {}", result.best_fitness);
    assert!(norm(&result.best_solution) < 0.1);
    assert_eq!(result.iterations, 50);
    assert_eq!(result.evaluations, 30 * 51);
    assert_eq!(result.metadata, RunMetadata::Pso { swarm_size: 30 });
}

#[test]
fn de_maximize_shifted_peak() {
    let problem = Problem::builder(2)
        .uniform_bounds(-5.0, 5.0)
        .maximize()
        .fitness(|x| -((x[0] - 1.0).powi(2) + (x[1] - 2.0).powi(2)) + 10.0)
        .build()
        .unwrap();
    let config = DeConfig::default()
        .with_strategy(DeStrategy::Rand1)
        .with_differential_weight(0.8)
        .with_crossover_probability(0.9)
        .with_population_size(30)
        .with_max_iterations(50)
        .with_seed(42);
    let result = DeOptimizer::new(problem, config).unwrap().run().unwrap();

    assert!(result.best_fitness > 9.0, "best = {}", result.best_fitness);
    let offset = [result.best_solution[0] - 1.0, result.best_solution[1] - 2.0];
    assert!(norm(&offset) < 0.5);
}

#[test]
fn de_strategies_and_boundaries_all_converge_on_sphere() {
    let problem = Benchmark::Sphere.problem(3).unwrap();
    for strategy in [DeStrategy::Rand1, DeStrategy::Best1, DeStrategy::Rand2] {
        for boundary in [BoundaryPolicy::Clip, BoundaryPolicy::Reflect, BoundaryPolicy::Wrap] {
            let config = DeConfig::default()
                .with_strategy(strategy)
                .with_boundary(boundary)
                .with_seed(5);
            let result = DeOptimizer::new(problem.clone(), config)
                .unwrap()
                .run()
                .unwrap();
            assert!(
                result.best_fitness < 0.5,
                "{strategy}/{boundary:?}: {}",
                result.best_fitness
            );
            assert_eq!(result.metadata, RunMetadata::De { strategy, boundary });
        }
    }
}

#[test]
fn acor_reaches_high_precision_on_sphere() {
    let problem = Benchmark::Sphere.problem(2).unwrap();
    let config = AcorConfig::default().with_max_iterations(100).with_seed(42);
    let result = AcorOptimizer::new(problem, config).unwrap().run().unwrap();
    assert!(result.best_fitness < 1e-4, "best = {}", result.best_fitness);
}

#[test]
fn sa_schedules_all_finish_below_final_temperature() {
    let problem = Benchmark::Sphere.problem(3).unwrap();
    for schedule in [
        CoolingSchedule::Geometric,
        CoolingSchedule::Linear,
        CoolingSchedule::Logarithmic,
    ] {
        let config = SaConfig::default()
            .with_cooling_schedule(schedule)
            .with_seed(3);
        let result = SaOptimizer::new(problem.clone(), config)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(result.status, RunStatus::Completed);
        match result.metadata {
            RunMetadata::Sa {
                final_temperature,
                cooling_schedule,
                ..
            } => {
                assert!(final_temperature <= 0.01 + 1e-12, "{schedule}");
                assert_eq!(cooling_schedule, schedule);
            }
            other => panic!("unexpected metadata {other:?}"),
        }
    }
}

#[test]
fn compare_runs_every_engine_on_the_same_problem() {
    let problem = Benchmark::Rastrigin.problem(2).unwrap();
    let configs: Vec<AlgorithmConfig> = AlgorithmKind::all()
        .into_iter()
        .map(AlgorithmConfig::default_for)
        .collect();
    let results = compare(&problem, &configs);

    assert_eq!(results.len(), 5);
    for (result, kind) in results.iter().zip(AlgorithmKind::all()) {
        let result = result.as_ref().unwrap();
        assert_eq!(result.algorithm, kind);
        assert!(problem.contains(&result.best_solution));
        assert!(result.best_fitness < result.convergence[0] || result.best_fitness < 1e-9);
    }
}

#[test]
fn knapsack_via_differential_evolution() {
    let items = vec![
        Item { weight: 12.0, value: 4.0 },
        Item { weight: 2.0, value: 2.0 },
        Item { weight: 1.0, value: 1.0 },
        Item { weight: 1.0, value: 2.0 },
        Item { weight: 4.0, value: 10.0 },
    ];
    let knapsack = Knapsack::new(items, 15.0).unwrap();
    let config = AlgorithmConfig::De(DeConfig::default().with_seed(21));
    let result = optimize(&knapsack.problem().unwrap(), &config).unwrap();

    // Everything except the 12 kg item: value 15, weight 8.
    assert_eq!(result.best_fitness, -15.0);
    let selection = knapsack.decode(&result.best_solution);
    assert_eq!(selection.items, vec![1, 2, 3, 4]);
    assert!(selection.within_capacity);
}

#[test]
fn tsp_on_a_circle_finds_the_perimeter() {
    let n = 8;
    let cities: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / n as f64;
            (angle.cos(), angle.sin())
        })
        .collect();
    let tsp = Tsp::new(cities).unwrap();
    let perimeter = 2.0 * n as f64 * (std::f64::consts::PI / n as f64).sin();

    let config = AlgorithmConfig::Ga(
        GaConfig::default()
            .with_population_size(60)
            .with_max_iterations(100)
            .with_seed(8),
    );
    let result = optimize(&tsp.problem().unwrap(), &config).unwrap();
    let route = tsp.decode(&result.best_solution);

    assert_eq!(route.order.len(), n);
    assert!((route.length - result.best_fitness).abs() < 1e-9);
    assert!(route.length < perimeter * 1.3, "length = {}", route.length);
}

#[test]
fn convergence_summary_and_downsampling() {
    let problem = Benchmark::Ackley.problem(2).unwrap();
    let config = AlgorithmConfig::Sa(SaConfig::default().with_seed(12));
    let result = optimize(&problem, &config).unwrap();

    let summary = ConvergenceSummary::from_record(&result).unwrap();
    assert_eq!(summary.initial, result.convergence[0]);
    assert_eq!(summary.final_value, result.best_fitness);
    assert!(summary.improvement >= 0.0);

    let points = downsample(&result.convergence, 100);
    assert_eq!(points.len(), 100);
    assert_eq!(points.first(), result.convergence.first());
    assert_eq!(points.last(), result.convergence.last());
}
