//! Behaviour every engine shares: bounds, monotone traces, replay,
//! timeouts and fail-fast validation.

mod common;

use common::{hill, init_tracing, quick_config, sphere};
use optimize_hub::acor::{AcorConfig, AcorOptimizer};
use optimize_hub::algorithm::{optimize, AlgorithmConfig, AlgorithmKind};
use optimize_hub::clock::ManualClock;
use optimize_hub::de::{DeConfig, DeOptimizer};
use optimize_hub::engine::{Optimizer, ResultRecord, RunStatus};
use optimize_hub::error::{FitnessFailure, OptimizeError, ValidationError};
use optimize_hub::ga::{GaConfig, GaOptimizer};
use optimize_hub::problem::{Objective, Problem};
use optimize_hub::pso::{PsoConfig, PsoOptimizer};
use optimize_hub::sa::{SaConfig, SaOptimizer};
use proptest::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn assert_monotone(result: &ResultRecord) {
    for (i, pair) in result.convergence.windows(2).enumerate() {
        let regressed = match result.objective {
            Objective::Minimize => pair[1] > pair[0],
            Objective::Maximize => pair[1] < pair[0],
        };
        assert!(
            !regressed,
            "{}: trace regressed at {i}: {pair:?}",
            result.algorithm
        );
    }
    assert_eq!(result.convergence.last(), Some(&result.best_fitness));
}

#[test]
fn traces_are_monotone_for_both_objectives() {
    init_tracing();
    for kind in AlgorithmKind::all() {
        for problem in [sphere(3, 5.0), hill(3)] {
            let result = optimize(&problem, &quick_config(kind, 17)).unwrap();
            assert_eq!(result.algorithm, kind);
            assert_eq!(result.status, RunStatus::Completed);
            assert_monotone(&result);
        }
    }
}

#[test]
fn trace_length_matches_completed_iterations() {
    for kind in AlgorithmKind::all() {
        let result = optimize(&sphere(2, 5.0), &quick_config(kind, 4)).unwrap();
        assert_eq!(result.convergence.len(), result.iterations + 1, "{kind}");
    }
}

#[test]
fn fixed_seed_replays_bit_identical() {
    for kind in AlgorithmKind::all() {
        let problem = sphere(4, 3.0);
        let a = optimize(&problem, &quick_config(kind, 2024)).unwrap();
        let b = optimize(&problem, &quick_config(kind, 2024)).unwrap();
        assert_eq!(a.convergence, b.convergence, "{kind}");
        assert_eq!(a.best_solution, b.best_solution, "{kind}");
        assert_eq!(a.evaluations, b.evaluations, "{kind}");
    }
}

#[test]
fn different_seeds_diverge() {
    for kind in AlgorithmKind::all() {
        let problem = sphere(4, 3.0);
        let a = optimize(&problem, &quick_config(kind, 1)).unwrap();
        let b = optimize(&problem, &quick_config(kind, 2)).unwrap();
        assert_ne!(a.best_solution, b.best_solution, "{kind}");
    }
}

/// A problem whose every evaluation advances `clock` by one millisecond.
fn ticking_sphere(clock: &ManualClock) -> Problem {
    let ticker = clock.clone();
    Problem::builder(2)
        .uniform_bounds(-5.0, 5.0)
        .fitness(move |x| {
            ticker.advance(Duration::from_millis(1));
            x[0] * x[0] + x[1] * x[1]
        })
        .build()
        .unwrap()
}

// Each population step makes at least five evaluations, so the deadline
// has passed once the first iteration completes.
const SHORT: Duration = Duration::from_millis(3);

#[test]
fn timeout_after_first_iteration_population_engines() {
    init_tracing();
    let runs: Vec<(AlgorithmKind, ResultRecord)> = {
        let clock = ManualClock::new();
        let pso = PsoOptimizer::new(
            ticking_sphere(&clock),
            PsoConfig::default().with_timeout(SHORT).with_seed(1),
        )
        .unwrap()
        .with_clock(clock)
        .run()
        .unwrap();

        let clock = ManualClock::new();
        let ga = GaOptimizer::new(
            ticking_sphere(&clock),
            GaConfig::default().with_timeout(SHORT).with_seed(1),
        )
        .unwrap()
        .with_clock(clock)
        .run()
        .unwrap();

        let clock = ManualClock::new();
        let de = DeOptimizer::new(
            ticking_sphere(&clock),
            DeConfig::default().with_timeout(SHORT).with_seed(1),
        )
        .unwrap()
        .with_clock(clock)
        .run()
        .unwrap();

        let clock = ManualClock::new();
        let acor = AcorOptimizer::new(
            ticking_sphere(&clock),
            AcorConfig::default().with_timeout(SHORT).with_seed(1),
        )
        .unwrap()
        .with_clock(clock)
        .run()
        .unwrap();

        vec![
            (AlgorithmKind::Pso, pso),
            (AlgorithmKind::Ga, ga),
            (AlgorithmKind::De, de),
            (AlgorithmKind::Acor, acor),
        ]
    };

    for (kind, result) in runs {
        assert_eq!(result.status, RunStatus::TimedOut, "{kind}");
        assert_eq!(result.iterations, 1, "{kind}");
        assert_eq!(result.convergence.len(), 2, "{kind}");
        assert!(result.elapsed > SHORT, "{kind}");
        assert!(result.best_fitness.is_finite());
    }
}

#[test]
fn timeout_during_first_level_sa() {
    let clock = ManualClock::new();
    let result = SaOptimizer::new(
        ticking_sphere(&clock),
        SaConfig::default().with_timeout(SHORT).with_seed(1),
    )
    .unwrap()
    .with_clock(clock)
    .run()
    .unwrap();

    assert_eq!(result.status, RunStatus::TimedOut);
    assert_eq!(result.iterations, 0);
    assert_eq!(result.convergence.len(), 1);
    // Initial point plus proposals up to the first strictly-late check.
    assert_eq!(result.evaluations, 1 + 4);
}

#[test]
fn clock_that_never_moves_runs_to_completion() {
    let clock = ManualClock::new();
    let result = DeOptimizer::new(
        sphere(2, 5.0),
        DeConfig::default()
            .with_timeout(Duration::from_nanos(1))
            .with_seed(3),
    )
    .unwrap()
    .with_clock(clock)
    .run()
    .unwrap();
    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.iterations, 50);
}

#[test]
fn optimize_can_resume_after_timeout() {
    let clock = ManualClock::new();
    let mut pso = PsoOptimizer::new(
        sphere(2, 5.0),
        PsoConfig::default()
            .with_max_iterations(5)
            .with_timeout(Duration::from_secs(1))
            .with_seed(8),
    )
    .unwrap()
    .with_clock(clock.clone());

    pso.initialize().unwrap();
    clock.set(Duration::from_secs(5));
    pso.optimize().unwrap();
    let first = pso.report().unwrap();
    assert_eq!(first.status, RunStatus::Completed);
    assert_eq!(first.iterations, 5);

    pso.optimize().unwrap();
    let second = pso.report().unwrap();
    assert_eq!(second.iterations, 10);
    assert_monotone(&second);
}

#[test]
fn invalid_parameters_rejected_before_any_evaluation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let problem = Problem::builder(2)
        .uniform_bounds(-5.0, 5.0)
        .fitness(move |x| {
            counter.fetch_add(1, Ordering::SeqCst);
            x.iter().sum()
        })
        .build()
        .unwrap();

    let rejected = [
        AlgorithmConfig::Pso(PsoConfig::default().with_swarm_size(5)),
        AlgorithmConfig::Pso(PsoConfig::default().with_coefficients(0.0, 0.0)),
        AlgorithmConfig::Ga(GaConfig::default().with_tournament_size(1)),
        AlgorithmConfig::De(DeConfig::default().with_differential_weight(2.5)),
        AlgorithmConfig::Acor(AcorConfig::default().with_archive_size(40)),
        AlgorithmConfig::Sa(SaConfig::default().with_temperatures(0.01, 100.0)),
        AlgorithmConfig::Sa(SaConfig::default().with_max_iterations(101)),
    ];
    for config in &rejected {
        let err = optimize(&problem, config).unwrap_err();
        assert!(
            matches!(err, OptimizeError::Validation(_)),
            "{:?} gave {err:?}",
            config.kind()
        );
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn validation_messages_name_field_and_range() {
    let err = PsoConfig::default().with_swarm_size(5).validate().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("swarm_size") && msg.contains('5'), "{msg}");

    let err = DeConfig::default()
        .with_differential_weight(2.5)
        .validate()
        .unwrap_err();
    assert!(matches!(err, ValidationError::OutOfRange { field: "F", .. }));
    assert!(err.to_string().contains("2.5"));
}

#[test]
fn problem_limits_are_enforced() {
    assert!(Problem::builder(51)
        .uniform_bounds(0.0, 1.0)
        .fitness(|x| x[0])
        .build()
        .is_err());
    assert!(Problem::builder(2)
        .bounds(vec![(0.0, 1.0), (2.0, 2.0)])
        .fitness(|x| x[0])
        .build()
        .is_err());
    assert!(matches!(
        Problem::builder(2).uniform_bounds(0.0, 1.0).build(),
        Err(ValidationError::MissingFitness)
    ));
}

#[test]
fn fitness_failures_abort_every_engine() {
    let nan = Problem::builder(2)
        .uniform_bounds(-1.0, 1.0)
        .fitness(|_| f64::NAN)
        .build()
        .unwrap();
    let raising = Problem::builder(2)
        .uniform_bounds(-1.0, 1.0)
        .try_fitness(|x| {
            if x[0] > 2.0 {
                Ok(0.0)
            } else {
                Err("objective blew up")
            }
        })
        .build()
        .unwrap();

    for kind in AlgorithmKind::all() {
        match optimize(&nan, &quick_config(kind, 1)) {
            Err(OptimizeError::FitnessEvaluation(e)) => {
                assert!(matches!(e.failure, FitnessFailure::NonFinite(v) if v.is_nan()));
                assert_eq!(e.solution.len(), 2);
            }
            other => panic!("{kind}: expected fitness error, got {other:?}"),
        }
        match optimize(&raising, &quick_config(kind, 1)) {
            Err(OptimizeError::FitnessEvaluation(e)) => {
                assert_eq!(e.failure, FitnessFailure::Raised("objective blew up".into()));
            }
            other => panic!("{kind}: expected fitness error, got {other:?}"),
        }
    }
}

#[test]
fn report_before_initialize_is_an_error() {
    for kind in AlgorithmKind::all() {
        let engine = quick_config(kind, 1).build(sphere(2, 1.0)).unwrap();
        assert!(matches!(engine.report(), Err(OptimizeError::NotInitialized)));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn every_evaluated_point_stays_in_bounds(
        seed in any::<u64>(),
        lower in -50.0f64..0.0,
        width in 0.01f64..20.0,
        kind_index in 0usize..5,
    ) {
        let upper = lower + width;
        let escaped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&escaped);
        let problem = Problem::builder(3)
            .bounds(vec![(lower, upper), (-1.0, 1.0), (lower, upper)])
            .fitness(move |x| {
                let inside = x[1] >= -1.0
                    && x[1] <= 1.0
                    && [x[0], x[2]].iter().all(|&v| v >= lower && v <= upper);
                if !inside {
                    flag.store(true, Ordering::SeqCst);
                }
                // Pulls candidates towards a corner to press on the bounds.
                (x[0] - upper - 10.0).powi(2) + x[1] + (x[2] - lower + 10.0).powi(2)
            })
            .build()
            .unwrap();

        let kind = AlgorithmKind::all()[kind_index];
        let result = optimize(&problem, &quick_config(kind, seed)).unwrap();
        prop_assert!(!escaped.load(Ordering::SeqCst), "{} evaluated an out-of-bounds point", kind);
        prop_assert!(problem.contains(&result.best_solution));
    }
}
