//! Batch aggregation: statistical end-to-end checks and parallel determinism.

use warpsim::batch::{run_batch, run_batch_parallel, run_batch_with_progress, CancelToken};
use warpsim::gacha::{PullConfiguration, RateState, StopPolicy, TrialPlan};
use warpsim::parallel::{run_batch_in_pool, WorkerPool};
use warpsim::report::SummaryStatistics;
use warpsim::SimError;

/// 0.6% base, soft pity from 73 (+6 per pull), hard pity 90.
fn e2e_config(featured_odds: f64) -> PullConfiguration {
    PullConfiguration {
        featured_odds,
        ..PullConfiguration::character_banner()
    }
}

#[test]
fn mean_pulls_to_first_featured_at_even_odds() {
    let config = e2e_config(50.0);
    let dist = run_batch_parallel(
        &config,
        RateState::fresh(&config),
        &StopPolicy::CountTarget(1).into(),
        100_000,
        2024,
    )
    .unwrap();
    let stats = SummaryStatistics::from_values(&dist.total_pulls()).unwrap();
    // Exact expectation 93.45 pulls, standard deviation about 43.
    assert!((stats.mean - 93.45).abs() < 1.0, "mean {}", stats.mean);
    assert!(stats.min >= 1);
    assert!(stats.max <= 180);
}

#[test]
fn mean_pulls_to_first_five_star() {
    let config = e2e_config(100.0);
    let dist = run_batch_parallel(
        &config,
        RateState::fresh(&config),
        &StopPolicy::CountTarget(1).into(),
        100_000,
        7,
    )
    .unwrap();
    let stats = SummaryStatistics::from_values(&dist.total_pulls()).unwrap();
    assert!((stats.mean - 62.30).abs() < 1.0, "mean {}", stats.mean);
    assert!(stats.max <= 90);
}

#[test]
fn parallel_batch_equals_sequential_batch() {
    let config = PullConfiguration::character_banner();
    let state = RateState::seeded(&config, 4, 30, false, true);
    let plan = TrialPlan::new(StopPolicy::CountTarget(2)).with_pull_cap(400);
    let seq = run_batch(&config, state, &plan, 3_000, 99).unwrap();
    let par = run_batch_parallel(&config, state, &plan, 3_000, 99).unwrap();
    let pooled = run_batch_in_pool(&config, state, &plan, 3_000, 99, &WorkerPool::with_workers(3))
        .unwrap();
    assert_eq!(seq, par);
    assert_eq!(seq, pooled);
}

#[test]
fn different_seeds_give_different_batches() {
    let config = PullConfiguration::character_banner();
    let plan = TrialPlan::new(StopPolicy::CountTarget(1));
    let a = run_batch(&config, RateState::fresh(&config), &plan, 500, 1).unwrap();
    let b = run_batch(&config, RateState::fresh(&config), &plan, 500, 2).unwrap();
    assert_ne!(a, b);
}

#[test]
fn pull_budget_batch_has_constant_totals() {
    let config = PullConfiguration::light_cone_banner();
    let dist = run_batch(
        &config,
        RateState::fresh(&config),
        &StopPolicy::PullBudget(160).into(),
        1_000,
        3,
    )
    .unwrap();
    assert_eq!(dist.len(), 1_000);
    assert!(dist.total_pulls().iter().all(|&p| p == 160));
    let means = dist.mean_counts();
    let sum = means.standard3 + means.standard4 + means.featured4 + means.standard5 + means.featured5;
    assert!((sum - 160.0).abs() < 1e-9);
    // 160 pulls past an 80 hard pity: at least two 5★ per trial.
    assert!(dist
        .iter()
        .all(|r| r.counts.standard5 + r.counts.featured5 >= 2));
}

#[test]
fn unbounded_batch_is_rejected_up_front() {
    let config = PullConfiguration {
        base_5star_chance: 0.0,
        pity_increment_5star: 0.0,
        hard_pity_cap: None,
        ..PullConfiguration::character_banner()
    };
    let err = run_batch_parallel(
        &config,
        RateState::fresh(&config),
        &StopPolicy::CountTarget(1).into(),
        10,
        1,
    )
    .unwrap_err();
    assert!(matches!(err, SimError::UnboundedTrial { .. }));
}

#[test]
fn zero_trials_give_an_empty_distribution() {
    let config = PullConfiguration::character_banner();
    let dist = run_batch(
        &config,
        RateState::fresh(&config),
        &StopPolicy::CountTarget(1).into(),
        0,
        1,
    )
    .unwrap();
    assert!(dist.is_empty());
}

#[test]
fn cancelling_mid_batch_reports_progress_so_far() {
    let config = PullConfiguration::character_banner();
    let plan = TrialPlan::new(StopPolicy::PullBudget(50));
    let token = CancelToken::new();
    let err = run_batch_with_progress(
        &config,
        RateState::fresh(&config),
        &plan,
        4_000,
        8,
        Some(&token),
        |done, _| {
            if done >= 1_000 {
                token.cancel();
            }
        },
    )
    .unwrap_err();
    match err {
        SimError::Cancelled { completed, total } => {
            assert_eq!(total, 4_000);
            assert!(completed >= 1_000 && completed < 4_000);
        }
        other => panic!("expected cancellation, got {other:?}"),
    }
}
