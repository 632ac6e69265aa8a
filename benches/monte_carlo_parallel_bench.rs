//! Compare sequential vs parallel batch run times.
//!
//! Run with: `cargo bench --bench monte_carlo_parallel`
//! Or quick comparison: `cargo run --bin benchmark_parallel_speedup` (see src/bin)

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use warpsim::batch::{run_batch, run_batch_parallel};
use warpsim::gacha::{PullConfiguration, RateState, StopPolicy, TrialPlan};

fn bench_batch_sequential_vs_parallel(c: &mut Criterion) {
    let config = PullConfiguration::character_banner();
    let state = RateState::fresh(&config);
    let plan = TrialPlan::new(StopPolicy::CountTarget(1));
    let seed = 42u64;
    let trials = 20_000;

    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(20);
    group.measurement_time(std::time::Duration::from_secs(10));

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(run_batch(&config, state, &plan, trials, seed)));
    });

    group.bench_function("parallel", |b| {
        b.iter(|| black_box(run_batch_parallel(&config, state, &plan, trials, seed)));
    });

    group.finish();
}

criterion_group!(benches, bench_batch_sequential_vs_parallel);
criterion_main!(benches);
