//! Run one batch sequentially and once in parallel, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup [trials]

use std::time::Instant;

use warpsim::batch::{run_batch, run_batch_parallel};
use warpsim::gacha::{PullConfiguration, RateState, StopPolicy, TrialPlan};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let trials = std::env::args()
        .nth(1)
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(200_000);
    let seed = 12345u64;
    let config = PullConfiguration::character_banner();
    let state = RateState::fresh(&config);
    let plan = TrialPlan::new(StopPolicy::CountTarget(1));

    println!(
        "Batch: {} trials of {} (threads={})",
        trials,
        plan.policy,
        rayon::current_num_threads()
    );
    println!();

    let t0 = Instant::now();
    let seq = run_batch(&config, state, &plan, trials, seed)?;
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    println!(
        "Sequential:  {:.2} ms  ({:.1} trials/s)",
        seq_ms,
        trials as f64 / elapsed_seq.as_secs_f64()
    );

    let t0 = Instant::now();
    let par = run_batch_parallel(&config, state, &plan, trials, seed)?;
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!(
        "Parallel:    {:.2} ms  ({:.1} trials/s)",
        par_ms,
        trials as f64 / elapsed_par.as_secs_f64()
    );

    println!();
    println!("Speedup:     {:.2}x faster (parallel vs sequential)", seq_ms / par_ms);

    if seq != par {
        return Err("sequential and parallel batches differ".into());
    }
    println!("(Results match sequential vs parallel)");
    Ok(())
}
