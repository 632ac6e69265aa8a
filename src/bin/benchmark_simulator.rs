//! Measure single-trial throughput and optionally append one line to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_simulator
//!   cargo run --release --bin benchmark_simulator -- --log
//!
//! --log  Append one row to benchmark_log.csv (date, trials_per_sec, trials_per_min, pulls_per_sec, pulls_per_trial).

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use warpsim::gacha::{run_trial, PullConfiguration, RateState, Rng, StopPolicy, TrialPlan};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = std::env::args().any(|a| a == "--log");

    let config = PullConfiguration::character_banner();
    let state = RateState::fresh(&config);
    let plan = TrialPlan::new(StopPolicy::CountTarget(7));
    let mut rng = Rng::new(7);

    // Run for at least this long or this many trials
    const MIN_DURATION_MS: u128 = 2000;
    const MIN_TRIALS: u32 = 500;

    let start = Instant::now();
    let mut trials: u32 = 0;
    let mut pulls: u64 = 0;
    while start.elapsed().as_millis() < MIN_DURATION_MS || trials < MIN_TRIALS {
        let result = run_trial(&config, state, &plan, &mut rng)?;
        pulls += u64::from(result.total_pulls);
        trials += 1;
    }
    let elapsed_secs = start.elapsed().as_secs_f64();

    let trials_per_sec = f64::from(trials) / elapsed_secs;
    let trials_per_min = trials_per_sec * 60.0;
    let pulls_per_sec = pulls as f64 / elapsed_secs;
    let pulls_per_trial = pulls as f64 / f64::from(trials);

    println!("Simulator benchmark (E6, {}):", plan.policy);
    println!("  Trials:      {}", trials);
    println!("  Duration:    {:.2} s", elapsed_secs);
    println!("  Trials/s:    {:.2}", trials_per_sec);
    println!("  Trials/min:  {:.2}", trials_per_min);
    println!("  Pulls/s:     {:.2}", pulls_per_sec);
    println!("  Pulls/trial: {:.2}", pulls_per_trial);

    if log {
        let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!(
            "{},{:.4},{:.4},{:.4},{:.4}\n",
            date, trials_per_sec, trials_per_min, pulls_per_sec, pulls_per_trial
        );
        let path = "benchmark_log.csv";
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata().map(|m| m.len() == 0).unwrap_or(true) {
            file.write_all(b"date,trials_per_sec,trials_per_min,pulls_per_sec,pulls_per_trial\n")?;
        }
        file.write_all(line.as_bytes())?;
        file.flush()?;
        println!("Appended to {}", path);
    }
    Ok(())
}
