use std::fmt::Write as _;

use serde::Serialize;

use crate::economy::{
    missing_pulls, plan_purchase, BannerKind, PurchaseOptions, PurchasePlan, PurchaseStrategy,
};
use crate::parallel::WorkerPool;
use crate::report::simulate_scenario;
use crate::scenario::{load_scenario, validate_scenario, Scenario, ValidationSeverity};
use crate::tables::{combination_table, four_star_table, DEFAULT_TABLE_TRIALS};

const USAGE: &str = "usage: warpsim <simulate|costs|tables|validate>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Simulate,
    Costs,
    Tables,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("simulate") => Some(Command::Simulate),
        Some("costs") => Some(Command::Costs),
        Some("tables") => Some(Command::Tables),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Costs) => handle_costs(args),
        Some(Command::Tables) => handle_tables(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_simulate(args: &[String]) -> i32 {
    let mut scenario = match positional(args, 2) {
        Some(path) => match load_scenario(path) {
            Ok(scenario) => scenario,
            Err(err) => {
                eprintln!("simulation failed: {err}");
                return 1;
            }
        },
        None => Scenario::default(),
    };
    if has_flag(args, "--light-cone") {
        scenario.banner_type = BannerKind::LightCone;
    }
    if let Some(raw) = flag_value(args, "--trials") {
        scenario.multi_run = parse_u32_arg(Some(raw), "trials", 1000) as usize;
    }
    let seed = flag_value(args, "--seed").map(|raw| parse_u64_arg(Some(raw), "seed", 7));
    let histogram_csv = flag_value(args, "--histogram-csv");
    let embed_histogram = has_flag(args, "--histogram");

    let report = validate_scenario(&scenario);
    if report.has_errors() {
        eprintln!("simulation failed: invalid scenario");
        for diag in report
            .diagnostics
            .iter()
            .filter(|d| d.severity == ValidationSeverity::Error)
        {
            eprintln!("- {diag}");
        }
        return 1;
    }

    let show_progress = has_flag(args, "--progress");
    let pool = WorkerPool::from_env();
    let result = simulate_scenario(
        &scenario,
        seed,
        &pool,
        embed_histogram || histogram_csv.is_some(),
        |done, total| {
            if show_progress {
                eprintln!("progress: {done}/{total}");
            }
        },
    );

    let mut report = match result {
        Ok(report) => report,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            return 1;
        }
    };
    if let (Some(path), Some(histogram)) = (histogram_csv, &report.histogram) {
        if let Err(err) = histogram.write_csv_file(path) {
            eprintln!("histogram export to {path} failed: {err}");
            return 1;
        }
        eprintln!("histogram written to {path}");
    }
    if !embed_histogram {
        report.histogram = None;
    }

    if has_flag(args, "--table") {
        print!("{}", report.render_text());
        0
    } else {
        print_json(&report, "simulation report")
    }
}

#[derive(Debug, Serialize)]
struct OptionPlan {
    options: PurchaseOptions,
    plan: PurchasePlan,
}

#[derive(Debug, Serialize)]
struct CostsOutput {
    pulls: u64,
    saved_pulls: u64,
    missing_pulls: u64,
    plans: Vec<OptionPlan>,
}

fn handle_costs(args: &[String]) -> i32 {
    let Some(raw) = positional(args, 2) else {
        eprintln!("usage: warpsim costs <pulls> [--saved N]");
        return 2;
    };
    let pulls = parse_u64_arg(Some(raw), "pulls", 0);
    let saved = parse_u64_arg(flag_value(args, "--saved"), "saved", 0);
    let missing = missing_pulls(pulls, saved);

    let plans: Vec<OptionPlan> = [
        (false, PurchaseStrategy::LeastExpensive),
        (true, PurchaseStrategy::LeastExpensive),
        (false, PurchaseStrategy::MostEfficient),
        (true, PurchaseStrategy::MostEfficient),
    ]
    .into_iter()
    .map(|(first_top_up, strategy)| {
        let options = PurchaseOptions::new(first_top_up, strategy);
        OptionPlan {
            options,
            plan: plan_purchase(missing, options),
        }
    })
    .collect();

    if has_flag(args, "--table") {
        println!("strategy\tfirst_top_up\tjade_purchased\tcost\tleftover_jade");
        for OptionPlan { options, plan } in &plans {
            println!(
                "{:?}\t{}\t{}\t{}\t{}",
                options.strategy,
                options.first_top_up,
                plan.jade_purchased,
                plan.cost,
                plan.leftover_jade
            );
        }
        return 0;
    }

    print_json(
        &CostsOutput {
            pulls,
            saved_pulls: saved,
            missing_pulls: missing,
            plans,
        },
        "cost plans",
    )
}

fn handle_tables(args: &[String]) -> i32 {
    let kind = positional(args, 2).map(String::as_str);
    let trials = parse_u32_arg(positional(args, 3), "trials", DEFAULT_TABLE_TRIALS as u32) as usize;
    let seed = parse_u64_arg(positional(args, 4), "seed", 7);
    let pool = WorkerPool::from_env();

    let table = match kind {
        Some("combination") => pool.install(|| combination_table(trials, seed)),
        Some("four-star") => pool.install(|| four_star_table(trials, seed)),
        _ => {
            eprintln!("usage: warpsim tables <combination|four-star> [trials] [seed]");
            return 2;
        }
    };

    match table {
        Ok(table) if has_flag(args, "--table") => {
            print!("{}", table.render());
            0
        }
        Ok(table) => print_json(&table, "percentile table"),
        Err(err) => {
            eprintln!("table generation failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let Some(path) = positional(args, 2) else {
        eprintln!("usage: warpsim validate <scenario.yaml|scenario.json>");
        return 2;
    };

    let scenario = match load_scenario(path) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };

    let report = validate_scenario(&scenario);
    for diag in &report.diagnostics {
        eprintln!("- {diag}");
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} error(s)",
            report.count(ValidationSeverity::Error)
        );
        1
    } else {
        println!("validation passed: {path}");
        0
    }
}

fn print_json<T: Serialize>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
}

/// The `n`-th argument counting from the subcommand, skipping flags and their values.
fn positional(args: &[String], n: usize) -> Option<&String> {
    let mut skip_next = false;
    let mut index = 0;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = matches!(
                arg.as_str(),
                "--trials" | "--seed" | "--saved" | "--histogram-csv"
            );
            continue;
        }
        if index == n {
            return Some(arg);
        }
        index += 1;
    }
    None
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                let mut msg = String::new();
                let _ = write!(
                    &mut msg,
                    "invalid {name} '{value}', defaulting to {default}"
                );
                eprintln!("{msg}");
            }
            default
        })
}
