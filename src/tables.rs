//! Pre-computed percentile tables: pulls needed for every eidolon /
//! superimposition combination, and pulls needed to max out a 4★.

use serde::Serialize;

use crate::batch::{run_batch_parallel, TrialDistribution};
use crate::error::SimError;
use crate::gacha::{
    stream_seed, FourStarSource, PullConfiguration, RateState, StopPolicy, TrialPlan,
};
use crate::report::stats::{percentile_table, round2, PercentilePoint, PERCENTILE_CUTPOINTS};

pub const DEFAULT_TABLE_TRIALS: usize = 10_000;

/// Highest eidolon level (E6 = 7 copies).
pub const MAX_EIDOLON: u32 = 6;
/// Highest superimposition level (S5 = 5 copies).
pub const MAX_SUPERIMPOSITION: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileRow {
    pub level: String,
    pub mean: f64,
    pub percentiles: Vec<PercentilePoint>,
}

impl PercentileRow {
    fn from_values(level: String, values: &[u32]) -> Self {
        let mean = if values.is_empty() {
            0.0
        } else {
            values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
        };
        Self {
            level,
            mean,
            percentiles: percentile_table(values),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileTable {
    pub title: String,
    pub trials: usize,
    pub rows: Vec<PercentileRow>,
}

impl PercentileTable {
    pub fn render(&self) -> String {
        let mut out = format!("{} ({} trials)\n", self.title, self.trials);
        out.push_str(&format!("{:<8}{:>8}", "Level", "Mean"));
        for p in PERCENTILE_CUTPOINTS {
            out.push_str(&format!("{:>8}", format!("{}%", p as u32)));
        }
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format!("{:<8}{:>8}", row.level, round2(row.mean)));
            for point in &row.percentiles {
                out.push_str(&format!("{:>8}", round2(point.value)));
            }
            out.push('\n');
        }
        out
    }

    pub fn row(&self, level: &str) -> Option<&PercentileRow> {
        self.rows.iter().find(|r| r.level == level)
    }
}

fn batch(
    config: &PullConfiguration,
    policy: StopPolicy,
    trials: usize,
    seed: u64,
) -> Result<TrialDistribution, SimError> {
    run_batch_parallel(
        config,
        RateState::fresh(config),
        &TrialPlan::new(policy),
        trials,
        seed,
    )
}

/// Total pulls for every `En`, `Sm` and `EnSm` level on a fresh account.
///
/// `En` is `n + 1` featured 5★ on the character banner, `Sm` is `m` featured
/// 5★ on the light cone banner, and `EnSm` sums one trial of each.
pub fn combination_table(trials: usize, seed: u64) -> Result<PercentileTable, SimError> {
    let character = PullConfiguration::character_banner();
    let light_cone = PullConfiguration::light_cone_banner();
    let character_seed = stream_seed(seed, 0);
    let light_cone_seed = stream_seed(seed, 1);

    let eidolons = (0..=MAX_EIDOLON)
        .map(|n| {
            batch(&character, StopPolicy::CountTarget(n + 1), trials, character_seed)
                .map(|d| d.total_pulls())
        })
        .collect::<Result<Vec<_>, _>>()?;
    let superimpositions = (1..=MAX_SUPERIMPOSITION)
        .map(|m| {
            batch(&light_cone, StopPolicy::CountTarget(m), trials, light_cone_seed)
                .map(|d| d.total_pulls())
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for (n, pulls) in eidolons.iter().enumerate() {
        rows.push(PercentileRow::from_values(format!("E{n}"), pulls));
    }
    for (i, pulls) in superimpositions.iter().enumerate() {
        rows.push(PercentileRow::from_values(format!("S{}", i + 1), pulls));
    }
    for (n, character_pulls) in eidolons.iter().enumerate() {
        for (i, light_cone_pulls) in superimpositions.iter().enumerate() {
            let combined: Vec<u32> = character_pulls
                .iter()
                .zip(light_cone_pulls)
                .map(|(a, b)| a + b)
                .collect();
            rows.push(PercentileRow::from_values(format!("E{n}S{}", i + 1), &combined));
        }
    }

    Ok(PercentileTable {
        title: "Pulls per eidolon / superimposition combination".to_string(),
        trials,
        rows,
    })
}

/// Total pulls to reach E0..E6 of one featured ("ON") or one off-banner ("OFF")
/// 4★ character on the character banner.
pub fn four_star_table(trials: usize, seed: u64) -> Result<PercentileTable, SimError> {
    let config = PullConfiguration::character_banner();
    let mut rows = Vec::new();
    for (label, source, stream) in [
        ("ON", FourStarSource::Featured, 0),
        ("OFF", FourStarSource::Standard, 1),
    ] {
        let seed = stream_seed(seed, stream);
        for n in 0..=MAX_EIDOLON {
            let policy = StopPolicy::FourStarCopies {
                copies: n + 1,
                source,
            };
            let pulls = batch(&config, policy, trials, seed)?.total_pulls();
            rows.push(PercentileRow::from_values(format!("E{n} {label}"), &pulls));
        }
    }
    Ok(PercentileTable {
        title: "Pulls per 4* eidolon (featured ON / off-banner OFF)".to_string(),
        trials,
        rows,
    })
}
