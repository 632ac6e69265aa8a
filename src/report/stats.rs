//! Descriptive statistics over a batch: mean, sample deviation, range and percentiles.

use serde::Serialize;

/// Percentile cut-points reported for every distribution.
pub const PERCENTILE_CUTPOINTS: [f64; 21] = [
    5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0,
    80.0, 85.0, 90.0, 95.0, 99.0, 100.0,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1). `None` for fewer than two values.
    pub stdev: Option<f64>,
    pub min: u32,
    pub max: u32,
}

impl SummaryStatistics {
    pub fn from_values(values: &[u32]) -> Option<Self> {
        let count = values.len();
        let min = values.iter().copied().min()?;
        let max = values.iter().copied().max()?;
        let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / count as f64;
        let stdev = (count > 1).then(|| {
            let ss: f64 = values
                .iter()
                .map(|&v| (f64::from(v) - mean).powi(2))
                .sum();
            (ss / (count - 1) as f64).sqrt()
        });
        Some(Self {
            count,
            mean,
            stdev,
            min,
            max,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentilePoint {
    pub percentile: f64,
    pub value: f64,
}

/// Percentile of already sorted values, interpolating linearly between closest ranks.
pub fn percentile_sorted(sorted: &[u32], percentile: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (percentile.clamp(0.0, 100.0) / 100.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let low = f64::from(sorted[lower]);
    let high = f64::from(sorted[upper.min(last)]);
    Some(low + (high - low) * (rank - lower as f64))
}

pub fn percentile(values: &[u32], percentile: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    percentile_sorted(&sorted, percentile)
}

/// Values at every [PERCENTILE_CUTPOINTS] entry. Empty input gives an empty table.
pub fn percentile_table(values: &[u32]) -> Vec<PercentilePoint> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    PERCENTILE_CUTPOINTS
        .iter()
        .filter_map(|&p| {
            percentile_sorted(&sorted, p).map(|value| PercentilePoint {
                percentile: p,
                value,
            })
        })
        .collect()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Two-column cut-point listing (5..50 left, 55..99 right, then the maximum).
pub fn render_percentiles(points: &[PercentilePoint]) -> String {
    let mut out = String::from("Percentile Cutpoints (Inclusive):\n");
    let (body, max) = match points.split_last() {
        Some((max, body)) if max.percentile >= 100.0 => (body, Some(max)),
        _ => (points, None),
    };
    let half = (body.len() + 1) / 2;
    for i in 0..half {
        let left = &body[i];
        out.push_str(&format!(
            "{:>2}% : {:^7}",
            left.percentile as u32,
            round2(left.value)
        ));
        if let Some(right) = body.get(i + half) {
            out.push_str(&format!(
                " | {:>2}% : {:^7}",
                right.percentile as u32,
                round2(right.value)
            ));
        }
        out.push('\n');
    }
    if let Some(max) = max {
        out.push_str(&format!("Maximum Value (100%): {:^7}\n", round2(max.value)));
    }
    out
}
