//! Descriptive output of a batch: statistics, histogram and the full scenario report.

pub mod histogram;
pub mod stats;
pub mod summary;

pub use histogram::{Histogram, HistogramBin};
pub use stats::{
    percentile, percentile_sorted, percentile_table, render_percentiles, round2,
    PercentilePoint, SummaryStatistics, PERCENTILE_CUTPOINTS,
};
pub use summary::{simulate_scenario, CaseCost, CaseKind, SimulationReport};
