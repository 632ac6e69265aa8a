//! Full report of one scenario run: pull statistics, purchase costs for the
//! best, mean and worst trial, mean rarity split, stardust and percentiles.

use serde::Serialize;

use crate::batch::{run_batch_with_progress, MeanOutcomeCounts, TrialDistribution};
use crate::economy::{
    estimate_stardust, missing_pulls, missing_pulls_f64, plan_purchase, rounded_counts, Cents,
    PurchaseOptions, StardustEstimate, StardustRules, JADE_PER_PULL,
};
use crate::error::SimError;
use crate::gacha::{entropy_seed, stream_seed, Outcome, Rng};
use crate::parallel::WorkerPool;
use crate::report::histogram::Histogram;
use crate::report::stats::{
    percentile_table, render_percentiles, round2, PercentilePoint, SummaryStatistics,
};
use crate::scenario::{RunMode, Scenario};

/// Stream index reserved for the stardust roll, past any trial index.
const STARDUST_STREAM: u64 = u64::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    Minimum,
    Mean,
    Maximum,
}

impl CaseKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Minimum => "Minimum Case",
            Self::Mean => "Mean Case",
            Self::Maximum => "Maximum Case",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaseCost {
    pub case: CaseKind,
    pub total_pulls: f64,
    pub missing_pulls: u64,
    pub jade: u64,
    pub cost: Cents,
    pub leftover_jade: u64,
}

impl CaseCost {
    fn new(case: CaseKind, total_pulls: f64, missing: u64, options: PurchaseOptions) -> Self {
        let plan = plan_purchase(missing, options);
        Self {
            case,
            total_pulls,
            missing_pulls: missing,
            jade: missing * JADE_PER_PULL,
            cost: plan.cost,
            leftover_jade: plan.leftover_jade,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub mode: RunMode,
    pub target_number: u32,
    pub target_pulls: u32,
    pub trials: usize,
    pub seed: u64,
    pub capped_trials: usize,
    /// Total pulls per trial.
    pub pulls: SummaryStatistics,
    /// Featured 5★ per trial.
    pub featured5: SummaryStatistics,
    pub mean_counts: MeanOutcomeCounts,
    pub costs: Vec<CaseCost>,
    pub stardust: StardustEstimate,
    /// Over total pulls in `to_number` mode, over featured 5★ counts in `to_pulls` mode.
    pub percentiles: Vec<PercentilePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
}

impl SimulationReport {
    /// Summarize a finished batch. `None` when the batch is empty.
    pub fn from_distribution(
        scenario: &Scenario,
        dist: &TrialDistribution,
        seed: u64,
        with_histogram: bool,
    ) -> Option<Self> {
        let totals = dist.total_pulls();
        let featured = dist.featured5_counts();
        let pulls = SummaryStatistics::from_values(&totals)?;
        let featured5 = SummaryStatistics::from_values(&featured)?;
        let mean_counts = dist.mean_counts();

        let options = scenario.purchase_options();
        let saved = scenario.wallet.saved_pulls;
        let costs = vec![
            CaseCost::new(
                CaseKind::Minimum,
                f64::from(pulls.min),
                missing_pulls(u64::from(pulls.min), saved),
                options,
            ),
            CaseCost::new(
                CaseKind::Mean,
                round2(pulls.mean),
                missing_pulls_f64(pulls.mean, saved),
                options,
            ),
            CaseCost::new(
                CaseKind::Maximum,
                f64::from(pulls.max),
                missing_pulls(u64::from(pulls.max), saved),
                options,
            ),
        ];

        let config = scenario.config();
        let mut dust_rng = Rng::new(stream_seed(seed, STARDUST_STREAM));
        let stardust = estimate_stardust(
            &rounded_counts(&mean_counts),
            &scenario.inventory,
            scenario.banner_type,
            config.featured_4star_count,
            &StardustRules::default(),
            &mut dust_rng,
        );

        let spread = match scenario.mode {
            RunMode::ToNumber => &totals,
            RunMode::ToPulls => &featured,
        };

        Some(Self {
            mode: scenario.mode,
            target_number: scenario.target_number,
            target_pulls: scenario.target_pulls,
            trials: dist.len(),
            seed,
            capped_trials: dist.capped_trials(),
            pulls,
            featured5,
            mean_counts,
            costs,
            stardust,
            percentiles: percentile_table(spread),
            histogram: with_histogram.then(|| Histogram::from_values(spread)),
        })
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let mean = round2(self.pulls.mean);
        match self.mode {
            RunMode::ToNumber => {
                let stdev = self
                    .pulls
                    .stdev
                    .map(|s| round2(s).to_string())
                    .unwrap_or_else(|| "n/a".to_string());
                out.push_str(&format!(
                    "The mean number of pulls to obtain {} of the featured 5* over {} trials is {} with a standard deviation of {}.\n",
                    self.target_number, self.trials, mean, stdev
                ));
                out.push_str(&format!(
                    "{} copies of the featured 5* were drawn in as few as {} pulls and as many as {} pulls.\n",
                    self.target_number, self.pulls.min, self.pulls.max
                ));
                if self.capped_trials > 0 {
                    out.push_str(&format!(
                        "{} trials hit the pull cap before reaching the target.\n",
                        self.capped_trials
                    ));
                }
                out.push('\n');
                out.push_str("Approximate costs* for the minimum, mean and maximum case:\n");
            }
            RunMode::ToPulls => {
                out.push_str(&format!(
                    "Over {} trials of {} pulls, {} featured 5* were drawn on average (min {}, max {}).\n\n",
                    self.trials,
                    self.target_pulls,
                    round2(self.featured5.mean),
                    self.featured5.min,
                    self.featured5.max
                ));
                out.push_str(&format!("Approximate costs* for {} pulls:\n", self.target_pulls));
            }
        }

        out.push_str(&format!(
            "{:<15}{:^15}{:^15}{:^15}{:^15}{:^15}\n",
            "", "Total Pulls", "Missing Pulls", "Jade Cost", "Dollar Cost", "Excess Jade"
        ));
        for case in &self.costs {
            out.push_str(&format!(
                "{:<15}{:^15}{:^15}{:^15}{:^15}{:^15}\n",
                case.case.label(),
                case.total_pulls,
                case.missing_pulls,
                case.jade,
                case.cost,
                case.leftover_jade
            ));
        }
        out.push_str("*costs cover the missing pulls: total pulls minus saved pulls.\n\n");

        out.push_str(&format!(
            "Mean rarity distribution for {} pulls over {} trials:\n",
            mean, self.trials
        ));
        out.push_str(&format!("{:<17}{:^15}\n", "Category", "Quantity"));
        let m = &self.mean_counts;
        for (outcome, value) in Outcome::ALL.iter().zip([
            m.standard3,
            m.standard4,
            m.featured4,
            m.standard5,
            m.featured5,
        ]) {
            out.push_str(&format!("{:<17}{:^15}\n", outcome.label(), round2(value)));
        }
        out.push('\n');

        out.push_str(&format!("Estimated stardust from {} pulls:\n", mean));
        out.push_str(&format!("{:^15}{:^15}{:^15}\n", "Dust", "Pulls", "Remaining Dust"));
        out.push_str(&format!(
            "{:^15}{:^15}{:^15}\n\n",
            self.stardust.dust, self.stardust.pulls, self.stardust.remaining_dust
        ));

        out.push_str(&render_percentiles(&self.percentiles));
        if let Some(histogram) = &self.histogram {
            out.push('\n');
            out.push_str(&histogram.render(50));
        }
        out
    }
}

/// Run a scenario's batch on `pool` and summarize it.
///
/// `seed` overrides the scenario's seed; with neither, one is drawn from the OS.
pub fn simulate_scenario<F>(
    scenario: &Scenario,
    seed: Option<u64>,
    pool: &WorkerPool,
    with_histogram: bool,
    on_progress: F,
) -> Result<SimulationReport, SimError>
where
    F: FnMut(usize, usize) + Send,
{
    let config = scenario.config();
    let state = scenario.initial_state(&config);
    let plan = scenario.plan();
    let seed = seed.or(scenario.seed).unwrap_or_else(entropy_seed);

    let dist = pool.install(|| {
        run_batch_with_progress(
            &config,
            state,
            &plan,
            scenario.multi_run,
            seed,
            None,
            on_progress,
        )
    })?;

    SimulationReport::from_distribution(scenario, &dist, seed, with_histogram)
        .ok_or(SimError::EmptyBatch)
}
