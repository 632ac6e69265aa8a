use rayon::prelude::*;
use serde::Serialize;

use crate::batch::cancel::CancelToken;
use crate::error::SimError;
use crate::gacha::{
    check_termination, run_trial_unchecked, stream_seed, PullConfiguration, RateState, Rng,
    TrialPlan, TrialResult,
};
use crate::parallel::batch_ranges;

/// Number of chunks a progress-reporting batch is split into.
pub const PROGRESS_BATCH_COUNT: usize = 40;

/// Per-trial summaries of one batch, in trial order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrialDistribution {
    results: Vec<TrialResult>,
}

impl TrialDistribution {
    pub fn new(results: Vec<TrialResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[TrialResult] {
        &self.results
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrialResult> {
        self.results.iter()
    }

    pub fn total_pulls(&self) -> Vec<u32> {
        self.results.iter().map(|r| r.total_pulls).collect()
    }

    pub fn featured5_counts(&self) -> Vec<u32> {
        self.results.iter().map(|r| r.counts.featured5).collect()
    }

    pub fn capped_trials(&self) -> usize {
        self.results.iter().filter(|r| r.capped).count()
    }

    pub fn mean_counts(&self) -> MeanOutcomeCounts {
        let n = self.results.len();
        if n == 0 {
            return MeanOutcomeCounts::default();
        }
        let mut sums = [0u64; 6];
        for r in &self.results {
            sums[0] += u64::from(r.total_pulls);
            sums[1] += u64::from(r.counts.standard3);
            sums[2] += u64::from(r.counts.standard4);
            sums[3] += u64::from(r.counts.featured4);
            sums[4] += u64::from(r.counts.standard5);
            sums[5] += u64::from(r.counts.featured5);
        }
        let mean = |sum: u64| sum as f64 / n as f64;
        MeanOutcomeCounts {
            total_pulls: mean(sums[0]),
            standard3: mean(sums[1]),
            standard4: mean(sums[2]),
            featured4: mean(sums[3]),
            standard5: mean(sums[4]),
            featured5: mean(sums[5]),
        }
    }
}

impl FromIterator<TrialResult> for TrialDistribution {
    fn from_iter<I: IntoIterator<Item = TrialResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Mean pulls and mean count per outcome category over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MeanOutcomeCounts {
    pub total_pulls: f64,
    pub standard3: f64,
    pub standard4: f64,
    pub featured4: f64,
    pub standard5: f64,
    pub featured5: f64,
}

pub fn run_batch(
    config: &PullConfiguration,
    initial_state: RateState,
    plan: &TrialPlan,
    trial_count: usize,
    seed: u64,
) -> Result<TrialDistribution, SimError> {
    run_batch_with_parallelism(config, initial_state, plan, trial_count, seed, false)
}

/// Like [run_batch] but distributes trials across all CPU cores via Rayon.
/// Trial `i` always uses RNG stream `i`, so the result equals the sequential one.
pub fn run_batch_parallel(
    config: &PullConfiguration,
    initial_state: RateState,
    plan: &TrialPlan,
    trial_count: usize,
    seed: u64,
) -> Result<TrialDistribution, SimError> {
    run_batch_with_parallelism(config, initial_state, plan, trial_count, seed, true)
}

fn run_batch_with_parallelism(
    config: &PullConfiguration,
    initial_state: RateState,
    plan: &TrialPlan,
    trial_count: usize,
    seed: u64,
    parallel: bool,
) -> Result<TrialDistribution, SimError> {
    config.validate()?;
    check_termination(config, plan)?;

    let run_one = |index: usize| run_indexed_trial(config, initial_state, plan, seed, index);

    let results = if parallel {
        (0..trial_count).into_par_iter().map(run_one).collect()
    } else {
        (0..trial_count).map(run_one).collect()
    };
    Ok(TrialDistribution::new(results))
}

/// Parallel batch in [PROGRESS_BATCH_COUNT] chunks, invoking `on_progress(done, total)`
/// after each chunk. A cancelled `cancel` token stops the batch between trials.
pub fn run_batch_with_progress<F>(
    config: &PullConfiguration,
    initial_state: RateState,
    plan: &TrialPlan,
    trial_count: usize,
    seed: u64,
    cancel: Option<&CancelToken>,
    mut on_progress: F,
) -> Result<TrialDistribution, SimError>
where
    F: FnMut(usize, usize),
{
    config.validate()?;
    check_termination(config, plan)?;

    let mut results: Vec<TrialResult> = Vec::with_capacity(trial_count);
    on_progress(0, trial_count);

    for (start, end) in batch_ranges(trial_count, PROGRESS_BATCH_COUNT) {
        let chunk: Vec<Option<TrialResult>> = (start..end)
            .into_par_iter()
            .map(|index| {
                if cancel.is_some_and(CancelToken::is_cancelled) {
                    None
                } else {
                    Some(run_indexed_trial(config, initial_state, plan, seed, index))
                }
            })
            .collect();

        let finished = chunk.iter().filter(|r| r.is_some()).count();
        if finished < chunk.len() {
            return Err(SimError::Cancelled {
                completed: results.len() + finished,
                total: trial_count,
            });
        }
        results.extend(chunk.into_iter().flatten());
        on_progress(end, trial_count);
    }

    Ok(TrialDistribution::new(results))
}

#[inline]
fn run_indexed_trial(
    config: &PullConfiguration,
    initial_state: RateState,
    plan: &TrialPlan,
    seed: u64,
    index: usize,
) -> TrialResult {
    let mut rng = Rng::new(stream_seed(seed, index as u64));
    run_trial_unchecked(config, initial_state, plan, &mut rng)
}
