//! Batch distribution for parallel simulation.
//!
//! Splits trials into chunks for progress reporting and cancellation checks.
//! Within a chunk trials run in parallel; between chunks the caller gets control back.

use crate::batch::{run_batch_parallel, TrialDistribution};
use crate::error::SimError;
use crate::gacha::{PullConfiguration, RateState, TrialPlan};
use crate::parallel::pool::WorkerPool;

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
///
/// # Example
/// ```
/// # use warpsim::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Run a parallel batch on `pool`.
/// Convenience over [crate::batch::run_batch_parallel] inside [WorkerPool::install].
pub fn run_batch_in_pool(
    config: &PullConfiguration,
    initial_state: RateState,
    plan: &TrialPlan,
    trial_count: usize,
    seed: u64,
    pool: &WorkerPool,
) -> Result<TrialDistribution, SimError> {
    pool.install(|| run_batch_parallel(config, initial_state, plan, trial_count, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gacha::StopPolicy;

    #[test]
    fn batch_ranges_even_split() {
        let r = batch_ranges(100, 4);
        assert_eq!(r, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
    }

    #[test]
    fn batch_ranges_with_remainder() {
        let r = batch_ranges(10, 3);
        assert_eq!(r, vec![(0, 4), (4, 7), (7, 10)]);
    }

    #[test]
    fn batch_ranges_more_batches_than_items() {
        let r = batch_ranges(3, 10);
        assert_eq!(r.len(), 3);
        assert_eq!(r, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn batch_ranges_empty() {
        assert!(batch_ranges(0, 5).is_empty());
        assert!(batch_ranges(10, 0).is_empty());
    }

    #[test]
    fn pool_batch_matches_global_batch() {
        let config = PullConfiguration::default();
        let plan = TrialPlan::new(StopPolicy::PullBudget(30));
        let state = RateState::fresh(&config);
        let pooled =
            run_batch_in_pool(&config, state, &plan, 64, 9, &WorkerPool::with_workers(2)).unwrap();
        let global = run_batch_parallel(&config, state, &plan, 64, 9).unwrap();
        assert_eq!(pooled, global);
    }
}
