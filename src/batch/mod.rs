pub mod cancel;
pub mod monte_carlo;

pub use cancel::CancelToken;
pub use monte_carlo::{
    run_batch, run_batch_parallel, run_batch_with_progress, MeanOutcomeCounts,
    TrialDistribution, PROGRESS_BATCH_COUNT,
};
