pub mod batch;
pub mod pool;

pub use batch::{batch_ranges, run_batch_in_pool};
pub use pool::{WorkerPool, WORKERS_ENV};
