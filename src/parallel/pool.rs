//! Rayon thread pool configuration for batch workloads.
//!
//! Use [WorkerPool::install] to run a parallel batch with a fixed number of
//! threads, or rely on Rayon's default (all CPU cores).

use std::env;

use rayon::ThreadPoolBuilder;

/// Environment variable read by [WorkerPool::from_env].
pub const WORKERS_ENV: &str = "WARPSIM_WORKERS";

/// Configures how many worker threads are used for parallel batch execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Worker count from `WARPSIM_WORKERS`; unset or unparsable means all cores.
    pub fn from_env() -> Self {
        match env::var(WORKERS_ENV) {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(n) => Self::with_workers(n),
                Err(_) => {
                    eprintln!("invalid {WORKERS_ENV} '{raw}', using all cores");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Run a closure on a thread pool with this worker count. If [workers](WorkerPool::workers) is 0,
    /// uses the global Rayon pool. Otherwise builds a temporary pool with that many threads,
    /// falling back to the global pool if it cannot be built.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                eprintln!("thread pool with {} workers failed ({err}), using global pool", self.workers);
                f()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_runs_closure_with_custom_pool() {
        let pool = WorkerPool::with_workers(2);
        let threads = pool.install(rayon::current_num_threads);
        assert_eq!(threads, 2);
    }

    #[test]
    fn default_pool_uses_global() {
        assert_eq!(WorkerPool::default().install(|| 7), 7);
    }
}
