//! Eager parallel strategy.

use tracing::{debug, warn};

use super::{ExecutionStrategy, StrategyKind};
use crate::aggregate::aggregate;
use crate::error::{Result, SimulationError};
use crate::generator::{roll_histogram, ChunkKernel};
use crate::handle::{EagerHandle, WorkerHandle};
use crate::histogram::Histogram;
use crate::partition::partition;
use crate::rng::SeedPolicy;

/// Splits the trials into one chunk per worker and runs every chunk
/// concurrently on a dedicated thread pool.
///
/// Chunks start as soon as they are dispatched. The caller then blocks on
/// each handle in turn and merges the results once all of them are in.
pub struct EagerParallel {
    pool: rayon::ThreadPool,
    workers: usize,
    seeds: SeedPolicy,
    kernel: ChunkKernel,
}

impl EagerParallel {
    /// Creates the strategy with a pool of `workers` threads (minimum 1).
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ThreadPool`] if rayon cannot build the pool.
    pub fn new(workers: usize, seeds: SeedPolicy) -> Result<Self> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("dice-worker-{}", i))
            .build()
            .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;

        Ok(Self {
            pool,
            workers,
            seeds,
            kernel: roll_histogram,
        })
    }

    /// Replaces the per-chunk kernel.
    pub fn with_kernel(mut self, kernel: ChunkKernel) -> Self {
        self.kernel = kernel;
        self
    }
}

impl ExecutionStrategy for EagerParallel {
    fn kind(&self) -> StrategyKind {
        StrategyKind::EagerParallel
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn execute(&self, trials: u64) -> Result<Histogram> {
        let chunks = partition(trials, self.workers)?;

        let handles: Vec<EagerHandle> = chunks
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                EagerHandle::spawn(&self.pool, i, n, self.seeds.rng_for(i), self.kernel)
            })
            .collect();
        debug!(chunks = handles.len(), trials, "eager dispatch complete");

        // Join every handle before reporting so no chunk is still running
        // when a failure is returned.
        let mut histograms = Vec::with_capacity(handles.len());
        let mut failure = None;
        for handle in handles {
            match handle.join() {
                Ok(h) => histograms.push(h),
                Err(e) => {
                    warn!(error = %e, "eager chunk failed");
                    failure.get_or_insert(e);
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }
        aggregate(&histograms)
    }
}

impl std::fmt::Debug for EagerParallel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EagerParallel")
            .field("workers", &self.workers)
            .field("seeds", &self.seeds)
            .finish_non_exhaustive()
    }
}
