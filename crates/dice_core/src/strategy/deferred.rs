//! Lazy deferred strategy.

use tracing::debug;

use super::{ExecutionStrategy, StrategyKind};
use crate::aggregate::aggregate;
use crate::error::Result;
use crate::generator::{roll_histogram, ChunkKernel};
use crate::handle::{DeferredHandle, WorkerHandle};
use crate::histogram::Histogram;
use crate::partition::partition;
use crate::rng::SeedPolicy;

/// Partitions exactly like [`EagerParallel`](super::EagerParallel) but
/// creates deferred handles.
///
/// No chunk runs until its result is requested, and then it runs on the
/// requesting thread. Requesting every result in turn therefore executes the
/// chunks one after another on the caller, with no parallel speedup.
#[derive(Clone, Debug)]
pub struct LazyDeferred {
    workers: usize,
    seeds: SeedPolicy,
    kernel: ChunkKernel,
}

impl LazyDeferred {
    /// Creates the strategy with `workers` chunks per run (minimum 1).
    pub fn new(workers: usize, seeds: SeedPolicy) -> Self {
        Self {
            workers: workers.max(1),
            seeds,
            kernel: roll_histogram,
        }
    }

    /// Replaces the per-chunk kernel.
    pub fn with_kernel(mut self, kernel: ChunkKernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Creates one unstarted handle per chunk.
    pub fn schedule(&self, trials: u64) -> Result<Vec<DeferredHandle>> {
        let chunks = partition(trials, self.workers)?;
        Ok(chunks
            .iter()
            .enumerate()
            .map(|(i, &n)| DeferredHandle::new(i, n, self.seeds.seed_for(i), self.kernel))
            .collect())
    }
}

impl ExecutionStrategy for LazyDeferred {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LazyDeferred
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn execute(&self, trials: u64) -> Result<Histogram> {
        let handles = self.schedule(trials)?;
        debug!(chunks = handles.len(), trials, "deferred handles created");

        let histograms = handles
            .into_iter()
            .map(WorkerHandle::join)
            .collect::<Result<Vec<_>>>()?;
        aggregate(&histograms)
    }
}
