//! Sequential baseline.

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use super::{ExecutionStrategy, StrategyKind};
use crate::error::{Result, SimulationError};
use crate::generator::{roll_histogram, ChunkKernel};
use crate::histogram::Histogram;
use crate::rng::SeedPolicy;

/// Rolls the whole trial count in one call on the calling thread.
///
/// No partitioning and no aggregation: the single histogram is the result.
#[derive(Clone, Debug)]
pub struct Sequential {
    seeds: SeedPolicy,
    kernel: ChunkKernel,
}

impl Sequential {
    /// Creates the strategy with the given seeding policy.
    pub fn new(seeds: SeedPolicy) -> Self {
        Self {
            seeds,
            kernel: roll_histogram,
        }
    }

    /// Replaces the per-chunk kernel.
    pub fn with_kernel(mut self, kernel: ChunkKernel) -> Self {
        self.kernel = kernel;
        self
    }
}

impl ExecutionStrategy for Sequential {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sequential
    }

    fn workers(&self) -> usize {
        1
    }

    fn execute(&self, trials: u64) -> Result<Histogram> {
        let rng = self.seeds.rng_for(0);
        debug!(trials, seed = rng.seed(), "sequential run");

        let kernel = self.kernel;
        panic::catch_unwind(AssertUnwindSafe(|| kernel(trials, rng)))
            .map_err(|payload| SimulationError::from_panic(0, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DieRng;

    #[test]
    fn test_sums_to_trials() {
        let strategy = Sequential::new(SeedPolicy::Entropy);
        assert_eq!(strategy.execute(1000).unwrap().total(), 1000);
    }

    #[test]
    fn test_zero_trials() {
        let strategy = Sequential::new(SeedPolicy::Fixed(1));
        assert_eq!(strategy.execute(0).unwrap(), Histogram::new());
    }

    #[test]
    fn test_fixed_seed_reproducible() {
        let strategy = Sequential::new(SeedPolicy::Fixed(11));
        assert_eq!(strategy.execute(5000).unwrap(), strategy.execute(5000).unwrap());
    }

    #[test]
    fn test_panic_surfaces_as_worker_failure() {
        fn failing(_: u64, _: DieRng) -> Histogram {
            panic!("sequential failure")
        }

        let strategy = Sequential::new(SeedPolicy::Fixed(1)).with_kernel(failing);
        let err = strategy.execute(10).unwrap_err();
        assert!(matches!(err, SimulationError::WorkerFailure { chunk: 0, .. }));
    }
}
