//! Roll generator: turns a trial count into a face histogram.

use tracing::trace;

use crate::histogram::Histogram;
use crate::rng::DieRng;

/// Rolls a die `trials` times and tabulates the outcomes.
///
/// Owns its [`DieRng`], so concurrent generators never touch shared state.
///
/// # Example
///
/// ```rust
/// use dice_core::RollGenerator;
///
/// let mut generator = RollGenerator::from_seed(42);
/// let histogram = generator.roll(1_000);
/// assert_eq!(histogram.total(), 1_000);
/// ```
#[derive(Clone, Debug)]
pub struct RollGenerator {
    rng: DieRng,
}

impl RollGenerator {
    /// Creates a generator around an existing RNG.
    #[inline]
    pub fn new(rng: DieRng) -> Self {
        Self { rng }
    }

    /// Creates a generator with a fixed seed.
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(DieRng::from_seed(seed))
    }

    /// Creates a generator seeded from OS entropy.
    #[inline]
    pub fn from_entropy() -> Self {
        Self::new(DieRng::from_entropy())
    }

    /// Seed of the underlying generator.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Rolls `trials` times into a fresh histogram.
    ///
    /// The returned counters always sum to exactly `trials`; zero trials
    /// yields the all-zero histogram.
    pub fn roll(&mut self, trials: u64) -> Histogram {
        let mut histogram = Histogram::new();
        for _ in 0..trials {
            histogram.record(self.rng.roll());
        }
        trace!(trials, seed = self.rng.seed(), "chunk rolled");
        histogram
    }
}

/// Signature of the per-chunk work function run by every strategy.
///
/// Strategies default to [`roll_histogram`]; tests and benchmarks swap in
/// other kernels through the strategies' `with_kernel` builders.
pub type ChunkKernel = fn(u64, DieRng) -> Histogram;

/// Convenience wrapper: consumes `rng` and rolls `trials` times.
#[inline]
pub fn roll_histogram(trials: u64, rng: DieRng) -> Histogram {
    RollGenerator::new(rng).roll(trials)
}
