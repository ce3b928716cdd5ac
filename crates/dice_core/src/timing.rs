//! Wall-clock timing of strategy runs.

use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};

use crate::histogram::Histogram;
use crate::strategy::StrategyKind;

/// Monotonic stopwatch.
#[derive(Clone, Copy, Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts timing now.
    #[inline]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time elapsed since [`Timer::start`].
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Runs `f` and returns its output alongside the elapsed wall-clock time.
///
/// The window opens immediately before `f` is called and closes after it
/// returns, so for a strategy it covers dispatch, every join and the final
/// merge.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let timer = Timer::start();
    let output = f();
    (output, timer.elapsed())
}

/// Externally observable result of one strategy run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measurement {
    /// Which strategy produced this result.
    pub strategy: StrategyKind,
    /// Number of chunks the trials were split into (1 for sequential).
    pub workers: usize,
    /// Total trials requested.
    pub trials: u64,
    /// Merged face counts.
    pub histogram: Histogram,
    /// Wall-clock duration of the run.
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl Measurement {
    /// Elapsed time in fractional seconds.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Trials rolled per second, or `None` if no time was measured.
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.elapsed_secs();
        (secs > 0.0).then(|| self.trials as f64 / secs)
    }
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
