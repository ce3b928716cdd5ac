//! Execution strategies.
//!
//! Three ways to turn a trial count into one merged [`Histogram`]:
//!
//! | Strategy | Chunks | Where chunks run |
//! |----------|--------|------------------|
//! | [`Sequential`] | 1 | calling thread |
//! | [`EagerParallel`] | W | dedicated worker pool, started at dispatch |
//! | [`LazyDeferred`] | W | calling thread, one at a time, when joined |
//!
//! They share the [`ExecutionStrategy`] interface so a caller can time and
//! compare them without knowing how each schedules its work. The deferred
//! strategy partitions exactly like the eager one but runs its chunks one
//! after another, so its timings track the sequential run.

mod deferred;
mod eager;
mod sequential;

pub use deferred::LazyDeferred;
pub use eager::EagerParallel;
pub use sequential::Sequential;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::histogram::Histogram;
use crate::timing::{timed, Measurement};

/// Identifies one of the three strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Single call on the calling thread.
    Sequential,
    /// Chunks run concurrently on a worker pool.
    EagerParallel,
    /// Chunks run on the calling thread when their results are requested.
    LazyDeferred,
}

impl StrategyKind {
    /// All strategies in reporting order.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Sequential,
        StrategyKind::EagerParallel,
        StrategyKind::LazyDeferred,
    ];

    /// Heading printed above this strategy's result.
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Sequential => "Single-threaded",
            StrategyKind::EagerParallel => "Multi-threaded (eager)",
            StrategyKind::LazyDeferred => "Multi-threaded (deferred)",
        }
    }

    /// Short command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Sequential => "sequential",
            StrategyKind::EagerParallel => "eager",
            StrategyKind::LazyDeferred => "deferred",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" | "single" => Ok(StrategyKind::Sequential),
            "eager" | "eager-parallel" | "eager_parallel" | "async" => {
                Ok(StrategyKind::EagerParallel)
            }
            "deferred" | "lazy" | "lazy-deferred" | "lazy_deferred" => {
                Ok(StrategyKind::LazyDeferred)
            }
            other => Err(SimulationError::invalid_config(
                "strategy",
                format!(
                    "unknown strategy '{}'. Supported: sequential, eager, deferred",
                    other
                ),
            )),
        }
    }
}

/// Common "run and produce (Histogram, duration)" interface.
pub trait ExecutionStrategy {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Number of chunks a run is split into.
    fn workers(&self) -> usize;

    /// Produces the merged histogram for `trials` rolls.
    ///
    /// # Errors
    ///
    /// Fails if any chunk fails or the merge overflows; no partial result
    /// is returned.
    fn execute(&self, trials: u64) -> Result<Histogram>;

    /// Heading for reports.
    fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// Executes and times a run.
    ///
    /// The clock starts just before dispatch and stops once the merged
    /// histogram is available.
    fn run(&self, trials: u64) -> Result<Measurement> {
        let (histogram, elapsed) = timed(|| self.execute(trials));
        let histogram = histogram?;

        info!(
            strategy = %self.kind(),
            workers = self.workers(),
            trials,
            elapsed_secs = elapsed.as_secs_f64(),
            "strategy run complete"
        );

        Ok(Measurement {
            strategy: self.kind(),
            workers: self.workers(),
            trials,
            histogram,
            elapsed,
        })
    }
}

/// Builds the strategy `kind` from `config`.
///
/// # Errors
///
/// Returns [`SimulationError::ThreadPool`] if the eager worker pool cannot
/// be created.
pub fn build_strategy(
    kind: StrategyKind,
    config: &SimulationConfig,
) -> Result<Box<dyn ExecutionStrategy>> {
    let seeds = config.seed_policy();
    let workers = config.resolved_workers();

    Ok(match kind {
        StrategyKind::Sequential => Box::new(Sequential::new(seeds)),
        StrategyKind::EagerParallel => Box::new(EagerParallel::new(workers, seeds)?),
        StrategyKind::LazyDeferred => Box::new(LazyDeferred::new(workers, seeds)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_in_reporting_order() {
        assert_eq!(
            StrategyKind::ALL,
            [
                StrategyKind::Sequential,
                StrategyKind::EagerParallel,
                StrategyKind::LazyDeferred
            ]
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("sequential".parse::<StrategyKind>().unwrap(), StrategyKind::Sequential);
        assert_eq!("EAGER".parse::<StrategyKind>().unwrap(), StrategyKind::EagerParallel);
        assert_eq!("lazy-deferred".parse::<StrategyKind>().unwrap(), StrategyKind::LazyDeferred);
        assert!("threads".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_labels_distinct() {
        let labels: std::collections::HashSet<_> =
            StrategyKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn test_build_strategy_kinds_and_workers() {
        let config = SimulationConfig::builder()
            .trials(60)
            .workers(3)
            .seed(1)
            .build()
            .unwrap();

        for kind in StrategyKind::ALL {
            let strategy = build_strategy(kind, &config).unwrap();
            assert_eq!(strategy.kind(), kind);
            assert_eq!(strategy.label(), kind.label());

            let expected_workers = if kind == StrategyKind::Sequential { 1 } else { 3 };
            assert_eq!(strategy.workers(), expected_workers);
        }
    }

    #[test]
    fn test_run_reports_measurement() {
        let config = SimulationConfig::builder().trials(600).workers(2).seed(5).build().unwrap();
        let strategy = build_strategy(StrategyKind::LazyDeferred, &config).unwrap();

        let m = strategy.run(config.trials).unwrap();
        assert_eq!(m.strategy, StrategyKind::LazyDeferred);
        assert_eq!(m.workers, 2);
        assert_eq!(m.trials, 600);
        assert_eq!(m.histogram.total(), 600);
    }
}
