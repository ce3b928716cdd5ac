//! Comparison harness: runs each selected strategy in turn.

use tracing::info;

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::strategy::{build_strategy, StrategyKind};
use crate::timing::Measurement;

/// Runs `kinds` in the given order, `repeat` times each, with the shared
/// `config`.
///
/// Each strategy is built once and reused across its repeats, so the eager
/// worker pool is not rebuilt inside the timed window. All runs of one
/// strategy complete before the next strategy starts.
///
/// # Errors
///
/// Fails on an invalid configuration, on `repeat == 0`, or on the first
/// failed run.
///
/// # Example
///
/// ```rust
/// use dice_core::{compare, SimulationConfig, StrategyKind};
///
/// let config = SimulationConfig::builder().trials(6_000).workers(2).build().unwrap();
/// let runs = compare(&config, &StrategyKind::ALL, 1).unwrap();
///
/// assert_eq!(runs.len(), 3);
/// assert!(runs.iter().all(|m| m.histogram.total() == 6_000));
/// ```
pub fn compare(
    config: &SimulationConfig,
    kinds: &[StrategyKind],
    repeat: usize,
) -> Result<Vec<Measurement>> {
    config.validate()?;
    if repeat == 0 {
        return Err(SimulationError::invalid_config(
            "repeat",
            "must be at least 1",
        ));
    }

    info!(
        trials = config.trials,
        workers = config.resolved_workers(),
        seeded = config.seed.is_some(),
        strategies = kinds.len(),
        repeat,
        "starting strategy comparison"
    );

    let mut measurements = Vec::with_capacity(kinds.len() * repeat);
    for &kind in kinds {
        let strategy = build_strategy(kind, config)?;
        for _ in 0..repeat {
            measurements.push(strategy.run(config.trials)?);
        }
    }
    Ok(measurements)
}
