//! Work partitioning.
//!
//! Splits a trial count into one chunk per worker. The first
//! `trials % workers` chunks get one extra roll so nothing is lost to
//! integer division.

use crate::error::{Result, SimulationError};

/// Divides `trials` into `workers` near-equal chunks.
///
/// Chunk sizes differ by at most one and always sum to `trials`. When
/// `trials < workers` the trailing chunks are zero.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidConfig`] if `workers` is zero.
///
/// # Example
///
/// ```rust
/// use dice_core::partition;
///
/// assert_eq!(partition(10, 4).unwrap(), vec![3, 3, 2, 2]);
/// assert_eq!(partition(2, 4).unwrap(), vec![1, 1, 0, 0]);
/// ```
pub fn partition(trials: u64, workers: usize) -> Result<Vec<u64>> {
    if workers == 0 {
        return Err(SimulationError::invalid_config(
            "workers",
            "must be at least 1",
        ));
    }

    let w = workers as u64;
    let base = trials / w;
    let remainder = trials % w;

    Ok((0..w)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect())
}
