//! Histogram aggregation.

use crate::error::Result;
use crate::histogram::Histogram;

/// Merges histograms element-wise.
///
/// Order-independent: any permutation of the inputs yields the same result.
/// An empty input yields the all-zero histogram.
///
/// # Errors
///
/// Returns [`SimulationError::Overflow`](crate::SimulationError::Overflow)
/// if any face counter would exceed `u64::MAX`.
///
/// # Example
///
/// ```rust
/// use dice_core::{aggregate, Histogram};
///
/// let parts = [
///     Histogram::from_counts([1, 0, 0, 0, 0, 1]),
///     Histogram::from_counts([0, 2, 0, 0, 0, 0]),
/// ];
/// let total = aggregate(&parts).unwrap();
/// assert_eq!(total.counts(), &[1, 2, 0, 0, 0, 1]);
/// ```
pub fn aggregate<'a, I>(histograms: I) -> Result<Histogram>
where
    I: IntoIterator<Item = &'a Histogram>,
{
    histograms
        .into_iter()
        .try_fold(Histogram::new(), |acc, h| acc.checked_merge(h))
}
