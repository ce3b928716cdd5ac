//! Face-frequency histogram.
//!
//! A [`Histogram`] tallies how often each face of a six-sided die came up.
//! Counters are `u64` so that any trial count representable by the
//! configuration fits without wraparound.
//!
//! Histograms are only ever built by the roll generator and combined by
//! element-wise addition, so the sum of the counters always equals the number
//! of trials that produced them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SimulationError};

/// Number of faces on the simulated die.
pub const FACES: usize = 6;

/// Six-counter tally of die-face outcomes.
///
/// Index `0` holds the count for face `1`, index `5` the count for face `6`.
///
/// # Examples
///
/// ```rust
/// use dice_core::Histogram;
///
/// let h = Histogram::from_counts([1, 2, 3, 4, 5, 6]);
/// assert_eq!(h.total(), 21);
/// assert_eq!(h.count(6), Some(6));
/// assert_eq!(h.count(7), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: [u64; FACES],
}

impl Histogram {
    /// Creates an all-zero histogram.
    #[inline]
    pub const fn new() -> Self {
        Self {
            counts: [0; FACES],
        }
    }

    /// Creates a histogram from explicit counts in face order 1..=6.
    #[inline]
    pub const fn from_counts(counts: [u64; FACES]) -> Self {
        Self { counts }
    }

    /// Returns the counters in face order 1..=6.
    #[inline]
    pub fn counts(&self) -> &[u64; FACES] {
        &self.counts
    }

    /// Returns the counter for `face`, or `None` if `face` is not in 1..=6.
    #[inline]
    pub fn count(&self, face: u8) -> Option<u64> {
        match face {
            1..=6 => Some(self.counts[usize::from(face) - 1]),
            _ => None,
        }
    }

    /// Total number of trials recorded.
    #[inline]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Returns true if every counter is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Records one roll of `face`.
    ///
    /// Only the roll generator writes into a histogram; the face is always in
    /// 1..=6 there.
    #[inline]
    pub(crate) fn record(&mut self, face: u8) {
        self.counts[usize::from(face) - 1] += 1;
    }

    /// Element-wise sum of two histograms.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Overflow`] if any counter would exceed
    /// `u64::MAX`.
    pub fn checked_merge(&self, other: &Histogram) -> Result<Histogram> {
        let mut counts = [0_u64; FACES];
        for (i, slot) in counts.iter_mut().enumerate() {
            *slot = self.counts[i]
                .checked_add(other.counts[i])
                .ok_or(SimulationError::Overflow { face: i as u8 + 1 })?;
        }
        Ok(Histogram { counts })
    }

    /// Mean face value, or `None` for an empty histogram.
    pub fn mean_face(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (i as f64 + 1.0) * c as f64)
            .sum();
        Some(weighted / total as f64)
    }

    /// Largest relative deviation of any counter from the uniform expectation
    /// `total / 6`.
    ///
    /// Returns `0.0` for an empty histogram.
    pub fn max_relative_deviation(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let expected = total as f64 / FACES as f64;
        self.counts
            .iter()
            .map(|&c| ((c as f64 - expected) / expected).abs())
            .fold(0.0, f64::max)
    }
}

impl From<[u64; FACES]> for Histogram {
    fn from(counts: [u64; FACES]) -> Self {
        Self::from_counts(counts)
    }
}

/// Space-separated counters in face order, e.g. `1 2 3 4 5 6`.
impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.counts.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
