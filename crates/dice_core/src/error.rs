//! Error types for the die-roll simulation.
//!
//! Every failure is surfaced immediately to the caller of a strategy run.
//! Nothing is retried and no partial histogram is ever returned, since a
//! dropped chunk would silently break the trial-count invariant.

use thiserror::Error;

/// Simulation errors.
///
/// # Examples
/// ```
/// use dice_core::SimulationError;
///
/// let err = SimulationError::WorkerFailure {
///     chunk: 3,
///     message: "boom".to_string(),
/// };
/// assert_eq!(err.to_string(), "Worker for chunk 3 failed: boom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A configuration value is outside its valid range.
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// A chunk's task panicked or vanished before reporting its histogram.
    #[error("Worker for chunk {chunk} failed: {message}")]
    WorkerFailure {
        /// Index of the failed chunk within the run's partition.
        chunk: usize,
        /// Panic payload or disconnect description.
        message: String,
    },

    /// Merging histograms would overflow a face counter.
    #[error("Histogram counter for face {face} overflowed")]
    Overflow {
        /// Face value (1-6) whose counter overflowed.
        face: u8,
    },

    /// The worker thread pool could not be created.
    #[error("Thread pool construction failed: {0}")]
    ThreadPool(String),
}

impl SimulationError {
    /// Creates an [`SimulationError::InvalidConfig`] error.
    pub fn invalid_config(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name,
            reason: reason.into(),
        }
    }

    /// Converts a caught panic payload into a worker failure for `chunk`.
    pub(crate) fn from_panic(chunk: usize, payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "worker panicked".to_string()
        };
        Self::WorkerFailure { chunk, message }
    }
}

/// Result alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;
