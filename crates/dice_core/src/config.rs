//! Simulation configuration.
//!
//! [`SimulationConfig`] carries the run parameters shared by every strategy.
//! It deserialises from TOML/JSON with defaults for missing fields and can
//! be built fluently with validation via [`SimulationConfig::builder`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::rng::SeedPolicy;

/// Default number of die rolls per strategy run.
pub const DEFAULT_TRIALS: u64 = 60_000_000;

/// Upper bound on explicitly requested workers.
pub const MAX_WORKERS: usize = 4096;

/// Number of hardware execution units, never less than one.
///
/// A platform reporting zero available cores is treated as one.
pub fn detect_workers() -> usize {
    num_cpus::get().max(1)
}

/// Run parameters shared by all strategies.
///
/// # Examples
///
/// ```rust
/// use dice_core::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .trials(1_000_000)
///     .workers(4)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.trials, 1_000_000);
/// assert_eq!(config.resolved_workers(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Total rolls per strategy run.
    pub trials: u64,
    /// Worker count; `0` means detect from hardware.
    pub workers: usize,
    /// Base seed for reproducible runs; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            workers: 0,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Worker count to use, resolving `0` to the detected hardware count.
    pub fn resolved_workers(&self) -> usize {
        if self.workers == 0 {
            detect_workers()
        } else {
            self.workers
        }
    }

    /// Seeding policy derived from [`SimulationConfig::seed`].
    #[inline]
    pub fn seed_policy(&self) -> SeedPolicy {
        SeedPolicy::from_option(self.seed)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidConfig`] if more than
    /// [`MAX_WORKERS`] workers are requested.
    pub fn validate(&self) -> Result<()> {
        if self.workers > MAX_WORKERS {
            return Err(SimulationError::invalid_config(
                "workers",
                format!("{} exceeds maximum of {}", self.workers, MAX_WORKERS),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    trials: Option<u64>,
    workers: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of rolls per run.
    #[inline]
    pub fn trials(mut self, trials: u64) -> Self {
        self.trials = Some(trials);
        self
    }

    /// Sets the worker count (`0` = detect).
    #[inline]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets a fixed base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig> {
        let defaults = SimulationConfig::default();
        let config = SimulationConfig {
            trials: self.trials.unwrap_or(defaults.trials),
            workers: self.workers.unwrap_or(defaults.workers),
            seed: self.seed.or(defaults.seed),
        };
        config.validate()?;
        Ok(config)
    }
}
