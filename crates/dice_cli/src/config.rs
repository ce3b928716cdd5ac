//! Configuration loading and flag overrides.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults (60,000,000 trials, detected workers, entropy seeds,
//!    all strategies once, text output);
//! 2. an optional TOML file passed with `--config`;
//! 3. command-line flags.
//!
//! ```toml
//! [simulation]
//! trials = 60000000
//! workers = 0        # 0 = detect
//! seed = 42
//!
//! [report]
//! strategies = ["sequential", "eager", "deferred"]
//! repeat = 3
//! format = "text"
//! summary = true
//! ```

use serde::Deserialize;
use std::path::Path;

use dice_core::{OutputFormat, SimulationConfig, StrategyKind};

use crate::error::{CliError, Result};

/// Report section of the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Strategy names to run, in order.
    pub strategies: Option<Vec<String>>,
    /// Runs per strategy.
    pub repeat: Option<usize>,
    /// `text` or `json`.
    pub format: Option<String>,
    /// Whether to print the comparison summary.
    pub summary: Option<bool>,
}

/// Whole configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Simulation parameters.
    pub simulation: SimulationConfig,
    /// Report options.
    pub report: ReportSection,
}

impl FileConfig {
    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given, otherwise returns defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Command-line overrides; `None` keeps the file or default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Rolls per strategy run.
    pub trials: Option<u64>,
    /// Worker count (`0` = detect).
    pub workers: Option<usize>,
    /// Fixed base seed.
    pub seed: Option<u64>,
    /// Strategies to run; empty keeps the file or default list.
    pub strategies: Vec<StrategyKind>,
    /// Runs per strategy.
    pub repeat: Option<usize>,
    /// Report format.
    pub format: Option<OutputFormat>,
    /// Force the comparison summary on.
    pub summary: bool,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Validated simulation parameters.
    pub simulation: SimulationConfig,
    /// Strategies to run, in order.
    pub strategies: Vec<StrategyKind>,
    /// Runs per strategy.
    pub repeat: usize,
    /// Report format.
    pub format: OutputFormat,
    /// Whether to print the comparison summary.
    pub summary: bool,
}

impl RunSettings {
    /// Merges the file configuration with command-line overrides.
    pub fn resolve(file: FileConfig, overrides: &Overrides) -> Result<Self> {
        let FileConfig { simulation, report } = file;

        let mut builder = SimulationConfig::builder()
            .trials(overrides.trials.unwrap_or(simulation.trials))
            .workers(overrides.workers.unwrap_or(simulation.workers));
        if let Some(seed) = overrides.seed.or(simulation.seed) {
            builder = builder.seed(seed);
        }
        let simulation = builder.build()?;

        let strategies = if !overrides.strategies.is_empty() {
            overrides.strategies.clone()
        } else if let Some(names) = report.strategies {
            names
                .iter()
                .map(|name| name.parse())
                .collect::<std::result::Result<Vec<StrategyKind>, _>>()?
        } else {
            StrategyKind::ALL.to_vec()
        };

        let format = match (overrides.format, report.format) {
            (Some(format), _) => format,
            (None, Some(name)) => name.parse()?,
            (None, None) => OutputFormat::default(),
        };

        Ok(Self {
            simulation,
            strategies,
            repeat: overrides.repeat.or(report.repeat).unwrap_or(1),
            format,
            summary: overrides.summary || report.summary.unwrap_or(false),
        })
    }
}
