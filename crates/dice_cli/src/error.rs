//! CLI error types.

use std::path::PathBuf;

use dice_core::SimulationError;
use thiserror::Error;

/// Errors surfaced by the `dice-sim` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this tool.
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// A simulation failed or was misconfigured.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// The report could not be rendered.
    #[error("Failed to render report: {0}")]
    Render(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_error_is_transparent() {
        let err: CliError = SimulationError::invalid_config("repeat", "must be at least 1").into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration 'repeat': must be at least 1"
        );
    }

    #[test]
    fn test_config_read_display() {
        let err = CliError::ConfigRead {
            path: PathBuf::from("missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.toml"));
    }
}
