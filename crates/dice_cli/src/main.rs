//! dice-sim - compare die-roll simulation strategies
//!
//! Rolls a fair six-sided die many times, tallies the faces, and reports how
//! long each execution strategy took.
//!
//! # Commands
//!
//! - `dice-sim` - run every strategy and print one block per run
//! - `dice-sim --strategy eager -n 1000000 --summary` - run a subset
//! - `dice-sim check` - print detected cores and resolved settings
//!
//! Logs go to stderr and honour `RUST_LOG`; the report goes to stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dice_core::{OutputFormat, StrategyKind};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{FileConfig, Overrides, RunSettings};

/// Die-roll histogram strategy comparison
#[derive(Parser, Debug)]
#[command(name = "dice-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Number of die rolls per strategy
    #[arg(short = 'n', long, global = true)]
    trials: Option<u64>,

    /// Worker count for the partitioned strategies (0 = detect)
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Strategy to run (sequential, eager, deferred); repeatable
    #[arg(long = "strategy", global = true)]
    strategies: Vec<StrategyKind>,

    /// Runs per strategy
    #[arg(short, long, global = true)]
    repeat: Option<usize>,

    /// Output format (text, json)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Print mean times and speedups after the runs
    #[arg(long, global = true)]
    summary: bool,
}

impl From<&RunArgs> for Overrides {
    fn from(args: &RunArgs) -> Self {
        Self {
            trials: args.trials,
            workers: args.workers,
            seed: args.seed,
            strategies: args.strategies.clone(),
            repeat: args.repeat,
            format: args.format,
            summary: args.summary,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the strategy comparison (default)
    Run,

    /// Check system configuration and resolved settings
    Check,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,dice_core=debug,dice_sim=debug"
    } else {
        "warn,dice_core=info,dice_sim=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    debug!(?cli, "Parsed arguments");

    let file = FileConfig::load_or_default(cli.config.as_deref())?;
    let settings = RunSettings::resolve(file, &Overrides::from(&cli.run))?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            commands::run::run(&settings).context("strategy comparison failed")?
        }
        Commands::Check => commands::check::run(&settings).context("settings check failed")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_runs_defaults() {
        let cli = Cli::try_parse_from(["dice-sim"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.run.strategies.is_empty());
        assert_eq!(cli.run.trials, None);
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "dice-sim",
            "-n",
            "1000",
            "-w",
            "4",
            "--seed",
            "42",
            "--strategy",
            "eager",
            "--strategy",
            "single",
            "--format",
            "json",
            "--repeat",
            "3",
            "--summary",
        ])
        .unwrap();

        let overrides = Overrides::from(&cli.run);
        assert_eq!(overrides.trials, Some(1000));
        assert_eq!(overrides.workers, Some(4));
        assert_eq!(overrides.seed, Some(42));
        assert_eq!(
            overrides.strategies,
            vec![StrategyKind::EagerParallel, StrategyKind::Sequential]
        );
        assert_eq!(overrides.format, Some(OutputFormat::Json));
        assert_eq!(overrides.repeat, Some(3));
        assert!(overrides.summary);
    }

    #[test]
    fn test_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dice-sim", "check", "-w", "2", "-v"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert_eq!(cli.run.workers, Some(2));
        assert!(cli.verbose);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(Cli::try_parse_from(["dice-sim", "--strategy", "gpu"]).is_err());
    }

    #[test]
    fn test_negative_trials_rejected() {
        assert!(Cli::try_parse_from(["dice-sim", "-n", "-5"]).is_err());
    }
}
