//! Runs the configured strategies and prints the report.

use dice_core::report::{render_json, render_text};
use dice_core::{compare, Comparison, OutputFormat};
use tracing::info;

use crate::config::RunSettings;
use crate::{CliError, Result};

/// Runs every configured strategy and writes the report to stdout.
pub fn run(settings: &RunSettings) -> Result<()> {
    let report = execute(settings)?;
    print!("{}", report);
    Ok(())
}

/// Runs the comparison and renders it without printing.
pub fn execute(settings: &RunSettings) -> Result<String> {
    info!(
        trials = settings.simulation.trials,
        workers = settings.simulation.resolved_workers(),
        repeat = settings.repeat,
        "Running die-roll comparison"
    );

    let measurements = compare(&settings.simulation, &settings.strategies, settings.repeat)?;
    let comparison = settings
        .summary
        .then(|| Comparison::from_measurements(&measurements));

    match settings.format {
        OutputFormat::Text => Ok(render_text(&measurements, comparison.as_ref())),
        OutputFormat::Json => render_json(&measurements, comparison.as_ref())
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| CliError::Render(e.to_string())),
    }
}
