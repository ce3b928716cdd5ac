//! Prints the detected environment and resolved settings without rolling.

use dice_core::detect_workers;

use crate::config::RunSettings;
use crate::Result;

/// Validates the settings and prints them.
pub fn run(settings: &RunSettings) -> Result<()> {
    print!("{}", describe(settings)?);
    Ok(())
}

/// Builds the check report.
pub fn describe(settings: &RunSettings) -> Result<String> {
    settings.simulation.validate()?;

    let seed = settings
        .simulation
        .seed
        .map_or_else(|| "entropy".to_string(), |s| s.to_string());
    let strategies = settings
        .strategies
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "Detected workers: {}\n\
         Trials: {}\n\
         Workers: {}\n\
         Seed: {}\n\
         Strategies: {}\n\
         Repeat: {}\n",
        detect_workers(),
        settings.simulation.trials,
        settings.simulation.resolved_workers(),
        seed,
        strategies,
        settings.repeat,
    ))
}
