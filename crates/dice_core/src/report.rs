//! Rendering of strategy measurements.
//!
//! The text format prints one block per run:
//!
//! ```text
//! Single-threaded:
//! 10001625 9996433 10006020 10000699 9995686 9999537 : 0.901414 seconds
//! ```
//!
//! A [`Comparison`] adds each strategy's mean time and its speedup over the
//! sequential baseline. The JSON format emits every measurement (and the
//! comparison, when requested) as one document.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SimulationError;
use crate::histogram::Histogram;
use crate::strategy::StrategyKind;
use crate::timing::Measurement;

/// Renders one result block.
pub fn render_block(label: &str, histogram: &Histogram, elapsed: Duration) -> String {
    format!(
        "{}:\n{} : {:.6} seconds",
        label,
        histogram,
        elapsed.as_secs_f64()
    )
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_block(
            self.strategy.label(),
            &self.histogram,
            self.elapsed,
        ))
    }
}

/// Output format for the command-line report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable blocks.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(SimulationError::invalid_config(
                "format",
                format!("unknown format '{}'. Supported: text, json", other),
            )),
        }
    }
}

/// Per-strategy timing summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Strategy summarised by this row.
    pub strategy: StrategyKind,
    /// Number of runs averaged.
    pub runs: usize,
    /// Mean elapsed seconds over those runs.
    pub mean_seconds: f64,
    /// Sequential mean divided by this mean; `None` without a baseline.
    pub speedup: Option<f64>,
}

/// Mean timings of each strategy relative to the sequential baseline.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// One row per strategy present, in reporting order.
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Summarises `measurements`, grouping repeated runs by strategy.
    pub fn from_measurements(measurements: &[Measurement]) -> Self {
        let mean_of = |kind: StrategyKind| -> Option<(usize, f64)> {
            let secs: Vec<f64> = measurements
                .iter()
                .filter(|m| m.strategy == kind)
                .map(Measurement::elapsed_secs)
                .collect();
            (!secs.is_empty()).then(|| (secs.len(), secs.iter().sum::<f64>() / secs.len() as f64))
        };

        let baseline = mean_of(StrategyKind::Sequential).map(|(_, mean)| mean);

        let rows = StrategyKind::ALL
            .iter()
            .filter_map(|&kind| {
                let (runs, mean_seconds) = mean_of(kind)?;
                let speedup = baseline
                    .filter(|_| mean_seconds > 0.0)
                    .map(|base| base / mean_seconds);
                Some(ComparisonRow {
                    strategy: kind,
                    runs,
                    mean_seconds,
                    speedup,
                })
            })
            .collect();

        Self { rows }
    }

    /// Row for `kind`, if it was measured.
    pub fn row(&self, kind: StrategyKind) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.strategy == kind)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        for row in &self.rows {
            write!(
                f,
                "{}: {:.6} seconds mean over {} run(s)",
                row.strategy.label(),
                row.mean_seconds,
                row.runs
            )?;
            if let Some(speedup) = row.speedup {
                write!(f, ", {:.2}x vs sequential", speedup)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    measurements: &'a [Measurement],
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<&'a Comparison>,
}

/// Renders all measurements as text blocks separated by blank lines.
pub fn render_text(measurements: &[Measurement], comparison: Option<&Comparison>) -> String {
    let mut out = measurements
        .iter()
        .map(Measurement::to_string)
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');

    if let Some(comparison) = comparison {
        out.push('\n');
        out.push_str(&comparison.to_string());
    }
    out
}

/// Renders all measurements as a pretty-printed JSON document.
///
/// # Errors
///
/// Propagates serialisation failures from `serde_json`.
pub fn render_json(
    measurements: &[Measurement],
    comparison: Option<&Comparison>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        measurements,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn measurement(strategy: StrategyKind, millis: u64) -> Measurement {
        Measurement {
            strategy,
            workers: 8,
            trials: 21,
            histogram: Histogram::from_counts([1, 2, 3, 4, 5, 6]),
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn test_render_block_format() {
        let block = render_block(
            "Single-threaded",
            &Histogram::from_counts([1, 2, 3, 4, 5, 6]),
            Duration::from_millis(1250),
        );
        assert_eq!(block, "Single-threaded:\n1 2 3 4 5 6 : 1.250000 seconds");
    }

    #[test]
    fn test_measurement_display_uses_label() {
        let m = measurement(StrategyKind::EagerParallel, 125);
        assert_eq!(
            m.to_string(),
            "Multi-threaded (eager):\n1 2 3 4 5 6 : 0.125000 seconds"
        );
    }

    #[test]
    fn test_render_text_blocks_in_order() {
        let runs: Vec<Measurement> = StrategyKind::ALL
            .iter()
            .map(|&k| measurement(k, 100))
            .collect();
        let text = render_text(&runs, None);

        let seq = text.find("Single-threaded:").unwrap();
        let eager = text.find("Multi-threaded (eager):").unwrap();
        let deferred = text.find("Multi-threaded (deferred):").unwrap();
        assert!(seq < eager && eager < deferred);
        assert!(!text.contains("Summary"));
    }

    #[test]
    fn test_comparison_speedups() {
        let runs = vec![
            measurement(StrategyKind::Sequential, 800),
            measurement(StrategyKind::Sequential, 1200),
            measurement(StrategyKind::EagerParallel, 125),
            measurement(StrategyKind::LazyDeferred, 1000),
        ];
        let comparison = Comparison::from_measurements(&runs);

        let seq = comparison.row(StrategyKind::Sequential).unwrap();
        assert_eq!(seq.runs, 2);
        assert_relative_eq!(seq.mean_seconds, 1.0, epsilon = 1e-12);
        assert_relative_eq!(seq.speedup.unwrap(), 1.0, epsilon = 1e-12);

        let eager = comparison.row(StrategyKind::EagerParallel).unwrap();
        assert_relative_eq!(eager.speedup.unwrap(), 8.0, epsilon = 1e-9);

        let deferred = comparison.row(StrategyKind::LazyDeferred).unwrap();
        assert_relative_eq!(deferred.speedup.unwrap(), 1.0, epsilon = 1e-9);

        let text = comparison.to_string();
        assert!(text.contains("8.00x vs sequential"));
    }

    #[test]
    fn test_comparison_without_baseline() {
        let runs = vec![measurement(StrategyKind::EagerParallel, 100)];
        let comparison = Comparison::from_measurements(&runs);

        assert_eq!(comparison.rows.len(), 1);
        assert_eq!(comparison.rows[0].speedup, None);
        assert!(comparison.row(StrategyKind::Sequential).is_none());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_json() {
        let runs = vec![
            measurement(StrategyKind::Sequential, 500),
            measurement(StrategyKind::EagerParallel, 250),
        ];
        let comparison = Comparison::from_measurements(&runs);

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&runs, Some(&comparison)).unwrap()).unwrap();
        assert_eq!(json["measurements"].as_array().unwrap().len(), 2);
        assert_eq!(json["measurements"][1]["strategy"], "eager_parallel");
        assert_relative_eq!(
            json["comparison"]["rows"][1]["speedup"].as_f64().unwrap(),
            2.0,
            epsilon = 1e-9
        );

        let bare: serde_json::Value =
            serde_json::from_str(&render_json(&runs, None).unwrap()).unwrap();
        assert!(bare.get("comparison").is_none());
    }
}
