//! Expect command implementation.
//!
//! Evaluate observables against every stored state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use qpulse_results::{ExpectationSeries, SamplingConfig};
use qpulse_results::trajectory::observable_from_file;

use super::common::load_results;

#[derive(Serialize)]
struct ObservableReport<'a> {
    observable: String,
    values: &'a ExpectationSeries,
}

/// Execute the expect command.
pub fn execute(
    input: &Path,
    observables: &[PathBuf],
    config_file: Option<&Path>,
    format: &str,
) -> Result<()> {
    let config = SamplingConfig::load(config_file).context("Failed to load configuration")?;
    let results = load_results(input)?;

    let obs_list = observables
        .iter()
        .enumerate()
        .map(|(i, path)| {
            observable_from_file(path, i)
                .with_context(|| format!("Failed to read observable: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let values = results.expect_with_tolerance(&obs_list, config.hermitian_tolerance)?;

    match format {
        "json" => {
            let report: Vec<ObservableReport<'_>> = observables
                .iter()
                .zip(&values)
                .map(|(path, series)| ObservableReport {
                    observable: path.display().to_string(),
                    values: series,
                })
                .collect();
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        _ => {
            println!(
                "{} {} observables over {} time steps",
                style("→").cyan().bold(),
                values.len(),
                results.states().len()
            );
            for (path, series) in observables.iter().zip(&values) {
                println!("\n  {}", style(path.display()).green());
                for step in 0..series.len() {
                    match series {
                        ExpectationSeries::Real(v) => println!("    {step:>5}  {:>12.6}", v[step]),
                        ExpectationSeries::Complex(v) => println!(
                            "    {step:>5}  {:>12.6} {:+.6}i",
                            v[step].re, v[step].im
                        ),
                    }
                }
            }
        }
    }

    Ok(())
}
