//! Sample command implementation.
//!
//! Emulate measurements of the final simulated state.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qpulse_results::{MeasurementBasis, SamplingConfig};

use super::common::{load_results, print_counts};

/// Execute the sample command.
///
/// Flags override the configuration file, which overrides the environment
/// defaults.
pub fn execute(
    input: &Path,
    basis: Option<&str>,
    shots: Option<usize>,
    seed: Option<u64>,
    config_file: Option<&Path>,
    format: &str,
) -> Result<()> {
    let mut config = SamplingConfig::load(config_file).context("Failed to load configuration")?;
    if let Some(basis) = basis {
        config.meas_basis = Some(basis.parse::<MeasurementBasis>()?);
    }
    if let Some(shots) = shots {
        config.shots = shots;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    let results = load_results(input)?;
    info!(
        dim = results.dim(),
        size = results.size(),
        shots = config.shots,
        "sampling final state"
    );

    let counts = results.sample_with_config(&config)?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&counts)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        _ => {
            println!(
                "{} Sampling {} ({} atoms, {} levels, addressed {})",
                style("→").cyan().bold(),
                style(input.display()).green(),
                results.size(),
                results.dim(),
                style(results.basis_name()).yellow()
            );
            print_counts(&counts);
        }
    }

    Ok(())
}
