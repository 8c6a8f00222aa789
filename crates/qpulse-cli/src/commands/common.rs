//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qpulse_results::{Counts, SimulationResults, Trajectory};

/// Load and validate a trajectory file.
pub fn load_results(path: &Path) -> Result<SimulationResults> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let trajectory = Trajectory::from_file(path)
        .with_context(|| format!("Failed to read trajectory: {}", path.display()))?;
    trajectory
        .into_results()
        .with_context(|| format!("Invalid trajectory: {}", path.display()))
}

/// Print a counts histogram as a table with bars.
pub fn print_counts(counts: &Counts) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        counts.total()
    );

    let mut sorted: Vec<(&str, u64)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let total = counts.total() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}
