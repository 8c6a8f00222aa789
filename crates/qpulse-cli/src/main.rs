//! qpulse command-line interface.
//!
//! Reads the serialized output of a pulse-sequence simulation and reports
//! expectation values or emulated measurement counts.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{expect, sample, version};

/// qpulse - inspect pulse-sequence simulation results
#[derive(Parser)]
#[command(name = "qpulse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emulate measurements of the final state
    Sample {
        /// Trajectory file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Measurement basis (ground-rydberg, digital)
        #[arg(short, long)]
        basis: Option<String>,

        /// Number of samples
        #[arg(short, long)]
        shots: Option<usize>,

        /// RNG seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,

        /// Sampling configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },

    /// Compute expectation values at every time step
    Expect {
        /// Trajectory file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Observable files (JSON matrices), one per observable
        #[arg(short, long = "observable", required = true)]
        observables: Vec<PathBuf>,

        /// Sampling configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sample {
            input,
            basis,
            shots,
            seed,
            config,
            format,
        } => sample::execute(
            &input,
            basis.as_deref(),
            shots,
            seed,
            config.as_deref(),
            &format,
        ),

        Commands::Expect {
            input,
            observables,
            config,
            format,
        } => expect::execute(&input, &observables, config.as_deref(), &format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
