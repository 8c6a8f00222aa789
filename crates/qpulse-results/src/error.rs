//! Error types for the results crate.

use thiserror::Error;

/// Errors produced while interpreting simulation results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultsError {
    /// An input that should be an operator matrix is not one.
    #[error("Observable {index} is not a square matrix (shape {shape:?})")]
    NotAnOperator {
        /// Position of the offending observable in the input list.
        index: usize,
        /// Shape of the offending input.
        shape: Vec<usize>,
    },

    /// Observable shape does not match the register's Hilbert space.
    #[error("Incompatible shape of observable {index}: expected {expected}x{expected}, got {rows}x{cols}")]
    ObservableShape {
        /// Position of the offending observable in the input list.
        index: usize,
        /// Required side length `dim^size`.
        expected: usize,
        /// Number of rows found.
        rows: usize,
        /// Number of columns found.
        cols: usize,
    },

    /// A stored state does not have length `dim^size`.
    #[error("State at time step {step} has length {found}, expected {expected}")]
    StateLength {
        /// Time-step index of the offending state.
        step: usize,
        /// Required length `dim^size`.
        expected: usize,
        /// Length found.
        found: usize,
    },

    /// Density matrix is not square.
    #[error("Density matrix at time step {step} is {rows}x{cols}, expected a square matrix")]
    NonSquareDensityMatrix {
        /// Time-step index of the offending state.
        step: usize,
        /// Number of rows found.
        rows: usize,
        /// Number of columns found.
        cols: usize,
    },

    /// Neither an explicit nor a default measurement basis is available.
    #[error("Can't accept an undefined measurement basis because the simulated sequence declares no measurement")]
    UndefinedMeasurementBasis,

    /// Basis string is not recognised.
    #[error("Unknown basis '{0}': expected 'ground-rydberg' or 'digital'")]
    UnknownBasis(String),

    /// Sampling is only modelled for two- and three-level particles.
    #[error("Cannot sample system with single-atom state vectors of dimension {0} (only 2 and 3 are supported)")]
    UnsupportedDimension(usize),

    /// Probability table does not have one entry per register configuration.
    #[error("Probability table has length {found}, expected {expected}")]
    ProbabilityLength {
        /// Required length `dim^size`.
        expected: usize,
        /// Length found.
        found: usize,
    },

    /// Final-state probabilities contain a non-finite entry or no mass.
    #[error("Cannot sample a state with invalid outcome probabilities (total {total})")]
    InvalidProbabilities {
        /// Sum of the probability table.
        total: f64,
    },

    /// The trajectory holds no states.
    #[error("Simulation output contains no states")]
    EmptyTrajectory,

    /// Register size must be at least one particle.
    #[error("Register size must be at least 1, got {0}")]
    InvalidRegisterSize(usize),

    /// Local dimension must be at least two levels.
    #[error("Local dimension must be at least 2, got {0}")]
    InvalidDimension(usize),

    /// Number of samples must be at least one.
    #[error("n_samples must be at least 1, got {0}")]
    InvalidSamples(usize),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read an input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a YAML document.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type for result-interpretation operations.
pub type ResultsResult<T> = Result<T, ResultsError>;
