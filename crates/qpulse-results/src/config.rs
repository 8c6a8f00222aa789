//! Sampling configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with `QPULSE_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::basis::MeasurementBasis;
use crate::error::{ResultsError, ResultsResult};
use crate::operator::HERMITIAN_TOLERANCE;

/// Default number of emulated measurements.
pub const DEFAULT_SHOTS: usize = 1000;

/// Settings for measurement emulation and expectation values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of samples per measurement
    #[serde(default = "default_shots")]
    pub shots: usize,

    /// Fixed RNG seed; `None` draws from system entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Readout basis overriding the one stored with the results
    #[serde(default)]
    pub meas_basis: Option<MeasurementBasis>,

    /// Tolerance used to report Hermitian expectation values as real
    #[serde(default = "default_hermitian_tolerance")]
    pub hermitian_tolerance: f64,
}

fn default_shots() -> usize {
    DEFAULT_SHOTS
}

fn default_hermitian_tolerance() -> f64 {
    HERMITIAN_TOLERANCE
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            seed: None,
            meas_basis: None,
            hermitian_tolerance: default_hermitian_tolerance(),
        }
    }
}

impl SamplingConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ResultsResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml(contents: &str) -> ResultsResult<Self> {
        let config: SamplingConfig = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> ResultsResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Only variables that are present override the current values;
    /// unparsable values are logged and ignored.
    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QPULSE_SHOTS") {
            match v.parse() {
                Ok(val) => self.shots = val,
                Err(_) => warn!(value = %v, "ignoring invalid QPULSE_SHOTS"),
            }
        }
        if let Some(v) = lookup("QPULSE_SEED") {
            match v.parse() {
                Ok(val) => self.seed = Some(val),
                Err(_) => warn!(value = %v, "ignoring invalid QPULSE_SEED"),
            }
        }
        if let Some(v) = lookup("QPULSE_MEAS_BASIS") {
            match v.parse() {
                Ok(val) => self.meas_basis = Some(val),
                Err(_) => warn!(value = %v, "ignoring invalid QPULSE_MEAS_BASIS"),
            }
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> ResultsResult<()> {
        if self.shots == 0 {
            return Err(ResultsError::Config("shots must be at least 1".to_string()));
        }
        if self.hermitian_tolerance.is_nan() || self.hermitian_tolerance < 0.0 {
            return Err(ResultsError::Config(format!(
                "hermitian_tolerance must be non-negative, got {}",
                self.hermitian_tolerance
            )));
        }
        Ok(())
    }

    /// Random generator for sampling: seeded if `seed` is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
