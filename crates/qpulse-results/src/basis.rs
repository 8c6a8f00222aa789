//! Addressing and measurement bases.
//!
//! A pulse sequence addresses one transition of each atom:
//!
//! | Basis            | Levels        | Logical 1 | Logical 0     |
//! |------------------|---------------|-----------|---------------|
//! | `ground-rydberg` | `r`, `g`      | `r`       | `g` or `h`    |
//! | `digital`        | `g`, `h`      | `h`       | `g` or `r`    |
//! | `all`            | `r`, `g`, `h` | n/a       | n/a           |
//!
//! With three levels per atom the local state vector is ordered `[r, g, h]`.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResultsError;

/// Basis addressed by the simulated pulse sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Basis {
    /// Ground–Rydberg transition.
    GroundRydberg,
    /// Ground–hyperfine transition.
    Digital,
    /// Both transitions (three-level atoms).
    All,
}

impl Basis {
    /// Canonical string name.
    pub fn as_str(self) -> &'static str {
        match self {
            Basis::GroundRydberg => "ground-rydberg",
            Basis::Digital => "digital",
            Basis::All => "all",
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Basis {
    type Err = ResultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ground-rydberg" => Ok(Basis::GroundRydberg),
            "digital" => Ok(Basis::Digital),
            "all" => Ok(Basis::All),
            other => Err(ResultsError::UnknownBasis(other.to_string())),
        }
    }
}

/// Basis in which the final state is read out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MeasurementBasis {
    /// 1 = `r`, 0 = `g` or `h`.
    GroundRydberg,
    /// 1 = `h`, 0 = `g` or `r`.
    Digital,
}

impl MeasurementBasis {
    /// Canonical string name.
    pub fn as_str(self) -> &'static str {
        match self {
            MeasurementBasis::GroundRydberg => "ground-rydberg",
            MeasurementBasis::Digital => "digital",
        }
    }

    /// True if this readout targets the same transition the sequence addressed.
    pub fn matches(self, addressing: Basis) -> bool {
        matches!(
            (self, addressing),
            (MeasurementBasis::GroundRydberg, Basis::GroundRydberg)
                | (MeasurementBasis::Digital, Basis::Digital)
        )
    }

    /// Three-level index read out as logical 1.
    pub fn one_level(self) -> usize {
        match self {
            MeasurementBasis::GroundRydberg => 0,
            MeasurementBasis::Digital => 2,
        }
    }

    /// Contiguous three-level range read out as logical 0.
    pub fn zero_levels(self) -> Range<usize> {
        match self {
            MeasurementBasis::GroundRydberg => 1..3,
            MeasurementBasis::Digital => 0..2,
        }
    }
}

impl fmt::Display for MeasurementBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementBasis {
    type Err = ResultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ground-rydberg" => Ok(MeasurementBasis::GroundRydberg),
            "digital" => Ok(MeasurementBasis::Digital),
            other => Err(ResultsError::UnknownBasis(other.to_string())),
        }
    }
}

impl TryFrom<String> for MeasurementBasis {
    type Error = ResultsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MeasurementBasis> for String {
    fn from(basis: MeasurementBasis) -> Self {
        basis.as_str().to_string()
    }
}
