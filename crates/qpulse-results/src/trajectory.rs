//! Serialized simulator output.
//!
//! A trajectory document holds the register metadata and one state per time
//! step. Complex numbers are `[re, im]` pairs; a state is either a flat list
//! of amplitudes (ket) or a list of rows (density matrix):
//!
//! ```json
//! {
//!   "dim": 2,
//!   "size": 1,
//!   "basis": "ground-rydberg",
//!   "meas_basis": "ground-rydberg",
//!   "states": [
//!     [[0.0, 0.0], [1.0, 0.0]],
//!     [[[0.5, 0.0], [0.0, 0.0]], [[0.0, 0.0], [0.5, 0.0]]]
//!   ]
//! }
//! ```

use std::path::Path;

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::basis::{Basis, MeasurementBasis};
use crate::error::{ResultsError, ResultsResult};
use crate::operator::Observable;
use crate::results::SimulationResults;
use crate::state::{QuantumState, StateData};

/// One serialized state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateRecord {
    /// Amplitudes of a pure state.
    Ket(Vec<Complex64>),
    /// Rows of a density matrix.
    DensityMatrix(Vec<Vec<Complex64>>),
}

impl StateRecord {
    fn into_state(self, step: usize) -> ResultsResult<QuantumState> {
        match self {
            StateRecord::Ket(amps) => Ok(QuantumState::ket(Array1::from(amps))),
            StateRecord::DensityMatrix(rows) => {
                let rho = rows_to_matrix(rows).map_err(|(rows, cols)| {
                    ResultsError::NonSquareDensityMatrix { step, rows, cols }
                })?;
                Ok(QuantumState::density_matrix(rho))
            }
        }
    }
}

impl From<&QuantumState> for StateRecord {
    fn from(state: &QuantumState) -> Self {
        match state.data() {
            StateData::Ket(psi) => StateRecord::Ket(psi.to_vec()),
            StateData::DensityMatrix(rho) => {
                StateRecord::DensityMatrix(rho.rows().into_iter().map(|r| r.to_vec()).collect())
            }
        }
    }
}

/// Serialized simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Levels per atom.
    pub dim: usize,
    /// Number of atoms.
    pub size: usize,
    /// Addressed basis.
    pub basis: Basis,
    /// Readout basis declared by the sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meas_basis: Option<MeasurementBasis>,
    /// One state per time step.
    pub states: Vec<StateRecord>,
}

impl Trajectory {
    /// Read a trajectory from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ResultsResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Parse a trajectory from a JSON document.
    pub fn from_json(contents: &str) -> ResultsResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Validate and convert into a result set.
    pub fn into_results(self) -> ResultsResult<SimulationResults> {
        let states = self
            .states
            .into_iter()
            .enumerate()
            .map(|(step, record)| record.into_state(step))
            .collect::<ResultsResult<Vec<_>>>()?;
        SimulationResults::new(states, self.dim, self.size, self.basis, self.meas_basis)
    }
}

impl From<&SimulationResults> for Trajectory {
    fn from(results: &SimulationResults) -> Self {
        Self {
            dim: results.dim(),
            size: results.size(),
            basis: results.basis_name(),
            meas_basis: results.meas_basis(),
            states: results.states().iter().map(StateRecord::from).collect(),
        }
    }
}

/// Read an observable matrix (rows of `[re, im]` pairs) from a JSON file.
pub fn observable_from_file<P: AsRef<Path>>(path: P, index: usize) -> ResultsResult<Observable> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    observable_from_json(&contents, index)
}

/// Parse an observable matrix from a JSON document.
///
/// `index` identifies the observable in error messages.
pub fn observable_from_json(contents: &str, index: usize) -> ResultsResult<Observable> {
    let rows: Vec<Vec<Complex64>> = serde_json::from_str(contents)?;
    let matrix = rows_to_matrix(rows).map_err(|(rows, cols)| ResultsError::NotAnOperator {
        index,
        shape: vec![rows, cols],
    })?;
    Ok(Observable::Matrix(matrix))
}

/// Build a square matrix from rows; returns `(rows, cols)` on ragged or
/// non-square input.
fn rows_to_matrix(rows: Vec<Vec<Complex64>>) -> Result<Array2<Complex64>, (usize, usize)> {
    let n = rows.len();
    let cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n) {
        return Err((n, cols));
    }
    let flat: Vec<Complex64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n, n), flat).map_err(|_| (n, cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STEP: &str = r#"{
        "dim": 2,
        "size": 1,
        "basis": "ground-rydberg",
        "meas_basis": "ground-rydberg",
        "states": [
            [[0.0, 0.0], [1.0, 0.0]],
            [[[1.0, 0.0], [0.0, 0.0]], [[0.0, 0.0], [0.0, 0.0]]]
        ]
    }"#;

    #[test]
    fn test_parse_mixed_state_kinds() {
        let traj = Trajectory::from_json(TWO_STEP).unwrap();
        assert!(matches!(traj.states[0], StateRecord::Ket(_)));
        assert!(matches!(traj.states[1], StateRecord::DensityMatrix(_)));

        let results = traj.into_results().unwrap();
        assert_eq!(results.states().len(), 2);
        assert!(results.final_state().is_density_matrix());
        assert_eq!(results.meas_basis(), Some(MeasurementBasis::GroundRydberg));
    }

    #[test]
    fn test_ragged_density_matrix_rejected() {
        let json = r#"{
            "dim": 2, "size": 1, "basis": "digital",
            "states": [[[[1.0, 0.0], [0.0, 0.0]], [[0.0, 0.0]]]]
        }"#;
        let err = Trajectory::from_json(json).unwrap().into_results().unwrap_err();
        assert!(matches!(err, ResultsError::NonSquareDensityMatrix { step: 0, .. }));
    }

    #[test]
    fn test_round_trip_through_results() {
        let results = Trajectory::from_json(TWO_STEP).unwrap().into_results().unwrap();
        let back = Trajectory::from(&results);
        assert_eq!(back, Trajectory::from_json(TWO_STEP).unwrap());
    }

    #[test]
    fn test_observable_parsing() {
        let obs = observable_from_json("[[[1,0],[0,0]],[[0,0],[-1,0]]]", 0).unwrap();
        assert_eq!(obs.shape(), (2, 2));

        let err = observable_from_json("[[[1,0],[0,0]]]", 3).unwrap_err();
        assert!(matches!(err, ResultsError::NotAnOperator { index: 3, .. }));
    }
}
