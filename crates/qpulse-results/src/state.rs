//! Quantum states produced by the simulation engine.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// Storage for a single time-step state.
#[derive(Debug, Clone, PartialEq)]
pub enum StateData {
    /// Pure state `|ψ⟩`.
    Ket(Array1<Complex64>),
    /// Mixed state `ρ`.
    DensityMatrix(Array2<Complex64>),
}

/// A state tagged with the local dimension of each subsystem.
///
/// The tag mirrors the tensor structure of the Hilbert space: a register of
/// three atoms with three levels each is tagged `[3, 3, 3]`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    data: StateData,
    dims: Vec<usize>,
}

impl QuantumState {
    /// Wrap a ket, treating it as a single subsystem.
    pub fn ket(amplitudes: impl Into<Array1<Complex64>>) -> Self {
        let amplitudes = amplitudes.into();
        let dims = vec![amplitudes.len()];
        Self {
            data: StateData::Ket(amplitudes),
            dims,
        }
    }

    /// Wrap a density matrix, treating it as a single subsystem.
    pub fn density_matrix(rho: Array2<Complex64>) -> Self {
        let dims = vec![rho.nrows()];
        Self {
            data: StateData::DensityMatrix(rho),
            dims,
        }
    }

    /// Replace the subsystem tag.
    #[must_use]
    pub fn with_dims(mut self, dims: Vec<usize>) -> Self {
        self.dims = dims;
        self
    }

    /// Subsystem tag.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Underlying storage.
    pub fn data(&self) -> &StateData {
        &self.data
    }

    /// Hilbert-space dimension.
    pub fn len(&self) -> usize {
        match &self.data {
            StateData::Ket(psi) => psi.len(),
            StateData::DensityMatrix(rho) => rho.nrows(),
        }
    }

    /// True for a zero-dimensional state.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if this is a density matrix.
    pub fn is_density_matrix(&self) -> bool {
        matches!(self.data, StateData::DensityMatrix(_))
    }

    /// Probability of each computational-basis index.
    ///
    /// `|ψ_i|²` for a ket, `Re ρ_ii` for a density matrix.
    pub fn probabilities(&self) -> Vec<f64> {
        match &self.data {
            StateData::Ket(psi) => psi.iter().map(|a| a.norm_sqr()).collect(),
            StateData::DensityMatrix(rho) => rho.diag().iter().map(|d| d.re).collect(),
        }
    }
}

impl From<Array1<Complex64>> for QuantumState {
    fn from(psi: Array1<Complex64>) -> Self {
        Self::ket(psi)
    }
}

impl From<Vec<Complex64>> for QuantumState {
    fn from(psi: Vec<Complex64>) -> Self {
        Self::ket(Array1::from(psi))
    }
}

impl From<Array2<Complex64>> for QuantumState {
    fn from(rho: Array2<Complex64>) -> Self {
        Self::density_matrix(rho)
    }
}
