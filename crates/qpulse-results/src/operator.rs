//! Observables and expectation values.

use ndarray::Array2;
use num_complex::Complex64;
use serde::Serialize;

use crate::state::{QuantumState, StateData};

/// Default tolerance when deciding whether an operator is Hermitian.
pub const HERMITIAN_TOLERANCE: f64 = 1e-12;

/// A square operator tagged with the local dimension of each subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    matrix: Array2<Complex64>,
    dims: Vec<usize>,
}

impl Operator {
    /// Wrap a matrix, treating it as acting on a single subsystem.
    pub fn new(matrix: Array2<Complex64>) -> Self {
        let dims = vec![matrix.nrows()];
        Self { matrix, dims }
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

    /// Underlying matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// `(rows, cols)` of the underlying matrix.
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.dim()
    }

    /// True if `O = O†` up to `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        let (rows, cols) = self.shape();
        if rows != cols {
            return false;
        }
        self.matrix
            .indexed_iter()
            .all(|((i, j), v)| (v - self.matrix[[j, i]].conj()).norm() <= tol)
    }

    /// Expectation value against one state.
    ///
    /// `⟨ψ|O|ψ⟩` for kets, `Tr(O ρ)` for density matrices. The caller is
    /// responsible for matching dimensions.
    pub fn expect(&self, state: &QuantumState) -> Complex64 {
        match state.data() {
            StateData::Ket(psi) => {
                let o_psi = self.matrix.dot(psi);
                psi.iter().zip(o_psi.iter()).map(|(a, b)| a.conj() * b).sum()
            }
            StateData::DensityMatrix(rho) => self
                .matrix
                .indexed_iter()
                .map(|((i, j), o)| o * rho[[j, i]])
                .sum(),
        }
    }
}

/// An observable as accepted by `SimulationResults::expect`.
#[derive(Debug, Clone, PartialEq)]
pub enum Observable {
    /// Raw matrix; tagged with the states' dims before evaluation.
    Matrix(Array2<Complex64>),
    /// Already-wrapped operator.
    Operator(Operator),
}

impl Observable {
    /// `(rows, cols)` of the observable.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Observable::Matrix(m) => m.dim(),
            Observable::Operator(op) => op.shape(),
        }
    }

    /// Convert into an operator carrying `dims`.
    pub fn into_operator(self, dims: Vec<usize>) -> Operator {
        match self {
            Observable::Matrix(m) => Operator::new(m).with_dims(dims),
            Observable::Operator(op) => op.with_dims(dims),
        }
    }
}

impl From<Array2<Complex64>> for Observable {
    fn from(m: Array2<Complex64>) -> Self {
        Observable::Matrix(m)
    }
}

impl From<Operator> for Observable {
    fn from(op: Operator) -> Self {
        Observable::Operator(op)
    }
}

/// Expectation values of one observable across all time steps.
///
/// Hermitian observables have real expectation values and are reported as
/// such; anything else keeps its complex value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExpectationSeries {
    /// Values of a Hermitian observable.
    Real(Vec<f64>),
    /// Values of a non-Hermitian observable.
    Complex(Vec<Complex64>),
}

impl ExpectationSeries {
    /// Number of time steps.
    pub fn len(&self) -> usize {
        match self {
            ExpectationSeries::Real(v) => v.len(),
            ExpectationSeries::Complex(v) => v.len(),
        }
    }

    /// True if no time steps are covered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `step` as a complex number.
    pub fn get(&self, step: usize) -> Option<Complex64> {
        match self {
            ExpectationSeries::Real(v) => v.get(step).map(|&x| Complex64::new(x, 0.0)),
            ExpectationSeries::Complex(v) => v.get(step).copied(),
        }
    }

    /// Real series, if the observable was Hermitian.
    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            ExpectationSeries::Real(v) => Some(v),
            ExpectationSeries::Complex(_) => None,
        }
    }
}
