//! Results of a simulated pulse sequence.

use rand::Rng;
use tracing::{debug, instrument};

use crate::basis::{Basis, MeasurementBasis};
use crate::config::{DEFAULT_SHOTS, SamplingConfig};
use crate::counts::Counts;
use crate::error::{ResultsError, ResultsResult};
use crate::operator::{ExpectationSeries, HERMITIAN_TOLERANCE, Observable};
use crate::sampling::{OutcomeDistribution, outcome_distribution, sample_counts};
use crate::state::{QuantumState, StateData};

/// The state trajectory of one simulation run, with its register metadata.
///
/// Built once from the simulator output and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SimulationResults {
    states: Vec<QuantumState>,
    dim: usize,
    size: usize,
    basis_name: Basis,
    meas_basis: Option<MeasurementBasis>,
}

impl SimulationResults {
    /// Wrap the states produced by the simulator.
    ///
    /// # Arguments
    /// * `states`    : one state per time step, each of length `dim^size`
    /// * `dim`       : levels per atom (2 or 3 for sampling)
    /// * `size`      : number of atoms in the register
    /// * `basis_name`: basis addressed by the pulse sequence
    /// * `meas_basis`: readout basis declared by the sequence, if any
    ///
    /// Every state is re-tagged with `[dim; size]` subsystem dims.
    pub fn new(
        states: Vec<QuantumState>,
        dim: usize,
        size: usize,
        basis_name: Basis,
        meas_basis: Option<MeasurementBasis>,
    ) -> ResultsResult<Self> {
        if size == 0 {
            return Err(ResultsError::InvalidRegisterSize(size));
        }
        if dim < 2 {
            return Err(ResultsError::InvalidDimension(dim));
        }
        if states.is_empty() {
            return Err(ResultsError::EmptyTrajectory);
        }
        let expected = u32::try_from(size)
            .ok()
            .and_then(|n| dim.checked_pow(n))
            .ok_or(ResultsError::InvalidRegisterSize(size))?;

        let states = states
            .into_iter()
            .enumerate()
            .map(|(step, state)| {
                if let StateData::DensityMatrix(rho) = state.data() {
                    let (rows, cols) = rho.dim();
                    if rows != cols {
                        return Err(ResultsError::NonSquareDensityMatrix { step, rows, cols });
                    }
                }
                if state.len() != expected {
                    return Err(ResultsError::StateLength {
                        step,
                        expected,
                        found: state.len(),
                    });
                }
                Ok(state.with_dims(vec![dim; size]))
            })
            .collect::<ResultsResult<Vec<_>>>()?;

        debug!(
            n_steps = states.len(),
            dim,
            size,
            basis = %basis_name,
            "loaded simulation results"
        );

        Ok(Self {
            states,
            dim,
            size,
            basis_name,
            meas_basis,
        })
    }

    /// States at every time step.
    pub fn states(&self) -> &[QuantumState] {
        &self.states
    }

    /// State after the last time step.
    pub fn final_state(&self) -> &QuantumState {
        // Non-empty by construction.
        &self.states[self.states.len() - 1]
    }

    /// Levels per atom.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of atoms.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Basis addressed by the sequence.
    pub fn basis_name(&self) -> Basis {
        self.basis_name
    }

    /// Readout basis declared by the sequence.
    pub fn meas_basis(&self) -> Option<MeasurementBasis> {
        self.meas_basis
    }

    /// Hilbert-space dimension `dim^size`.
    pub fn hilbert_dim(&self) -> usize {
        self.final_state().len()
    }

    /// Expectation values of each observable at every time step.
    ///
    /// Element `i` of the result holds the values of `obs_list[i]`, one per
    /// stored state. Every observable must be `dim^size × dim^size`; it is
    /// tagged with the states' subsystem dims before evaluation.
    pub fn expect(&self, obs_list: &[Observable]) -> ResultsResult<Vec<ExpectationSeries>> {
        self.expect_with_tolerance(obs_list, HERMITIAN_TOLERANCE)
    }

    /// Like [`expect`](Self::expect), with a custom tolerance for deciding
    /// which observables are Hermitian.
    pub fn expect_with_tolerance(
        &self,
        obs_list: &[Observable],
        tol: f64,
    ) -> ResultsResult<Vec<ExpectationSeries>> {
        let n = self.hilbert_dim();
        let dims = self.states[0].dims().to_vec();

        let mut operators = Vec::with_capacity(obs_list.len());
        for (index, obs) in obs_list.iter().enumerate() {
            let (rows, cols) = obs.shape();
            if (rows, cols) != (n, n) {
                return Err(ResultsError::ObservableShape {
                    index,
                    expected: n,
                    rows,
                    cols,
                });
            }
            operators.push(obs.clone().into_operator(dims.clone()));
        }

        debug!(
            n_observables = operators.len(),
            n_steps = self.states.len(),
            "computing expectation values"
        );

        Ok(operators
            .iter()
            .map(|op| {
                let values = self.states.iter().map(|s| op.expect(s));
                if op.is_hermitian(tol) {
                    ExpectationSeries::Real(values.map(|v| v.re).collect())
                } else {
                    ExpectationSeries::Complex(values.collect())
                }
            })
            .collect())
    }

    /// Probability of each logical bitstring when reading out the final
    /// state in `meas_basis` (or the stored default).
    ///
    /// Index `k` of the returned table is the big-endian bitstring `k`.
    pub fn outcome_probabilities(
        &self,
        meas_basis: Option<MeasurementBasis>,
    ) -> ResultsResult<Vec<f64>> {
        let basis = self.resolve_basis(meas_basis)?;
        Ok(self.distribution(basis)?.to_weights(self.size))
    }

    /// Emulate `n_samples` measurements of the final state using the
    /// thread-local RNG.
    pub fn sample_final_state(
        &self,
        meas_basis: Option<MeasurementBasis>,
        n_samples: usize,
    ) -> ResultsResult<Counts> {
        self.sample_final_state_with_rng(meas_basis, n_samples, &mut rand::thread_rng())
    }

    /// Emulate `n_samples` measurements of the final state.
    ///
    /// Readout encoding:
    /// - `ground-rydberg`: 1 = `|r⟩`, 0 = `|g⟩` or `|h⟩`
    /// - `digital`: 1 = `|h⟩`, 0 = `|g⟩` or `|r⟩`
    ///
    /// Bitstrings are big-endian in register order, and only observed
    /// outcomes are returned. Seeding `rng` makes the draw reproducible:
    /// ```rust,ignore
    /// use rand::SeedableRng;
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let counts = results.sample_final_state_with_rng(None, 1000, &mut rng)?;
    /// ```
    #[instrument(skip(self, rng), fields(dim = self.dim, size = self.size))]
    pub fn sample_final_state_with_rng<R: Rng>(
        &self,
        meas_basis: Option<MeasurementBasis>,
        n_samples: usize,
        rng: &mut R,
    ) -> ResultsResult<Counts> {
        let basis = self.resolve_basis(meas_basis)?;
        if n_samples == 0 {
            return Err(ResultsError::InvalidSamples(n_samples));
        }
        let distribution = self.distribution(basis)?;
        let counts = sample_counts(&distribution, self.size, n_samples, rng);
        debug!(outcomes = counts.len(), "sampled final state");
        Ok(counts)
    }

    /// Sample the final state with shots, seed and basis taken from `config`.
    pub fn sample_with_config(&self, config: &SamplingConfig) -> ResultsResult<Counts> {
        config.validate()?;
        let mut rng = config.rng();
        self.sample_final_state_with_rng(config.meas_basis, config.shots, &mut rng)
    }

    /// [`sample_final_state`](Self::sample_final_state) with the stored
    /// basis and the default number of samples.
    pub fn sample(&self) -> ResultsResult<Counts> {
        self.sample_final_state(None, DEFAULT_SHOTS)
    }

    fn resolve_basis(
        &self,
        meas_basis: Option<MeasurementBasis>,
    ) -> ResultsResult<MeasurementBasis> {
        meas_basis
            .or(self.meas_basis)
            .ok_or(ResultsError::UndefinedMeasurementBasis)
    }

    fn distribution(&self, basis: MeasurementBasis) -> ResultsResult<OutcomeDistribution> {
        let probs = self.final_state().probabilities();
        outcome_distribution(&probs, self.dim, self.size, basis, self.basis_name)
    }
}
