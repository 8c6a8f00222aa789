//! `qpulse-results`: interpretation of pulse-sequence simulation output.
//!
//! Given the time-ordered states produced by a simulation engine, this crate:
//!
//! - computes **expectation values** of observables at every time step, and
//! - **emulates a projective measurement** of the final state in the
//!   `ground-rydberg` or `digital` basis, returning a histogram of
//!   big-endian bitstrings.
//!
//! Atoms may have two levels (the addressed transition only) or three
//! (`r`, `g`, `h`), in which case each readout basis maps one level to
//! logical 1 and the other two to logical 0.
//!
//! # Quick start
//!
//! ```rust
//! use num_complex::Complex64;
//! use qpulse_results::{Basis, MeasurementBasis, QuantumState, SimulationResults};
//!
//! // Two atoms left in |gg⟩, stored in ground-rydberg order [rr, rg, gr, gg].
//! let zero = Complex64::new(0.0, 0.0);
//! let one = Complex64::new(1.0, 0.0);
//! let state = QuantumState::from(vec![zero, zero, zero, one]);
//!
//! let results =
//!     SimulationResults::new(vec![state], 2, 2, Basis::GroundRydberg, None).unwrap();
//! let counts = results
//!     .sample_final_state(Some(MeasurementBasis::GroundRydberg), 500)
//!     .unwrap();
//! assert_eq!(counts.get("00"), 500);
//! ```

pub mod basis;
pub mod config;
pub mod counts;
pub mod error;
pub mod operator;
pub mod results;
pub mod sampling;
pub mod state;
pub mod trajectory;

pub use basis::{Basis, MeasurementBasis};
pub use config::{DEFAULT_SHOTS, SamplingConfig};
pub use counts::Counts;
pub use error::{ResultsError, ResultsResult};
pub use operator::{ExpectationSeries, Observable, Operator};
pub use results::SimulationResults;
pub use sampling::OutcomeDistribution;
pub use state::{QuantumState, StateData};
pub use trajectory::{StateRecord, Trajectory};
