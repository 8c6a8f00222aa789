//! Tests for expectation values over the state trajectory.

use ndarray::{Array2, array};
use num_complex::Complex64;

use qpulse_results::{
    Basis, ExpectationSeries, Observable, Operator, QuantumState, ResultsError, SimulationResults,
};

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// n_r on the first atom of a two-atom ground-rydberg register ([rr, rg, gr, gg]).
fn first_atom_rydberg_number() -> Array2<Complex64> {
    let mut m = Array2::from_elem((4, 4), c(0.0, 0.0));
    m[[0, 0]] = c(1.0, 0.0);
    m[[1, 1]] = c(1.0, 0.0);
    m
}

/// Rabi-like trajectory: |gg⟩ → (|rg⟩ + |gg⟩)/√2 → |rg⟩.
fn trajectory() -> SimulationResults {
    let s = 1.0 / 2.0_f64.sqrt();
    let states = vec![
        QuantumState::from(vec![c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)]),
        QuantumState::from(vec![c(0.0, 0.0), c(s, 0.0), c(0.0, 0.0), c(s, 0.0)]),
        QuantumState::from(vec![c(0.0, 0.0), c(0.0, 1.0), c(0.0, 0.0), c(0.0, 0.0)]),
    ];
    SimulationResults::new(states, 2, 2, Basis::GroundRydberg, None).unwrap()
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

#[test]
fn one_series_per_observable_one_value_per_step() {
    let r = trajectory();
    let obs = vec![
        Observable::from(first_atom_rydberg_number()),
        Observable::from(Array2::<Complex64>::eye(4)),
    ];
    let values = r.expect(&obs).unwrap();
    assert_eq!(values.len(), 2);
    assert!(values.iter().all(|s| s.len() == 3));
}

#[test]
fn hermitian_observable_is_real() {
    let r = trajectory();
    let values = r
        .expect(&[Observable::from(first_atom_rydberg_number())])
        .unwrap();
    let series = values[0].as_real().expect("Hermitian observable");
    let expected = [0.0, 0.5, 1.0];
    for (got, want) in series.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn identity_gives_norm() {
    let r = trajectory();
    let values = r.expect(&[Observable::from(Array2::<Complex64>::eye(4))]).unwrap();
    for step in 0..3 {
        let v = values[0].get(step).unwrap();
        assert!((v - c(1.0, 0.0)).norm() < 1e-12);
    }
}

#[test]
fn non_hermitian_observable_is_complex() {
    // |rg⟩⟨gg|
    let mut m = Array2::from_elem((4, 4), c(0.0, 0.0));
    m[[1, 3]] = c(1.0, 0.0);
    let r = trajectory();
    let values = r.expect(&[Observable::from(m)]).unwrap();
    let ExpectationSeries::Complex(series) = &values[0] else {
        panic!("expected a complex series");
    };
    // ⟨ψ|rg⟩⟨gg|ψ⟩ at the midpoint is (s)(s) = 1/2.
    assert!((series[1] - c(0.5, 0.0)).norm() < 1e-12);
    assert!(series[0].norm() < 1e-12);
}

#[test]
fn wrapped_operator_is_accepted() {
    let op = Operator::new(first_atom_rydberg_number());
    let r = trajectory();
    let values = r.expect(&[Observable::from(op)]).unwrap();
    assert!((values[0].get(2).unwrap().re - 1.0).abs() < 1e-12);
}

#[test]
fn empty_observable_list_gives_empty_result() {
    let r = trajectory();
    assert!(r.expect(&[]).unwrap().is_empty());
}

#[test]
fn density_matrix_trajectory() {
    let rho = array![[c(0.25, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.75, 0.0)]];
    let r = SimulationResults::new(
        vec![QuantumState::density_matrix(rho)],
        2,
        1,
        Basis::Digital,
        None,
    )
    .unwrap();
    let z = array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]];
    let values = r.expect(&[Observable::from(z)]).unwrap();
    assert!((values[0].as_real().unwrap()[0] + 0.5).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn mismatched_observable_shape_is_rejected() {
    let r = trajectory();
    let obs = vec![
        Observable::from(Array2::<Complex64>::eye(4)),
        Observable::from(Array2::<Complex64>::eye(2)),
    ];
    let err = r.expect(&obs).unwrap_err();
    assert!(matches!(
        err,
        ResultsError::ObservableShape {
            index: 1,
            expected: 4,
            rows: 2,
            cols: 2
        }
    ));
}

#[test]
fn non_square_observable_is_rejected() {
    let r = trajectory();
    let obs = Observable::from(Array2::from_elem((4, 2), c(0.0, 0.0)));
    assert!(matches!(
        r.expect(&[obs]),
        Err(ResultsError::ObservableShape { rows: 4, cols: 2, .. })
    ));
}

#[test]
fn state_length_mismatch_is_rejected() {
    let err = SimulationResults::new(
        vec![
            QuantumState::from(vec![c(1.0, 0.0); 4]),
            QuantumState::from(vec![c(1.0, 0.0); 3]),
        ],
        2,
        2,
        Basis::Digital,
        None,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ResultsError::StateLength {
            step: 1,
            expected: 4,
            found: 3
        }
    ));
}

#[test]
fn empty_trajectory_is_rejected() {
    let err = SimulationResults::new(vec![], 2, 1, Basis::Digital, None).unwrap_err();
    assert!(matches!(err, ResultsError::EmptyTrajectory));
}

#[test]
fn states_are_tagged_per_atom() {
    let r = trajectory();
    assert!(r.states().iter().all(|s| s.dims() == [2, 2]));
}
