//! Measurement emulation.
//!
//! Turns the probability vector of a register state into a table of weights
//! over logical bitstrings, then draws a finite multinomial sample from it.
//!
//! Bitstrings are big-endian: bit `N-1-q` of the outcome index is the result
//! of particle `q`, so the first particle is the most significant bit.
//!
//! # Two-level particles
//!
//! When the readout basis is the addressed basis, each amplitude maps to
//! exactly one bitstring. The `digital` storage order already counts up in
//! binary; the `ground-rydberg` order stores the all-excited amplitude first
//! (`[rr, rg, gr, gg]` for two atoms) and is read back to front.
//!
//! When the readout basis differs from the addressed basis, the measured
//! levels were never populated and every shot reads all zeros.
//!
//! # Three-level particles
//!
//! The probability vector is viewed as an `N`-axis grid of extent 3. For
//! bitstring `k`, each axis selects the single logical-1 level (bit 1) or the
//! two logical-0 levels (bit 0); the weight of `k` is the total mass of that
//! sub-block. In the `digital` basis, for instance, `p(11010)` sums
//! `hhghg`, `hhrhg`, `hhghr` and `hhrhr`.

use ndarray::{ArrayD, IxDyn, Slice};
use rand::Rng;
use tracing::debug;

use crate::basis::{Basis, MeasurementBasis};
use crate::counts::Counts;
use crate::error::{ResultsError, ResultsResult};

/// Outcome distribution over `2^N` bitstrings.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeDistribution {
    /// Every shot yields the outcome with this index.
    Certain(usize),
    /// Weight of each outcome index (sums to one for normalised states).
    Weighted(Vec<f64>),
}

impl OutcomeDistribution {
    /// Dense weight table of length `2^n_particles`.
    pub fn to_weights(&self, n_particles: usize) -> Vec<f64> {
        match self {
            OutcomeDistribution::Certain(index) => {
                let mut w = vec![0.0; 1 << n_particles];
                w[*index] = 1.0;
                w
            }
            OutcomeDistribution::Weighted(w) => w.clone(),
        }
    }
}

/// Format an outcome index as a big-endian bitstring of `width` bits.
pub fn bitstring(index: usize, width: usize) -> String {
    format!("{index:0width$b}")
}

/// Compute the outcome distribution of a register.
///
/// `probs` is the probability of each computational-basis index of the
/// full register (length `dim^n_particles`). Every entry must be finite and
/// the total mass must be positive.
pub fn outcome_distribution(
    probs: &[f64],
    dim: usize,
    n_particles: usize,
    meas_basis: MeasurementBasis,
    addressing: Basis,
) -> ResultsResult<OutcomeDistribution> {
    if dim != 2 && dim != 3 {
        return Err(ResultsError::UnsupportedDimension(dim));
    }
    let expected = u32::try_from(n_particles)
        .ok()
        .and_then(|n| dim.checked_pow(n))
        .ok_or(ResultsError::InvalidRegisterSize(n_particles))?;
    if probs.len() != expected {
        return Err(ResultsError::ProbabilityLength {
            expected,
            found: probs.len(),
        });
    }
    let total: f64 = probs.iter().sum();
    if probs.iter().any(|p| !p.is_finite()) || total <= 0.0 {
        return Err(ResultsError::InvalidProbabilities { total });
    }

    match dim {
        2 => Ok(two_level_distribution(probs, meas_basis, addressing)),
        3 => three_level_weights(probs, n_particles, meas_basis).map(OutcomeDistribution::Weighted),
        other => Err(ResultsError::UnsupportedDimension(other)),
    }
}

fn two_level_distribution(
    probs: &[f64],
    meas_basis: MeasurementBasis,
    addressing: Basis,
) -> OutcomeDistribution {
    if !meas_basis.matches(addressing) {
        debug!(%meas_basis, %addressing, "readout basis not addressed; all particles read 0");
        return OutcomeDistribution::Certain(0);
    }
    let weights = match meas_basis {
        MeasurementBasis::Digital => probs.to_vec(),
        MeasurementBasis::GroundRydberg => probs.iter().rev().copied().collect(),
    };
    OutcomeDistribution::Weighted(weights)
}

fn three_level_weights(
    probs: &[f64],
    n_particles: usize,
    meas_basis: MeasurementBasis,
) -> ResultsResult<Vec<f64>> {
    let grid = ArrayD::from_shape_vec(IxDyn(&vec![3; n_particles]), probs.to_vec()).map_err(
        |_| ResultsError::ProbabilityLength {
            expected: u32::try_from(n_particles).map_or(usize::MAX, |n| 3usize.saturating_pow(n)),
            found: probs.len(),
        },
    )?;

    let one = meas_basis.one_level();
    let zero = meas_basis.zero_levels();

    let weights = (0..1usize << n_particles)
        .map(|k| {
            grid.slice_each_axis(|ax| {
                let bit = (k >> (n_particles - 1 - ax.axis.index())) & 1;
                if bit == 1 {
                    Slice::from(one..one + 1)
                } else {
                    Slice::from(zero.clone())
                }
            })
            .sum()
        })
        .collect();
    Ok(weights)
}

/// Draw `n_samples` independent outcomes and tally them as bitstrings.
pub fn sample_counts<R: Rng>(
    distribution: &OutcomeDistribution,
    n_particles: usize,
    n_samples: usize,
    rng: &mut R,
) -> Counts {
    let mut counts = Counts::new();
    match distribution {
        OutcomeDistribution::Certain(index) => {
            counts.insert(bitstring(*index, n_particles), n_samples as u64);
        }
        OutcomeDistribution::Weighted(weights) => {
            for (index, n) in multinomial(weights, n_samples, rng).into_iter().enumerate() {
                if n > 0 {
                    counts.insert(bitstring(index, n_particles), n);
                }
            }
        }
    }
    counts
}

/// One multinomial draw: `n_samples` categorical trials over `weights`.
///
/// Weights need not be normalised but must be finite; negative entries count
/// as zero. Returns the count of each category, all zero if no weight is
/// positive. [`outcome_distribution`] only produces tables that draw every
/// sample.
pub fn multinomial<R: Rng>(weights: &[f64], n_samples: usize, rng: &mut R) -> Vec<u64> {
    let mut tally = vec![0u64; weights.len()];

    let mut cdf = Vec::with_capacity(weights.len());
    let mut total = 0.0;
    for &w in weights {
        total += w.max(0.0);
        cdf.push(total);
    }
    let Some(last) = weights.iter().rposition(|&w| w > 0.0) else {
        return tally;
    };

    for _ in 0..n_samples {
        let u = rng.r#gen::<f64>() * total;
        // Floating-point rounding can push `u` past the final bucket.
        let index = cdf.partition_point(|&c| c <= u).min(last);
        tally[index] += 1;
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bitstring_is_big_endian() {
        assert_eq!(bitstring(1, 3), "001");
        assert_eq!(bitstring(4, 3), "100");
        assert_eq!(bitstring(0, 2), "00");
    }

    #[test]
    fn test_ground_rydberg_order_is_reversed() {
        // [rr, rg, gr, gg] -> [00, 01, 10, 11]
        let probs = [0.1, 0.2, 0.3, 0.4];
        let dist = outcome_distribution(
            &probs,
            2,
            2,
            MeasurementBasis::GroundRydberg,
            Basis::GroundRydberg,
        )
        .unwrap();
        assert_eq!(dist, OutcomeDistribution::Weighted(vec![0.4, 0.3, 0.2, 0.1]));
    }

    #[test]
    fn test_digital_order_is_kept() {
        let probs = [0.1, 0.2, 0.3, 0.4];
        let dist =
            outcome_distribution(&probs, 2, 2, MeasurementBasis::Digital, Basis::Digital).unwrap();
        assert_eq!(dist, OutcomeDistribution::Weighted(probs.to_vec()));
    }

    #[test]
    fn test_unaddressed_basis_is_certain_zero() {
        let probs = [0.1, 0.2, 0.3, 0.4];
        let dist =
            outcome_distribution(&probs, 2, 2, MeasurementBasis::Digital, Basis::GroundRydberg)
                .unwrap();
        assert_eq!(dist, OutcomeDistribution::Certain(0));
        assert_eq!(dist.to_weights(2), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_three_level_single_atom() {
        // [r, g, h]
        let probs = [0.5, 0.2, 0.3];
        let gr =
            outcome_distribution(&probs, 3, 1, MeasurementBasis::GroundRydberg, Basis::All).unwrap();
        let dg = outcome_distribution(&probs, 3, 1, MeasurementBasis::Digital, Basis::All).unwrap();
        let gr = gr.to_weights(1);
        let dg = dg.to_weights(1);
        assert!((gr[0] - 0.5).abs() < 1e-12 && (gr[1] - 0.5).abs() < 1e-12);
        assert!((dg[0] - 0.7).abs() < 1e-12 && (dg[1] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_three_level_marginal_is_big_endian() {
        // Two atoms, all mass on |r⟩ ⊗ |g⟩ (flat index 0*3 + 1).
        let mut probs = vec![0.0; 9];
        probs[1] = 1.0;
        let w = outcome_distribution(&probs, 3, 2, MeasurementBasis::GroundRydberg, Basis::All)
            .unwrap()
            .to_weights(2);
        // First atom in r -> 1, second in g -> 0 => "10" = index 2.
        assert_eq!(w, vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unsupported_dimension() {
        let err = outcome_distribution(&[1.0; 4], 4, 1, MeasurementBasis::Digital, Basis::Digital)
            .unwrap_err();
        assert!(matches!(err, ResultsError::UnsupportedDimension(4)));
    }

    #[test]
    fn test_wrong_probability_length() {
        let err = outcome_distribution(&[1.0; 8], 3, 2, MeasurementBasis::Digital, Basis::All)
            .unwrap_err();
        assert!(matches!(
            err,
            ResultsError::ProbabilityLength {
                expected: 9,
                found: 8
            }
        ));
    }

    #[test]
    fn test_zero_mass_is_rejected() {
        for dim in [2, 3] {
            let probs = vec![0.0; dim * dim];
            let err =
                outcome_distribution(&probs, dim, 2, MeasurementBasis::Digital, Basis::Digital)
                    .unwrap_err();
            assert!(matches!(err, ResultsError::InvalidProbabilities { .. }));
        }
    }

    #[test]
    fn test_non_finite_probability_is_rejected() {
        let probs = [f64::NAN, 1.0];
        let err = outcome_distribution(&probs, 2, 1, MeasurementBasis::Digital, Basis::Digital)
            .unwrap_err();
        assert!(matches!(err, ResultsError::InvalidProbabilities { .. }));

        // The all-zeros readout of an unaddressed basis still needs a valid state.
        let err =
            outcome_distribution(&probs, 2, 1, MeasurementBasis::Digital, Basis::GroundRydberg)
                .unwrap_err();
        assert!(matches!(err, ResultsError::InvalidProbabilities { .. }));
    }

    #[test]
    fn test_multinomial_total_and_zero_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        let tally = multinomial(&[0.0, 0.25, 0.0, 0.75, 0.0], 1000, &mut rng);
        assert_eq!(tally.iter().sum::<u64>(), 1000);
        assert_eq!(tally[0], 0);
        assert_eq!(tally[2], 0);
        assert_eq!(tally[4], 0);
    }

    #[test]
    fn test_multinomial_unnormalised() {
        let mut rng = StdRng::seed_from_u64(11);
        let tally = multinomial(&[2.0, 2.0], 10_000, &mut rng);
        assert_eq!(tally[0] + tally[1], 10_000);
        assert!(tally[0] > 4_500 && tally[0] < 5_500);
    }

    #[test]
    fn test_sample_counts_omits_zero_entries() {
        let mut rng = StdRng::seed_from_u64(3);
        let dist = OutcomeDistribution::Weighted(vec![0.0, 1.0, 0.0, 0.0]);
        let counts = sample_counts(&dist, 2, 50, &mut rng);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("01"), 50);
    }
}
