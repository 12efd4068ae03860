//! Periodogram at the low Fourier frequencies.
//!
//! Purpose
//! -------
//! Build the (optionally tapered, optionally differenced) periodogram that
//! the local Whittle objectives consume, and expose the reusable
//! [`FourierGrid`] that evaluates periodogram ordinates of arbitrary series
//! on a fixed frequency set.
//!
//! Key behaviors
//! -------------
//! - `I(λ_j) = |Σ_t h_t x_t e^{−iλ_j t}|² / (2π Σ_t |h_t|²)` with
//!   `λ_j = 2πj/n`; for `h_t ≡ 1` this is the usual `1/(2πn)` scaling.
//! - The grid keeps `j = s, 2s, … ≤ m` for a taper of stride `s`.
//! - Ordinates come from a full `rustfft` transform of length `n`; the phase
//!   convention (`t = 0..n−1` vs `1..n`) does not affect `|·|²`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Ordinates are real, non-negative and ordered by increasing `j`.
//! - Constant series and periodograms whose largest ordinate is below
//!   `DEGENERACY_TOL` times the series energy are rejected with
//!   [`WhittleError::DegeneratePeriodogram`].
//!
//! Downstream usage
//! ----------------
//! - LW builds one [`Periodogram`] per call via [`build_periodogram`].
//! - ELW owns a [`FourierGrid`] and re-evaluates ordinates of `Δ^d (x − μ)`
//!   for every candidate `d`.
use crate::{
    optimization::numerical_stability::transformations::DEGENERACY_TOL,
    whittle::{
        core::{
            bandwidth::validate_bandwidth,
            data::{MIN_OBSERVATIONS, is_constant},
            taper::Taper,
            transforms::difference,
        },
        errors::{WhittleError, WhittleResult},
    },
};
use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::{f64::consts::PI, sync::Arc};

/// Fourier frequency set `{λ_j : j = s, 2s, … ≤ m}` for a series of length
/// `n`, with a cached forward FFT plan.
#[derive(Clone)]
pub struct FourierGrid {
    n: usize,
    indices: Vec<usize>,
    fft: Arc<dyn Fft<f64>>,
}

impl std::fmt::Debug for FourierGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FourierGrid").field("n", &self.n).field("indices", &self.indices).finish()
    }
}

impl FourierGrid {
    /// Validate `m` and plan the transform.
    ///
    /// # Errors
    /// [`WhittleError::InvalidBandwidth`] as in
    /// [`validate_bandwidth`](crate::whittle::core::bandwidth::validate_bandwidth).
    pub fn new(n: usize, m: usize, stride: usize) -> WhittleResult<Self> {
        validate_bandwidth(m, n, stride)?;
        let indices = (stride..=m).step_by(stride).collect();
        let fft = FftPlanner::new().plan_fft_forward(n);
        Ok(Self { n, indices, fft })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of frequencies on the grid.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// `λ_j = 2πj/n` for every grid index.
    pub fn freqs(&self) -> Array1<f64> {
        self.indices.iter().map(|&j| 2.0 * PI * j as f64 / self.n as f64).collect()
    }

    pub fn log_freqs(&self) -> Array1<f64> {
        self.freqs().mapv(f64::ln)
    }

    /// Periodogram ordinates of `series` (length `n`) on the grid, with
    /// optional taper weights `h_t`.
    pub fn ordinates(
        &self, series: ArrayView1<f64>, weights: Option<ArrayView1<Complex64>>,
    ) -> Array1<f64> {
        let mut buf: Vec<Complex64> = match weights {
            Some(h) => series.iter().zip(h.iter()).map(|(&x, &w)| w * x).collect(),
            None => series.iter().map(|&x| Complex64::new(x, 0.0)).collect(),
        };
        let energy = match weights {
            Some(h) => h.iter().map(|w| w.norm_sqr()).sum::<f64>(),
            None => self.n as f64,
        };
        self.fft.process(&mut buf);
        let scale = 1.0 / (2.0 * PI * energy);
        self.indices.iter().map(|&j| buf[j].norm_sqr() * scale).collect()
    }
}

/// Periodogram on the low-frequency grid, with the frequencies it was
/// evaluated at.
#[derive(Debug, Clone, PartialEq)]
pub struct Periodogram {
    /// Length of the series the transform was taken of (after differencing).
    pub n: usize,
    /// Taper used.
    pub taper: Taper,
    /// `λ_j`, increasing.
    pub freqs: Array1<f64>,
    /// `log λ_j`.
    pub log_freqs: Array1<f64>,
    /// `I(λ_j) ≥ 0`.
    pub ordinates: Array1<f64>,
}

impl Periodogram {
    /// Number of frequencies.
    pub fn len(&self) -> usize {
        self.ordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinates.is_empty()
    }
}

/// Difference `series` `diff` times, then compute the tapered periodogram at
/// the grid frequencies up to `m`.
///
/// # Errors
/// - [`WhittleError::InsufficientData`] if fewer than four observations
///   remain after differencing.
/// - [`WhittleError::InvalidBandwidth`] for an invalid `m`.
/// - [`WhittleError::DegeneratePeriodogram`] for a constant (differenced)
///   series or an all-zero periodogram.
pub fn build_periodogram(
    series: ArrayView1<f64>, m: usize, diff: usize, taper: Taper,
) -> WhittleResult<Periodogram> {
    let x = difference(series, diff);
    if x.len() < MIN_OBSERVATIONS {
        return Err(WhittleError::InsufficientData { len: x.len(), min: MIN_OBSERVATIONS });
    }
    if is_constant(x.view()) {
        return Err(WhittleError::DegeneratePeriodogram {
            reason: "Series is constant after differencing.",
        });
    }

    let n = x.len();
    let grid = FourierGrid::new(n, m, taper.stride())?;
    let weights = match taper {
        Taper::None => None,
        other => Some(other.weights(n)),
    };
    let ordinates = grid.ordinates(x.view(), weights.as_ref().map(|w| w.view()));
    check_degeneracy(x.view(), ordinates.view())?;

    Ok(Periodogram { n, taper, freqs: grid.freqs(), log_freqs: grid.log_freqs(), ordinates })
}

/// Reject periodograms with no ordinate above the relative energy floor.
pub fn check_degeneracy(
    series: ArrayView1<f64>, ordinates: ArrayView1<f64>,
) -> WhittleResult<()> {
    let energy: f64 = series.iter().map(|v| v * v).sum();
    let peak = ordinates.iter().copied().fold(0.0, f64::max);
    if !(peak > DEGENERACY_TOL * energy) {
        return Err(WhittleError::DegeneratePeriodogram {
            reason: "All periodogram ordinates vanish relative to the series energy.",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Ordinates against a direct DFT.
    // - Grid lengths per taper stride and the post-difference length.
    // - Degeneracy errors.
    // -------------------------------------------------------------------------

    fn wiggle(n: usize) -> Array1<f64> {
        Array1::from_iter((0..n).map(|t| (0.7 * t as f64).sin() + 0.3 * (2.1 * t as f64).cos()))
    }

    #[test]
    // Purpose
    // -------
    // Check the FFT ordinates against the textbook DFT formula.
    //
    // Given
    // -----
    // - A deterministic series of length 30, m = 6, no taper.
    //
    // Expect
    // ------
    // - Agreement with `|Σ x_t e^{−iλ_j t}|² / (2πn)` to 1e-10.
    fn ordinates_match_direct_dft() {
        // Arrange
        let x = wiggle(30);
        let n = x.len() as f64;

        // Act
        let pgram = build_periodogram(x.view(), 6, 0, Taper::None).expect("valid input");

        // Assert
        for (k, &value) in pgram.ordinates.iter().enumerate() {
            let lambda = 2.0 * PI * (k + 1) as f64 / n;
            let dft: Complex64 = x
                .iter()
                .enumerate()
                .map(|(t, &v)| v * Complex64::from_polar(1.0, -lambda * (t + 1) as f64))
                .sum();
            assert_relative_eq!(value, dft.norm_sqr() / (2.0 * PI * n), epsilon = 1e-10);
            assert_relative_eq!(pgram.freqs[k], lambda, epsilon = 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify lengths follow the taper stride and differencing shortens n.
    //
    // Given
    // -----
    // - n = 101, m = 20 with each taper; diff = 1 for Hurvich–Chen.
    //
    // Expect
    // ------
    // - Lengths 20, 10, 20; n = 100 after one difference.
    fn lengths_follow_stride_and_differencing() {
        // Arrange
        let x = wiggle(101);

        // Act
        let plain = build_periodogram(x.view(), 20, 0, Taper::None).expect("valid");
        let bartlett = build_periodogram(x.view(), 20, 0, Taper::Bartlett).expect("valid");
        let hc = build_periodogram(x.view(), 20, 1, Taper::HurvichChen).expect("valid");

        // Assert
        assert_eq!(plain.len(), 20);
        assert_eq!(bartlett.len(), 10);
        assert_relative_eq!(bartlett.freqs[0], 2.0 * PI * 2.0 / 101.0, epsilon = 1e-15);
        assert_eq!(hc.len(), 20);
        assert_eq!(hc.n, 100);
        assert!(hc.ordinates.iter().all(|&v| v >= 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure constant inputs and short differenced inputs are rejected.
    //
    // Given
    // -----
    // - 100 copies of 5.0; a linear ramp differenced once; 5 points
    //   differenced twice.
    //
    // Expect
    // ------
    // - `DegeneratePeriodogram` twice, then `InsufficientData`.
    fn degenerate_inputs_are_rejected() {
        // Arrange
        let flat = Array1::from_elem(100, 5.0);
        let ramp = Array1::from_iter((0..100).map(|t| 2.0 * t as f64));
        let short = wiggle(5);

        // Act & Assert
        assert!(matches!(
            build_periodogram(flat.view(), 10, 0, Taper::None),
            Err(WhittleError::DegeneratePeriodogram { .. })
        ));
        assert!(matches!(
            build_periodogram(ramp.view(), 10, 1, Taper::None),
            Err(WhittleError::DegeneratePeriodogram { .. })
        ));
        assert!(matches!(
            build_periodogram(short.view(), 1, 2, Taper::None),
            Err(WhittleError::InsufficientData { len: 3, min: 4 })
        ));
    }
}
