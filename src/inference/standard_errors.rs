//! Closed-form standard errors for local Whittle–type estimators.
//!
//! Purpose
//! -------
//! Turn the frequency grid and the taper's variance multiplier into the two
//! standard errors every Whittle estimate reports, and build normal
//! confidence intervals from them.
//!
//! Key behaviors
//! -------------
//! - `se` is the inverse square root of the local Whittle Fisher information
//!   at fixed bandwidth, `se = sqrt(Φ / (4 Σ_j ν_j²))` with
//!   `ν_j = log λ_j − mean_k log λ_k`.
//! - `ase` is the limit-theory value `sqrt(Φ / (4K))`, `K` the number of
//!   frequencies used. Both agree as `K → ∞` because `Σ ν_j² / K → 1`.
//! - `Φ = 1` for the untapered periodogram and ELW; tapers supply their own
//!   multiplier (e.g. `1.5` for Hurvich–Chen).
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs depend only on the frequencies and the taper, never on the
//!   optimizer; the functions are deterministic closed forms.
//! - A single frequency carries no information about `d` (`Σ ν_j² = 0`):
//!   `se` is reported as `+∞` rather than as an error.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the values for common bandwidths (m = 68 gives
//!   `ase = 0.06063`, the figure reported in published Nile replications),
//!   the taper scaling, the single-frequency case and interval symmetry.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::ArrayView1;
use statrs::distribution::{ContinuousCDF, Normal};

/// Pair of standard errors reported with every estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardErrors {
    /// Fisher-information based standard error at fixed bandwidth.
    pub se: f64,
    /// Asymptotic standard error, a function of the frequency count only.
    pub ase: f64,
}

/// Compute both standard errors from log-frequencies and a variance factor.
///
/// Parameters
/// ----------
/// - `log_freqs`: `log λ_j` for the frequencies entering the objective.
/// - `variance_factor`: taper multiplier `Φ > 0`.
///
/// Errors
/// ------
/// - `EmptyFrequencies` if `log_freqs` is empty.
/// - `NonFiniteLogFrequency` for NaN/±inf entries.
/// - `InvalidVarianceFactor` for a non-finite or non-positive `Φ`.
pub fn standard_errors(
    log_freqs: ArrayView1<f64>, variance_factor: f64,
) -> InferenceResult<StandardErrors> {
    Ok(StandardErrors {
        se: fisher_se(log_freqs, variance_factor)?,
        ase: asymptotic_se(log_freqs.len(), variance_factor)?,
    })
}

/// `sqrt(Φ / (4 Σ_j ν_j²))`, with `+∞` for a single frequency.
pub fn fisher_se(log_freqs: ArrayView1<f64>, variance_factor: f64) -> InferenceResult<f64> {
    verify_variance_factor(variance_factor)?;
    if log_freqs.is_empty() {
        return Err(InferenceError::EmptyFrequencies);
    }
    for (index, &value) in log_freqs.iter().enumerate() {
        if !value.is_finite() {
            return Err(InferenceError::NonFiniteLogFrequency { index, value });
        }
    }
    let mean = log_freqs.sum() / log_freqs.len() as f64;
    let ssq: f64 = log_freqs.iter().map(|&l| (l - mean).powi(2)).sum();
    if ssq <= 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok((variance_factor / (4.0 * ssq)).sqrt())
}

/// `sqrt(Φ / (4K))` for `K` frequencies.
pub fn asymptotic_se(count: usize, variance_factor: f64) -> InferenceResult<f64> {
    verify_variance_factor(variance_factor)?;
    if count == 0 {
        return Err(InferenceError::EmptyFrequencies);
    }
    Ok((variance_factor / (4.0 * count as f64)).sqrt())
}

/// Two-sided normal confidence interval `d̂ ± z_{(1+level)/2} · se`.
///
/// An infinite `se` yields `(-∞, +∞)`.
///
/// Errors
/// ------
/// - `InvalidConfidenceLevel` unless `0 < level < 1`.
/// - `InvalidStandardError` for a negative or NaN `se`.
pub fn confidence_interval(d_hat: f64, se: f64, level: f64) -> InferenceResult<(f64, f64)> {
    if !(level > 0.0 && level < 1.0) {
        return Err(InferenceError::InvalidConfidenceLevel {
            level,
            reason: "Level must lie strictly between 0 and 1.",
        });
    }
    if se.is_nan() || se < 0.0 {
        return Err(InferenceError::InvalidStandardError { value: se });
    }
    let normal =
        Normal::new(0.0, 1.0).map_err(|err| InferenceError::Distribution(err.to_string()))?;
    let half_width = normal.inverse_cdf(0.5 * (1.0 + level)) * se;
    Ok((d_hat - half_width, d_hat + half_width))
}

fn verify_variance_factor(value: f64) -> InferenceResult<()> {
    if !value.is_finite() {
        return Err(InferenceError::InvalidVarianceFactor {
            value,
            reason: "Variance factor must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(InferenceError::InvalidVarianceFactor {
            value,
            reason: "Variance factor must be positive.",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array1;
    use std::f64::consts::PI;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Reference values of `se` / `ase` for common bandwidths.
    // - Invariance of `se` to the sample size (ν_j only depends on j).
    // - Taper scaling, the single-frequency case and input validation.
    // - Symmetry and width of confidence intervals.
    // -------------------------------------------------------------------------

    fn log_freqs(n: usize, m: usize) -> Array1<f64> {
        Array1::from_iter((1..=m).map(|j| (2.0 * PI * j as f64 / n as f64).ln()))
    }

    #[test]
    // Purpose
    // -------
    // Pin `se` and `ase` for the Nile bandwidth.
    //
    // Given
    // -----
    // - n = 663, m = 68, Φ = 1.
    //
    // Expect
    // ------
    // - ase = 1/(2√68) ≈ 0.0606339 and se ≈ 0.0672603.
    fn nile_bandwidth_reference_values() {
        // Arrange
        let lf = log_freqs(663, 68);

        // Act
        let ses = standard_errors(lf.view(), 1.0).expect("valid inputs");

        // Assert
        assert_relative_eq!(ses.ase, 0.060_633_906_259, epsilon = 1e-10);
        assert_relative_eq!(ses.se, 0.067_260_331_974, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Check `se` depends on the frequency indices only.
    //
    // Given
    // -----
    // - m = 40 with n = 500 and n = 4000.
    //
    // Expect
    // ------
    // - Identical `se` up to rounding.
    fn fisher_se_is_invariant_to_sample_size() {
        // Act
        let a = fisher_se(log_freqs(500, 40).view(), 1.0).expect("valid");
        let b = fisher_se(log_freqs(4000, 40).view(), 1.0).expect("valid");

        // Assert
        assert_relative_eq!(a, b, epsilon = 1e-12);
        assert_relative_eq!(a, 0.091_670_235_532, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Check the taper multiplier scales both errors by sqrt(Φ).
    //
    // Given
    // -----
    // - m = 40, Φ = 1.5.
    //
    // Expect
    // ------
    // - Both errors equal sqrt(1.5) times the untapered values.
    fn variance_factor_scales_by_square_root() {
        // Arrange
        let lf = log_freqs(500, 40);

        // Act
        let plain = standard_errors(lf.view(), 1.0).expect("valid");
        let tapered = standard_errors(lf.view(), 1.5).expect("valid");

        // Assert
        assert_relative_eq!(tapered.se, plain.se * 1.5f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(tapered.ase, plain.ase * 1.5f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the single-frequency and invalid-input paths.
    //
    // Given
    // -----
    // - One frequency; an empty set; Φ = 0; a NaN log-frequency.
    //
    // Expect
    // ------
    // - se = +∞ and ase = 0.5 for one frequency; errors otherwise.
    fn degenerate_inputs_are_handled() {
        // Act
        let single = standard_errors(log_freqs(100, 1).view(), 1.0).expect("valid");
        let empty = standard_errors(Array1::<f64>::zeros(0).view(), 1.0);
        let zero_factor = asymptotic_se(10, 0.0);
        let nan = fisher_se(ndarray::array![0.0, f64::NAN].view(), 1.0);

        // Assert
        assert_eq!(single.se, f64::INFINITY);
        assert_relative_eq!(single.ase, 0.5, epsilon = 1e-15);
        assert_eq!(empty, Err(InferenceError::EmptyFrequencies));
        assert!(matches!(zero_factor, Err(InferenceError::InvalidVarianceFactor { .. })));
        assert!(matches!(nan, Err(InferenceError::NonFiniteLogFrequency { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check interval symmetry and the 95% critical value.
    //
    // Given
    // -----
    // - d̂ = 0.4, se = 0.1, level 0.95 and 0.99; an invalid level 1.0.
    //
    // Expect
    // ------
    // - Half-width 0.196 at 95%, wider at 99%, error at level 1.0.
    fn confidence_interval_is_symmetric_normal_interval() {
        // Act
        let (lo, hi) = confidence_interval(0.4, 0.1, 0.95).expect("valid");
        let (lo99, hi99) = confidence_interval(0.4, 0.1, 0.99).expect("valid");

        // Assert
        assert_relative_eq!(hi - 0.4, 0.4 - lo, epsilon = 1e-12);
        assert_relative_eq!(hi - 0.4, 0.195_996_398_454, epsilon = 1e-6);
        assert!(hi99 - lo99 > hi - lo);
        assert!(confidence_interval(0.4, 0.1, 1.0).is_err());
    }
}
