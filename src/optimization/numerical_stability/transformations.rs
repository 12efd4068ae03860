//! Numerical stability utilities.
//!
//! Log-domain helpers for sums of exponentials, so that objectives of the
//! form `log( (1/m) Σ_j λ_j^{2d} I_j )` can be evaluated for extreme `d`
//! without forming `λ_j^{2d}` explicitly.
//!
//! # Provided items
//! - [`GENERAL_TOL`]: generic small tolerance shared across modules.
//! - [`DEGENERACY_TOL`]: relative energy floor below which a periodogram is
//!   treated as identically zero.
//! - [`safe_ln`]: `ln(x)` for `x > 0`, `-∞` otherwise.
//! - [`log_sum_exp`] / [`log_mean_exp`]: max-shifted `log Σ exp(t_j)` and
//!   `log((1/k) Σ exp(t_j))`, ignoring `-∞` terms.
use ndarray::ArrayView1;

/// Generic small tolerance for comparisons against zero.
pub const GENERAL_TOL: f64 = 1e-12;

/// Relative floor for periodogram ordinates.
///
/// A periodogram whose largest ordinate is below `DEGENERACY_TOL` times the
/// series energy carries no information beyond rounding noise.
pub const DEGENERACY_TOL: f64 = 1e-20;

/// Natural log that maps non-positive inputs to `-∞` instead of NaN.
pub fn safe_ln(x: f64) -> f64 {
    if x > 0.0 { x.ln() } else { f64::NEG_INFINITY }
}

/// Max-shifted `log Σ_j exp(t_j)`.
///
/// `-∞` terms contribute nothing. Returns `-∞` when every term is `-∞` or
/// the input is empty, and NaN if any term is NaN or `+∞`.
pub fn log_sum_exp(terms: ArrayView1<f64>) -> f64 {
    if terms.iter().any(|t| t.is_nan() || *t == f64::INFINITY) {
        return f64::NAN;
    }
    let max = terms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = terms.iter().map(|&t| (t - max).exp()).sum();
    max + sum.ln()
}

/// Max-shifted `log((1/k) Σ_j exp(t_j))` with `k = terms.len()`.
pub fn log_mean_exp(terms: ArrayView1<f64>) -> f64 {
    log_sum_exp(terms) - (terms.len() as f64).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of `log_sum_exp` / `log_mean_exp` with the naïve formula on
    //   safe inputs.
    // - Finiteness on inputs whose exponentials overflow `f64`.
    // - Handling of `-∞` and NaN terms.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Compare the stable helpers to the naïve formula where both are safe.
    //
    // Given
    // -----
    // - Terms [0.1, -2.0, 3.5].
    //
    // Expect
    // ------
    // - Agreement to 1e-12 for both the sum and the mean.
    fn log_sum_exp_matches_naive_formula_on_safe_inputs() {
        // Arrange
        let terms = array![0.1, -2.0, 3.5];
        let naive: f64 = terms.iter().map(|t: &f64| t.exp()).sum::<f64>().ln();

        // Act & Assert
        assert_relative_eq!(log_sum_exp(terms.view()), naive, epsilon = 1e-12);
        assert_relative_eq!(log_mean_exp(terms.view()), naive - 3f64.ln(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure terms whose exponentials overflow still give a finite result.
    //
    // Given
    // -----
    // - Terms [1000, 1000].
    //
    // Expect
    // ------
    // - log_sum_exp = 1000 + ln 2.
    fn log_sum_exp_stays_finite_for_huge_terms() {
        // Arrange
        let terms = array![1000.0, 1000.0];

        // Act
        let value = log_sum_exp(terms.view());

        // Assert
        assert_relative_eq!(value, 1000.0 + 2f64.ln(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the edge cases: skipped `-∞` terms, all `-∞`, NaN.
    //
    // Given
    // -----
    // - [ln 2, -∞], [-∞, -∞] and [0, NaN].
    //
    // Expect
    // ------
    // - ln 2, -∞ and NaN respectively; `safe_ln(0) = -∞`.
    fn log_sum_exp_handles_degenerate_terms() {
        // Act & Assert
        assert_relative_eq!(
            log_sum_exp(array![2f64.ln(), f64::NEG_INFINITY].view()),
            2f64.ln(),
            epsilon = 1e-15
        );
        assert_eq!(
            log_sum_exp(array![f64::NEG_INFINITY, f64::NEG_INFINITY].view()),
            f64::NEG_INFINITY
        );
        assert!(log_sum_exp(array![0.0, f64::NAN].view()).is_nan());
        assert_eq!(safe_ln(0.0), f64::NEG_INFINITY);
    }
}
