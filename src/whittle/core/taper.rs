//! Data tapers for the local Whittle periodogram.
//!
//! Each [`Taper`] variant carries everything the estimators need to know
//! about it: the weights `h_t`, the stride of the usable frequency grid, the
//! variance multiplier `Φ` of the resulting estimator and the differencing
//! order applied by default.
//!
//! | taper          | `h_t`, `t = 1..n`              | stride | `Φ`  | diff |
//! |----------------|--------------------------------|--------|------|------|
//! | `None`         | `1`                            | 1      | 1    | 0    |
//! | `Bartlett`     | `1 − abs(2t − n − 1) / (n + 1)` | 2      | 1.05 | 0    |
//! | `HurvichChen`  | `½ (1 − e^{i 2π t / n})`       | 1      | 1.5  | 1    |
use crate::whittle::errors::WhittleError;
use ndarray::Array1;
use num_complex::Complex64;
use std::{f64::consts::PI, fmt, str::FromStr};

/// Taper applied before the discrete Fourier transform.
///
/// Parsing accepts case-insensitive `"none"`, `"bartlett"` (or `"velasco"`)
/// and `"hc"` (or `"hurvich-chen"`); unknown names return
/// [`WhittleError::UnknownTaper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Taper {
    #[default]
    None,
    /// Velasco (1999) triangular taper of order 2.
    Bartlett,
    /// Hurvich & Chen (2000) complex taper.
    HurvichChen,
}

impl Taper {
    /// Taper weights `h_1..h_n`.
    pub fn weights(&self, n: usize) -> Array1<Complex64> {
        let nf = n as f64;
        Array1::from_iter((1..=n).map(|t| {
            let t = t as f64;
            match self {
                Taper::None => Complex64::new(1.0, 0.0),
                Taper::Bartlett => {
                    Complex64::new(1.0 - (2.0 * t - nf - 1.0).abs() / (nf + 1.0), 0.0)
                }
                Taper::HurvichChen => {
                    0.5 * (Complex64::new(1.0, 0.0) - Complex64::from_polar(1.0, 2.0 * PI * t / nf))
                }
            }
        }))
    }

    /// Frequency stride: only `j = stride, 2·stride, … ≤ m` are used.
    pub fn stride(&self) -> usize {
        match self {
            Taper::Bartlett => 2,
            Taper::None | Taper::HurvichChen => 1,
        }
    }

    /// Multiplier `Φ` on the asymptotic variance `1 / (4m)`.
    pub fn variance_factor(&self) -> f64 {
        match self {
            Taper::None => 1.0,
            Taper::Bartlett => 1.05,
            Taper::HurvichChen => 1.5,
        }
    }

    /// Number of first differences applied when the caller does not choose.
    pub fn default_diff(&self) -> usize {
        match self {
            Taper::HurvichChen => 1,
            Taper::None | Taper::Bartlett => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Taper::None => "none",
            Taper::Bartlett => "bartlett",
            Taper::HurvichChen => "hc",
        }
    }
}

impl fmt::Display for Taper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Taper {
    type Err = WhittleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "none" | "" => Ok(Taper::None),
            "bartlett" | "velasco" => Ok(Taper::Bartlett),
            "hc" | "hurvichchen" => Ok(Taper::HurvichChen),
            _ => Err(WhittleError::UnknownTaper { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Name parsing.
    // - Shape of the Bartlett and Hurvich–Chen weights.
    // - The per-taper constants.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify case-insensitive parsing and the unknown-name error.
    //
    // Given
    // -----
    // - "HC", "Hurvich-Chen", "BARTLETT", "None", "hann".
    //
    // Expect
    // ------
    // - The first four parse; "hann" is `UnknownTaper`.
    fn taper_parses_known_names() {
        assert_eq!("HC".parse::<Taper>(), Ok(Taper::HurvichChen));
        assert_eq!("Hurvich-Chen".parse::<Taper>(), Ok(Taper::HurvichChen));
        assert_eq!("BARTLETT".parse::<Taper>(), Ok(Taper::Bartlett));
        assert_eq!("None".parse::<Taper>(), Ok(Taper::None));
        assert_eq!(
            "hann".parse::<Taper>(),
            Err(WhittleError::UnknownTaper { name: "hann".to_string() })
        );
    }

    #[test]
    // Purpose
    // -------
    // Check the triangular weights are symmetric and peak in the middle.
    //
    // Given
    // -----
    // - n = 5.
    //
    // Expect
    // ------
    // - Weights [1/3, 2/3, 1, 2/3, 1/3], all real.
    fn bartlett_weights_are_triangular() {
        // Act
        let w = Taper::Bartlett.weights(5);

        // Assert
        for (h, expected) in w.iter().zip([1.0 / 3.0, 2.0 / 3.0, 1.0, 2.0 / 3.0, 1.0 / 3.0]) {
            assert_relative_eq!(h.re, expected, epsilon = 1e-15);
            assert_eq!(h.im, 0.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the Hurvich–Chen weights vanish at t = n and have
    // `Σ |h_t|² = n/2`.
    //
    // Given
    // -----
    // - n = 64.
    //
    // Expect
    // ------
    // - h_n ≈ 0 and the energy equals 32.
    fn hurvich_chen_weights_have_known_energy() {
        // Act
        let w = Taper::HurvichChen.weights(64);
        let energy: f64 = w.iter().map(|h| h.norm_sqr()).sum();

        // Assert
        assert!(w[63].norm() < 1e-12);
        assert_relative_eq!(energy, 32.0, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Pin the per-taper constants used by the estimators.
    //
    // Given
    // -----
    // - Every variant.
    //
    // Expect
    // ------
    // - Strides (1, 2, 1), factors (1, 1.05, 1.5), default diffs (0, 0, 1).
    fn taper_constants_are_pinned() {
        let all = [Taper::None, Taper::Bartlett, Taper::HurvichChen];
        assert_eq!(all.map(|t| t.stride()), [1, 2, 1]);
        assert_eq!(all.map(|t| t.variance_factor()), [1.0, 1.05, 1.5]);
        assert_eq!(all.map(|t| t.default_diff()), [0, 0, 1]);
    }
}
