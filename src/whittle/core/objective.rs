//! Concentrated Whittle objectives in the memory parameter `d`.
//!
//! Purpose
//! -------
//! Provide the two scalar objectives the estimators minimize, as
//! [`ScalarObjective`] implementations the bounded optimizer accepts
//! directly.
//!
//! Key behaviors
//! -------------
//! - [`LwObjective`]: `R(d) = log((1/K) Σ_j λ_j^{2d} I_j) − 2d (1/K) Σ_j log λ_j`
//!   over a fixed periodogram, evaluated as a log-mean-exp of
//!   `2d log λ_j + log I_j` so `λ^{2d}` is never formed.
//! - [`ElwObjective`]: `R(d) = log((1/m) Σ_j I_{Δ^d y}(λ_j)) − 2d (1/m) Σ_j log λ_j`
//!   with `y = x − μ̂(d)`; the periodogram is recomputed for every `d`.
//! - [`MeanEstimation`] selects `μ̂(d)` for ELW.
//!
//! Invariants & assumptions
//! ------------------------
//! - Zero periodogram ordinates contribute nothing to the LW sum; an
//!   objective with no usable term is a
//!   [`WhittleError::NumericalOverflow`], never a NaN.
//! - Objectives are pure functions of `d`; repeated evaluation is
//!   bit-identical.
//!
//! Conventions
//! -----------
//! - `d` is on the scale of the series the objective was built from (after
//!   any integer differencing for LW).
use crate::{
    optimization::{
        errors::OptResult,
        numerical_stability::transformations::{log_mean_exp, safe_ln},
        scalar_optimizer::{Cost, ScalarObjective},
    },
    whittle::{
        core::{
            periodogram::{FourierGrid, Periodogram},
            transforms::FracDiffer,
        },
        errors::{WhittleError, WhittleResult},
    },
};
use ndarray::{Array1, ArrayView1};
use std::{f64::consts::PI, fmt, str::FromStr};

/// Mean correction applied before fractional differencing in ELW.
///
/// - `None`: `μ = 0`.
/// - `Mean`: sample mean (default).
/// - `Init`: first observation.
/// - `Weighted`: `w(d) x̄ + (1 − w(d)) x_1`, see [`adaptive_weight`].
/// - `Given(μ)`: caller-supplied value.
///
/// Parsing accepts case-insensitive `"none"`, `"mean"`, `"init"` and
/// `"weighted"`, or a number for `Given`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeanEstimation {
    None,
    #[default]
    Mean,
    Init,
    Weighted,
    Given(f64),
}

impl MeanEstimation {
    /// `μ̂(d)` given the sample mean and the first observation.
    pub fn estimate(&self, d: f64, sample_mean: f64, first: f64) -> f64 {
        match *self {
            MeanEstimation::None => 0.0,
            MeanEstimation::Mean => sample_mean,
            MeanEstimation::Init => first,
            MeanEstimation::Weighted => {
                let w = adaptive_weight(d);
                w * sample_mean + (1.0 - w) * first
            }
            MeanEstimation::Given(mu) => mu,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MeanEstimation::None => "none",
            MeanEstimation::Mean => "mean",
            MeanEstimation::Init => "init",
            MeanEstimation::Weighted => "weighted",
            MeanEstimation::Given(_) => "given",
        }
    }
}

impl fmt::Display for MeanEstimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeanEstimation::Given(mu) => write!(f, "given({mu})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for MeanEstimation {
    type Err = WhittleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(MeanEstimation::None),
            "mean" => Ok(MeanEstimation::Mean),
            "init" | "first" => Ok(MeanEstimation::Init),
            "weighted" | "adaptive" => Ok(MeanEstimation::Weighted),
            other => match other.parse::<f64>() {
                Ok(mu) if mu.is_finite() => Ok(MeanEstimation::Given(mu)),
                _ => Err(WhittleError::UnknownMeanEstimation { name: s.to_string() }),
            },
        }
    }
}

/// Weight on the sample mean in the adaptive mean:
/// `1` for `d ≤ ½`, `½ (1 + cos 4πd)` for `½ < d < ¾`, `0` for `d ≥ ¾`.
pub fn adaptive_weight(d: f64) -> f64 {
    if d <= 0.5 {
        1.0
    } else if d < 0.75 {
        0.5 * (1.0 + (4.0 * PI * d).cos())
    } else {
        0.0
    }
}

/// Local Whittle objective over a fixed periodogram.
#[derive(Debug, Clone, PartialEq)]
pub struct LwObjective {
    log_freqs: Array1<f64>,
    log_ordinates: Array1<f64>,
    mean_log_freq: f64,
}

impl LwObjective {
    /// # Errors
    /// [`WhittleError::DegeneratePeriodogram`] if no ordinate is positive.
    pub fn new(periodogram: &Periodogram) -> WhittleResult<Self> {
        if !periodogram.ordinates.iter().any(|&v| v > 0.0) {
            return Err(WhittleError::DegeneratePeriodogram {
                reason: "No positive periodogram ordinate.",
            });
        }
        Ok(Self {
            log_freqs: periodogram.log_freqs.clone(),
            log_ordinates: periodogram.ordinates.mapv(safe_ln),
            mean_log_freq: mean_of(periodogram.log_freqs.view()),
        })
    }

    /// `R(d)`.
    ///
    /// # Errors
    /// [`WhittleError::NumericalOverflow`] if the log-sum is not finite.
    pub fn evaluate(&self, d: f64) -> WhittleResult<f64> {
        let terms = &self.log_freqs * (2.0 * d) + &self.log_ordinates;
        let log_mean = log_mean_exp(terms.view());
        if !log_mean.is_finite() {
            return Err(WhittleError::NumericalOverflow {
                d,
                reason: "Local Whittle log-mean is not finite.",
            });
        }
        Ok(log_mean - 2.0 * d * self.mean_log_freq)
    }

    pub fn log_freqs(&self) -> ArrayView1<'_, f64> {
        self.log_freqs.view()
    }
}

impl ScalarObjective for LwObjective {
    fn value(&self, d: f64) -> OptResult<Cost> {
        Ok(self.evaluate(d)?)
    }
}

/// Exact local Whittle objective for a series and mean-correction mode.
///
/// Owns the FFT state for both the fractional difference and the
/// periodogram, so an optimizer run reuses the plans across evaluations.
#[derive(Debug, Clone)]
pub struct ElwObjective {
    differ: FracDiffer,
    grid: FourierGrid,
    mean: MeanEstimation,
    sample_mean: f64,
    first: f64,
    mean_log_freq: f64,
}

impl ElwObjective {
    /// # Errors
    /// [`WhittleError::InvalidBandwidth`] for an invalid `m`.
    pub fn new(series: ArrayView1<f64>, m: usize, mean: MeanEstimation) -> WhittleResult<Self> {
        let grid = FourierGrid::new(series.len(), m, 1)?;
        let mean_log_freq = mean_of(grid.log_freqs().view());
        Ok(Self {
            differ: FracDiffer::new(series),
            grid,
            mean,
            sample_mean: mean_of(series),
            first: series.first().copied().unwrap_or(0.0),
            mean_log_freq,
        })
    }

    /// Mean used at `d`.
    pub fn mean_at(&self, d: f64) -> f64 {
        self.mean.estimate(d, self.sample_mean, self.first)
    }

    /// `R_ELW(d)`.
    ///
    /// # Errors
    /// [`WhittleError::NumericalOverflow`] if the periodogram of
    /// `Δ^d (x − μ̂)` vanishes or overflows.
    pub fn evaluate(&self, d: f64) -> WhittleResult<f64> {
        let filtered = self.differ.apply(d, self.mean_at(d));
        let ordinates = self.grid.ordinates(filtered.view(), None);
        let avg = mean_of(ordinates.view());
        if !(avg.is_finite() && avg > 0.0) {
            return Err(WhittleError::NumericalOverflow {
                d,
                reason: "Periodogram of the fractionally differenced series vanished or overflowed.",
            });
        }
        Ok(avg.ln() - 2.0 * d * self.mean_log_freq)
    }

    pub fn log_freqs(&self) -> Array1<f64> {
        self.grid.log_freqs()
    }
}

impl ScalarObjective for ElwObjective {
    fn value(&self, d: f64) -> OptResult<Cost> {
        Ok(self.evaluate(d)?)
    }
}

fn mean_of(values: ArrayView1<f64>) -> f64 {
    if values.is_empty() { 0.0 } else { values.sum() / values.len() as f64 }
}
