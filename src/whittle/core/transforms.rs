//! Series transforms: integer and fractional differencing, integration and
//! polynomial detrending.
//!
//! Purpose
//! -------
//! Collect the time-domain preprocessing used by the estimators: integer
//! differences for tapered LW, the type-II fractional difference for ELW,
//! and least-squares polynomial trends for two-step ELW.
//!
//! Key behaviors
//! -------------
//! - [`difference`] / [`integrate`] are exact inverses given the first level.
//! - [`FracDiffer`] caches the FFT of a series so `Δ^d (x − μ)` can be
//!   evaluated for many `d` at `O(n log n)` each.
//! - [`detrend`] fits `Σ_k β_k t^k`, `t = 1..n`, by SVD least squares;
//!   [`fractional_detrend`] fits the same trend after applying `Δ^d` to both
//!   sides.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated, finite series; outputs are new arrays.
//! - `Δ^d y_t = Σ_{k=0}^{t−1} π_k(d) y_{t−k}` with `π_0 = 1`,
//!   `π_k = π_{k−1} (k − 1 − d) / k`; pre-sample values are zero.
//! - The trend design uses `t / n` internally; reported coefficients are on
//!   the original `t` scale.
//!
//! Testing notes
//! -------------
//! - Unit tests check the difference/integration round trip, agreement of
//!   the FFT fractional difference with direct convolution, the integer-`d`
//!   special cases, and exact recovery of polynomial trends.
use crate::whittle::errors::{WhittleError, WhittleResult};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Singular values below this fraction are treated as zero in least squares.
const SVD_EPS: f64 = 1e-12;

/// Apply `order` first differences. The result has `len − order` entries
/// (empty if `order ≥ len`).
pub fn difference(series: ArrayView1<f64>, order: usize) -> Array1<f64> {
    let mut out = series.to_owned();
    for _ in 0..order {
        if out.len() < 2 {
            return Array1::zeros(0);
        }
        out = Array1::from_iter(out.windows(2).into_iter().map(|w| w[1] - w[0]));
    }
    out
}

/// Running sum `s_t = Σ_{k ≤ t} x_k`.
pub fn cumsum(series: ArrayView1<f64>) -> Array1<f64> {
    let mut acc = 0.0;
    series
        .iter()
        .map(|&v| {
            acc += v;
            acc
        })
        .collect()
}

/// Undo one first difference: `[first, first + cumsum(diffs)]`.
pub fn integrate(diffs: ArrayView1<f64>, first: f64) -> Array1<f64> {
    std::iter::once(first).chain(cumsum(diffs).iter().map(|&s| first + s)).collect()
}

/// Coefficients `π_0..π_{n−1}` of the type-II fractional difference `Δ^d`.
pub fn fracdiff_coefficients(d: f64, n: usize) -> Array1<f64> {
    let mut coefs = Array1::zeros(n);
    if n == 0 {
        return coefs;
    }
    coefs[0] = 1.0;
    for k in 1..n {
        coefs[k] = coefs[k - 1] * ((k as f64) - 1.0 - d) / (k as f64);
    }
    coefs
}

/// Fractional difference `Δ^d x` of a series (zero pre-sample values).
pub fn fracdiff(series: ArrayView1<f64>, d: f64) -> Array1<f64> {
    FracDiffer::new(series).apply(d, 0.0)
}

/// Cached FFT convolution engine for `Δ^d (x − μ)`.
///
/// Holds the forward/inverse plans and the spectrum of the zero-padded
/// series. `apply` is `&self`, so one instance serves a whole optimizer run.
#[derive(Clone)]
pub struct FracDiffer {
    n: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    spectrum: Vec<Complex64>,
}

impl std::fmt::Debug for FracDiffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FracDiffer")
            .field("n", &self.n)
            .field("fft_len", &self.spectrum.len())
            .finish()
    }
}

impl FracDiffer {
    /// Plan a linear convolution of length `2n` (rounded up to a power of
    /// two) and transform the series once.
    pub fn new(series: ArrayView1<f64>) -> Self {
        let n = series.len();
        let fft_len = (2 * n).max(1).next_power_of_two();
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(fft_len);
        let inverse = planner.plan_fft_inverse(fft_len);

        let mut spectrum = vec![Complex64::new(0.0, 0.0); fft_len];
        for (slot, &v) in spectrum.iter_mut().zip(series.iter()) {
            *slot = Complex64::new(v, 0.0);
        }
        forward.process(&mut spectrum);
        Self { n, forward, inverse, spectrum }
    }

    /// Length of the underlying series.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// `Δ^d (x − μ) = Δ^d x − μ · Σ_{k<t} π_k`.
    pub fn apply(&self, d: f64, mean: f64) -> Array1<f64> {
        let coefs = fracdiff_coefficients(d, self.n);
        let fft_len = self.spectrum.len();
        let mut buf = vec![Complex64::new(0.0, 0.0); fft_len];
        for (slot, &c) in buf.iter_mut().zip(coefs.iter()) {
            *slot = Complex64::new(c, 0.0);
        }
        self.forward.process(&mut buf);
        for (b, s) in buf.iter_mut().zip(self.spectrum.iter()) {
            *b *= *s;
        }
        self.inverse.process(&mut buf);

        // rustfft leaves the inverse unnormalized.
        let scale = 1.0 / fft_len as f64;
        let mut partial = 0.0;
        Array1::from_iter(buf.iter().take(self.n).zip(coefs.iter()).map(|(b, &c)| {
            partial += c;
            b.re * scale - mean * partial
        }))
    }
}

/// Least-squares polynomial trend and its residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialTrend {
    /// Polynomial order (0 = constant).
    pub order: usize,
    /// `β_0..β_order` on the `t = 1..n` scale.
    pub coefficients: Vec<f64>,
    /// `x_t − Σ_k β_k t^k`.
    pub residuals: Array1<f64>,
}

/// Design matrix with columns `(t / n)^k`, `t = 1..n`, `k = 0..=order`.
pub fn polynomial_design(n: usize, order: usize) -> DMatrix<f64> {
    let mut design = DMatrix::zeros(n, order + 1);
    for row in 0..n {
        let t = (row + 1) as f64 / n as f64;
        let mut power = 1.0;
        for k in 0..=order {
            design[(row, k)] = power;
            power *= t;
        }
    }
    design
}

/// Solve `min ‖Xβ − y‖²` through the thin SVD.
///
/// # Errors
/// [`WhittleError::LeastSquaresFailed`] if the SVD cannot be solved.
pub fn least_squares(
    design: &DMatrix<f64>, response: &DVector<f64>,
) -> WhittleResult<DVector<f64>> {
    design
        .clone()
        .svd(true, true)
        .solve(response, SVD_EPS)
        .map_err(|reason| WhittleError::LeastSquaresFailed { reason })
}

/// Fit and remove a polynomial trend of the given order.
///
/// # Errors
/// - [`WhittleError::InvalidTrendOrder`] if fewer than `order + 2`
///   observations are available.
/// - [`WhittleError::LeastSquaresFailed`] from the solver.
pub fn detrend(series: ArrayView1<f64>, order: usize) -> WhittleResult<PolynomialTrend> {
    let n = series.len();
    verify_trend_order(n, order)?;
    let design = polynomial_design(n, order);
    let response = DVector::from_iterator(n, series.iter().copied());
    let beta = least_squares(&design, &response)?;
    Ok(trend_from_scaled(series, &design, &beta, order))
}

/// Fit the trend of order `order` by regressing `Δ^d x` on `Δ^d X`, then
/// remove it from `x` in levels.
///
/// # Errors
/// As for [`detrend`].
pub fn fractional_detrend(
    series: ArrayView1<f64>, order: usize, d: f64,
) -> WhittleResult<PolynomialTrend> {
    let n = series.len();
    verify_trend_order(n, order)?;
    let design = polynomial_design(n, order);
    let mut filtered_design = DMatrix::zeros(n, order + 1);
    for k in 0..=order {
        let column = Array1::from_iter(design.column(k).iter().copied());
        let filtered = fracdiff(column.view(), d);
        for (row, &v) in filtered.iter().enumerate() {
            filtered_design[(row, k)] = v;
        }
    }
    let filtered_response = fracdiff(series, d);
    let response = DVector::from_iterator(n, filtered_response.iter().copied());
    let beta = least_squares(&filtered_design, &response)?;
    Ok(trend_from_scaled(series, &design, &beta, order))
}

fn verify_trend_order(n: usize, order: usize) -> WhittleResult<()> {
    if n < order + 2 {
        return Err(WhittleError::InvalidTrendOrder {
            order,
            reason: "Trend order must leave at least one residual degree of freedom.",
        });
    }
    Ok(())
}

fn trend_from_scaled(
    series: ArrayView1<f64>, design: &DMatrix<f64>, beta: &DVector<f64>, order: usize,
) -> PolynomialTrend {
    let n = series.len() as f64;
    let fitted = design * beta;
    let residuals = Array1::from_iter(series.iter().zip(fitted.iter()).map(|(&x, &f)| x - f));
    let coefficients = beta.iter().enumerate().map(|(k, &b)| b / n.powi(k as i32)).collect();
    PolynomialTrend { order, coefficients, residuals }
}
