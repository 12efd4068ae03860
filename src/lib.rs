//! rust_elw — local Whittle estimation of the memory parameter `d` with
//! Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Whittle estimators to Python via the `_rust_elw` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing classes used by the `rust_elw` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`whittle`, `optimization`,
//!   `inference`) as the public crate surface.
//! - Define `#[pyclass]` wrappers (`LW`, `ELW`, `TwoStepELW`) and the
//!   `#[pymodule]` initializer for the `_rust_elw` Python extension.
//! - Register the `whittle` submodule under `rust_elw` so dotted imports
//!   work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, argument conversion, and error mapping.
//! - Python classes mirror the stateless/stateful duality of
//!   [`WhittleEstimator`]: `estimate` never mutates, `fit` stores the same
//!   record `estimate` would return. Both take per-call keyword overrides
//!   laid over the constructor's options.
//!
//! Conventions
//! -----------
//! - Results cross the boundary as plain `dict`s with the keys `n`, `m`,
//!   `d_hat`, `se`, `ase`, `objective`, `nfev`, `converged` plus
//!   estimator-specific extras (`mean`, `trend_coefficients`,
//!   `d_first_stage`, ...) and `timing = {"total": seconds}`.
//! - Errors from core Rust code are converted to `ValueError`/`TypeError`
//!   at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`whittle`] and can ignore
//!   the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the integration tests under `tests/`.
//!
//! [`WhittleEstimator`]: crate::whittle::models::WhittleEstimator

pub mod inference;
pub mod optimization;
pub mod whittle;

#[cfg(feature = "python-bindings")]
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    utils::{
        estimate_to_dict, extract_bounds, extract_diff, extract_mean, extract_optimizer,
        extract_series, extract_taper, merge_elw_options, merge_lw_options,
        merge_two_step_options, pick_alias,
    },
    whittle::{
        core::options::{
            ELW_DEFAULT_BOUNDS, ElwOptions, LW_DEFAULT_BOUNDS, LwOptions, TwoStepOptions,
        },
        models::{
            elw::ExactLocalWhittle, estimator::WhittleEstimator, lw::LocalWhittle,
            two_step::TwoStepElw,
        },
    },
};

/// LW — Python-facing wrapper for the (tapered) local Whittle estimator.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `LW(bounds=(-0.5, 2.0), taper="none", diff=None, solver="brent",
/// xatol=None, max_iter=None, grid_points=None, verbose=False)`:
/// - `taper`: `"none"`, `"bartlett"` or `"hc"`.
/// - `diff`: differencing order; defaults to the taper's own (1 for `"hc"`).
///   Negative values raise `ValueError`.
///
/// `estimate` and `fit` accept `bounds`, `taper`, `diff` and `verbose` as
/// per-call overrides.
///
/// Notes
/// -----
/// - Native Rust callers should use [`LocalWhittle`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_elw.whittle", name = "LW")]
pub struct PyLocalWhittle {
    inner: LocalWhittle,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyLocalWhittle {
    #[new]
    #[pyo3(
        signature = (
            bounds = None,
            taper = None,
            diff = None,
            solver = None,
            xatol = None,
            max_iter = None,
            grid_points = None,
            verbose = false,
        ),
        text_signature = "(bounds=None, taper=None, diff=None, solver=None, xatol=None, \
                          max_iter=None, grid_points=None, verbose=False)"
    )]
    pub fn new(
        bounds: Option<(f64, f64)>, taper: Option<&str>, diff: Option<i64>, solver: Option<&str>,
        xatol: Option<f64>, max_iter: Option<usize>, grid_points: Option<usize>, verbose: bool,
    ) -> PyResult<Self> {
        let options = LwOptions::new(
            extract_bounds(bounds, LW_DEFAULT_BOUNDS)?,
            extract_taper(taper)?,
            extract_diff(diff)?,
            extract_optimizer(solver, xatol, max_iter, grid_points, false)?,
            verbose,
        );
        Ok(Self { inner: LocalWhittle::new(options) })
    }

    /// Estimate `d` without storing the result.
    ///
    /// Keyword arguments other than `m` override the constructor's options
    /// for this call only.
    #[pyo3(
        signature = (x, m = None, bounds = None, taper = None, diff = None, verbose = None),
        text_signature = "(x, m=None, bounds=None, taper=None, diff=None, verbose=None)"
    )]
    pub fn estimate<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, m: Option<usize>,
        bounds: Option<(f64, f64)>,
        taper: Option<&str>, diff: Option<i64>, verbose: Option<bool>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let series = extract_series(py, x)?;
        let options = merge_lw_options(&self.inner.options, bounds, taper, diff, verbose)?;
        let (estimate, elapsed) = self.inner.estimate_timed_with(series.view(), m, &options)?;
        estimate_to_dict(py, &estimate, elapsed)
    }

    /// Estimate `d` and keep the result for the getters.
    ///
    /// Accepts the same per-call overrides as `estimate`; the stored record
    /// is the one `estimate` returns for the same arguments.
    #[pyo3(
        signature = (x, m = None, bounds = None, taper = None, diff = None, verbose = None),
        text_signature = "(x, m=None, bounds=None, taper=None, diff=None, verbose=None)"
    )]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, x: &Bound<'py, PyAny>, m: Option<usize>,
        bounds: Option<(f64, f64)>,
        taper: Option<&str>, diff: Option<i64>, verbose: Option<bool>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let series = extract_series(py, x)?;
        let options = merge_lw_options(&self.inner.options, bounds, taper, diff, verbose)?;
        let (estimate, elapsed) = self.inner.estimate_timed_with(series.view(), m, &options)?;
        estimate_to_dict(py, self.inner.store(estimate), elapsed)
    }

    #[pyo3(signature = (level = 0.95))]
    pub fn confidence_interval(&self, level: f64) -> PyResult<(f64, f64)> {
        Ok(self.inner.results()?.confidence_interval(level)?)
    }

    #[getter]
    pub fn n(&self) -> PyResult<usize> {
        Ok(self.inner.n()?)
    }

    #[getter]
    pub fn m(&self) -> PyResult<usize> {
        Ok(self.inner.m()?)
    }

    #[getter]
    pub fn d_hat(&self) -> PyResult<f64> {
        Ok(self.inner.d_hat()?)
    }

    #[getter]
    pub fn se(&self) -> PyResult<f64> {
        Ok(self.inner.se()?)
    }

    #[getter]
    pub fn ase(&self) -> PyResult<f64> {
        Ok(self.inner.ase()?)
    }

    #[getter]
    pub fn objective(&self) -> PyResult<f64> {
        Ok(self.inner.objective()?)
    }

    #[getter]
    pub fn nfev(&self) -> PyResult<usize> {
        Ok(self.inner.nfev()?)
    }
}

/// ELW — Python-facing wrapper for the exact local Whittle estimator.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `ELW(bounds=(-1.0, 3.0), mean_est="mean", solver="brent", xatol=None,
/// max_iter=None, grid_points=None, verbose=False)`:
/// - `mean_est` (alias `mean`): `"none"`, `"mean"`, `"init"`, `"weighted"`,
///   or a float used as a known mean.
///
/// `estimate` and `fit` accept `bounds`, `mean_est` and `verbose` as
/// per-call overrides.
///
/// Notes
/// -----
/// - Native Rust callers should use [`ExactLocalWhittle`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_elw.whittle", name = "ELW")]
pub struct PyExactLocalWhittle {
    inner: ExactLocalWhittle,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyExactLocalWhittle {
    #[new]
    #[pyo3(
        signature = (
            bounds = None,
            mean_est = None,
            mean = None,
            solver = None,
            xatol = None,
            max_iter = None,
            grid_points = None,
            verbose = false,
        ),
        text_signature = "(bounds=None, mean_est=None, mean=None, solver=None, xatol=None, \
                          max_iter=None, grid_points=None, verbose=False)"
    )]
    pub fn new<'py>(
        bounds: Option<(f64, f64)>, mean_est: Option<&Bound<'py, PyAny>>,
        mean: Option<&Bound<'py, PyAny>>, solver: Option<&str>, xatol: Option<f64>,
        max_iter: Option<usize>, grid_points: Option<usize>, verbose: bool,
    ) -> PyResult<Self> {
        let mean = extract_mean(pick_alias("mean_est", mean_est, "mean", mean)?)?;
        let options = ElwOptions::new(
            extract_bounds(bounds, ELW_DEFAULT_BOUNDS)?,
            mean.unwrap_or_default(),
            extract_optimizer(solver, xatol, max_iter, grid_points, false)?,
            verbose,
        )?;
        Ok(Self { inner: ExactLocalWhittle::new(options) })
    }

    /// Estimate `d` without storing the result.
    ///
    /// Keyword arguments other than `m` override the constructor's options
    /// for this call only.
    #[pyo3(
        signature = (x, m = None, bounds = None, mean_est = None, mean = None, verbose = None),
        text_signature = "(x, m=None, bounds=None, mean_est=None, mean=None, verbose=None)"
    )]
    pub fn estimate<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, m: Option<usize>,
        bounds: Option<(f64, f64)>,
        mean_est: Option<&Bound<'py, PyAny>>, mean: Option<&Bound<'py, PyAny>>,
        verbose: Option<bool>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let series = extract_series(py, x)?;
        let options = merge_elw_options(
            &self.inner.options,
            bounds,
            extract_mean(pick_alias("mean_est", mean_est, "mean", mean)?)?,
            verbose,
        )?;
        let (estimate, elapsed) = self.inner.estimate_timed_with(series.view(), m, &options)?;
        estimate_to_dict(py, &estimate, elapsed)
    }

    /// Estimate `d` and keep the result for the getters.
    ///
    /// Accepts the same per-call overrides as `estimate`; the stored record
    /// is the one `estimate` returns for the same arguments.
    #[pyo3(
        signature = (x, m = None, bounds = None, mean_est = None, mean = None, verbose = None),
        text_signature = "(x, m=None, bounds=None, mean_est=None, mean=None, verbose=None)"
    )]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, x: &Bound<'py, PyAny>, m: Option<usize>,
        bounds: Option<(f64, f64)>,
        mean_est: Option<&Bound<'py, PyAny>>, mean: Option<&Bound<'py, PyAny>>,
        verbose: Option<bool>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let series = extract_series(py, x)?;
        let options = merge_elw_options(
            &self.inner.options,
            bounds,
            extract_mean(pick_alias("mean_est", mean_est, "mean", mean)?)?,
            verbose,
        )?;
        let (estimate, elapsed) = self.inner.estimate_timed_with(series.view(), m, &options)?;
        estimate_to_dict(py, self.inner.store(estimate), elapsed)
    }

    #[pyo3(signature = (level = 0.95))]
    pub fn confidence_interval(&self, level: f64) -> PyResult<(f64, f64)> {
        Ok(self.inner.results()?.confidence_interval(level)?)
    }

    #[getter]
    pub fn n(&self) -> PyResult<usize> {
        Ok(self.inner.n()?)
    }

    #[getter]
    pub fn m(&self) -> PyResult<usize> {
        Ok(self.inner.m()?)
    }

    #[getter]
    pub fn d_hat(&self) -> PyResult<f64> {
        Ok(self.inner.d_hat()?)
    }

    #[getter]
    pub fn se(&self) -> PyResult<f64> {
        Ok(self.inner.se()?)
    }

    #[getter]
    pub fn ase(&self) -> PyResult<f64> {
        Ok(self.inner.ase()?)
    }

    #[getter]
    pub fn objective(&self) -> PyResult<f64> {
        Ok(self.inner.objective()?)
    }

    #[getter]
    pub fn nfev(&self) -> PyResult<usize> {
        Ok(self.inner.nfev()?)
    }

    /// Mean correction at `d_hat` from the last fit.
    #[getter]
    pub fn mean(&self) -> PyResult<Option<f64>> {
        Ok(self.inner.results()?.mean)
    }
}

/// TwoStepELW — Python-facing wrapper for the two-step ELW estimator.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `TwoStepELW(bounds=(-1.0, 3.0), trend_order=1, max_trend_iter=1,
/// trend_tol=1e-4, solver="brent", xatol=None, max_iter=None,
/// grid_points=None, verbose=False)`; `detrend_order` is an alias of
/// `trend_order`.
///
/// `estimate` and `fit` accept `bounds`, `trend_order` / `detrend_order`,
/// `max_trend_iter`, `trend_tol` and `verbose` as per-call overrides.
///
/// Notes
/// -----
/// - Native Rust callers should use [`TwoStepElw`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_elw.whittle", name = "TwoStepELW")]
pub struct PyTwoStepElw {
    inner: TwoStepElw,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyTwoStepElw {
    #[new]
    #[pyo3(
        signature = (
            bounds = None,
            trend_order = None,
            detrend_order = None,
            max_trend_iter = 1,
            trend_tol = 1e-4,
            solver = None,
            xatol = None,
            max_iter = None,
            grid_points = None,
            verbose = false,
        ),
        text_signature = "(bounds=None, trend_order=1, detrend_order=None, max_trend_iter=1, \
                          trend_tol=1e-4, solver=None, xatol=None, max_iter=None, \
                          grid_points=None, verbose=False)"
    )]
    pub fn new(
        bounds: Option<(f64, f64)>, trend_order: Option<usize>, detrend_order: Option<usize>,
        max_trend_iter: usize, trend_tol: f64, solver: Option<&str>, xatol: Option<f64>,
        max_iter: Option<usize>, grid_points: Option<usize>, verbose: bool,
    ) -> PyResult<Self> {
        let trend_order = pick_alias("trend_order", trend_order, "detrend_order", detrend_order)?;
        let options = TwoStepOptions::new(
            extract_bounds(bounds, ELW_DEFAULT_BOUNDS)?,
            trend_order.unwrap_or(TwoStepOptions::default().trend_order),
            max_trend_iter,
            trend_tol,
            extract_optimizer(solver, xatol, max_iter, grid_points, false)?,
            verbose,
        )?;
        Ok(Self { inner: TwoStepElw::new(options) })
    }

    /// Estimate `d` without storing the result.
    ///
    /// Keyword arguments other than `m` override the constructor's options
    /// for this call only.
    #[pyo3(
        signature = (
            x,
            m = None,
            bounds = None,
            trend_order = None,
            detrend_order = None,
            max_trend_iter = None,
            trend_tol = None,
            verbose = None,
        ),
        text_signature = "(x, m=None, bounds=None, trend_order=None, detrend_order=None, \
                          max_trend_iter=None, trend_tol=None, verbose=None)"
    )]
    pub fn estimate<'py>(
        &self, py: Python<'py>, x: &Bound<'py, PyAny>, m: Option<usize>,
        bounds: Option<(f64, f64)>,
        trend_order: Option<usize>, detrend_order: Option<usize>, max_trend_iter: Option<usize>,
        trend_tol: Option<f64>, verbose: Option<bool>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let series = extract_series(py, x)?;
        let options = merge_two_step_options(
            &self.inner.options,
            bounds,
            pick_alias("trend_order", trend_order, "detrend_order", detrend_order)?,
            max_trend_iter,
            trend_tol,
            verbose,
        )?;
        let (estimate, elapsed) = self.inner.estimate_timed_with(series.view(), m, &options)?;
        estimate_to_dict(py, &estimate, elapsed)
    }

    /// Estimate `d` and keep the result for the getters.
    ///
    /// Accepts the same per-call overrides as `estimate`; the stored record
    /// is the one `estimate` returns for the same arguments.
    #[pyo3(
        signature = (
            x,
            m = None,
            bounds = None,
            trend_order = None,
            detrend_order = None,
            max_trend_iter = None,
            trend_tol = None,
            verbose = None,
        ),
        text_signature = "(x, m=None, bounds=None, trend_order=None, detrend_order=None, \
                          max_trend_iter=None, trend_tol=None, verbose=None)"
    )]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, x: &Bound<'py, PyAny>, m: Option<usize>,
        bounds: Option<(f64, f64)>,
        trend_order: Option<usize>, detrend_order: Option<usize>, max_trend_iter: Option<usize>,
        trend_tol: Option<f64>, verbose: Option<bool>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let series = extract_series(py, x)?;
        let options = merge_two_step_options(
            &self.inner.options,
            bounds,
            pick_alias("trend_order", trend_order, "detrend_order", detrend_order)?,
            max_trend_iter,
            trend_tol,
            verbose,
        )?;
        let (estimate, elapsed) = self.inner.estimate_timed_with(series.view(), m, &options)?;
        estimate_to_dict(py, self.inner.store(estimate), elapsed)
    }

    #[pyo3(signature = (level = 0.95))]
    pub fn confidence_interval(&self, level: f64) -> PyResult<(f64, f64)> {
        Ok(self.inner.results()?.confidence_interval(level)?)
    }

    #[getter]
    pub fn n(&self) -> PyResult<usize> {
        Ok(self.inner.n()?)
    }

    #[getter]
    pub fn m(&self) -> PyResult<usize> {
        Ok(self.inner.m()?)
    }

    #[getter]
    pub fn d_hat(&self) -> PyResult<f64> {
        Ok(self.inner.d_hat()?)
    }

    #[getter]
    pub fn se(&self) -> PyResult<f64> {
        Ok(self.inner.se()?)
    }

    #[getter]
    pub fn ase(&self) -> PyResult<f64> {
        Ok(self.inner.ase()?)
    }

    #[getter]
    pub fn objective(&self) -> PyResult<f64> {
        Ok(self.inner.objective()?)
    }

    #[getter]
    pub fn nfev(&self) -> PyResult<usize> {
        Ok(self.inner.nfev()?)
    }

    /// First-stage (tapered LW) estimate from the last fit.
    #[getter]
    pub fn d_first_stage(&self) -> PyResult<Option<f64>> {
        Ok(self.inner.results()?.trend.as_ref().map(|t| t.d_first_stage))
    }
}

/// _rust_elw — PyO3 module initializer for the Python extension.
///
/// Creates the `whittle` submodule, attaches it to `_rust_elw` and
/// registers it in `sys.modules` as `rust_elw.whittle` so dotted imports
/// resolve.
///
/// # Errors
/// `PyErr` if creating the submodule or touching `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_elw<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let whittle_mod = PyModule::new(_py, "whittle")?;
    whittle_models(_py, m, &whittle_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_elw.whittle", whittle_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn whittle_models<'py>(
    _py: Python, rust_elw: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyLocalWhittle>()?;
    m.add_class::<PyExactLocalWhittle>()?;
    m.add_class::<PyTwoStepElw>()?;
    rust_elw.add_submodule(m)?;
    Ok(())
}
