//! Conversion helpers for the PyO3 layer: Python arguments in, estimator
//! options and result dictionaries out.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::scalar_optimizer::{Bounds, OptimizerOptions, ScalarSolver, Tolerances},
    whittle::{
        core::{
            objective::MeanEstimation, options::LwOptions, results::WhittleEstimate, taper::Taper,
        },
        errors::WhittleError,
    },
};

#[cfg(feature = "python-bindings")]
use crate::whittle::core::options::{ElwOptions, TwoStepOptions};

#[cfg(feature = "python-bindings")]
use std::time::Duration;

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a Python 1-D array-like into an owned series.
#[cfg(feature = "python-bindings")]
pub fn extract_series<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err("x must be a 1-D contiguous float64 array or sequence")
    })?;
    Ok(Array1::from(slice.to_vec()))
}

#[cfg(feature = "python-bindings")]
pub fn extract_bounds(bounds: Option<(f64, f64)>, default: Bounds) -> PyResult<Bounds> {
    match bounds {
        Some((lower, upper)) => Ok(Bounds::new(lower, upper)?),
        None => Ok(default),
    }
}

#[cfg(feature = "python-bindings")]
pub fn extract_taper(taper: Option<&str>) -> PyResult<Taper> {
    match taper {
        Some(name) => Ok(name.parse::<Taper>()?),
        None => Ok(Taper::None),
    }
}

#[cfg(feature = "python-bindings")]
pub fn extract_diff(diff: Option<i64>) -> PyResult<Option<usize>> {
    diff.map(LwOptions::checked_diff).transpose().map_err(PyErr::from)
}

/// Resolve a keyword that has an alias; giving both is an error.
#[cfg(feature = "python-bindings")]
pub fn pick_alias<T>(
    name: &str, value: Option<T>, alias: &str, alias_value: Option<T>,
) -> PyResult<Option<T>> {
    match (value, alias_value) {
        (Some(_), Some(_)) => Err(PyValueError::new_err(format!(
            "pass either {name:?} or its alias {alias:?}, not both"
        ))),
        (value, alias_value) => Ok(value.or(alias_value)),
    }
}

/// Accept a mode name (`"mean"`, `"weighted"`, ...) or a number; `None`
/// when not given.
#[cfg(feature = "python-bindings")]
pub fn extract_mean(mean: Option<&Bound<'_, PyAny>>) -> PyResult<Option<MeanEstimation>> {
    let Some(obj) = mean else {
        return Ok(None);
    };
    if let Ok(name) = obj.extract::<String>() {
        return Ok(Some(name.parse::<MeanEstimation>()?));
    }
    match obj.extract::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(MeanEstimation::Given(value))),
        Ok(value) => Err(WhittleError::InvalidMean { value }.into()),
        Err(_) => Err(PyTypeError::new_err("mean_est must be a string or a float")),
    }
}

/// Stored LW options with the given per-call values laid over them.
///
/// A new `taper` without an explicit `diff` falls back to the stored
/// `diff`, which itself defaults to the taper's own order.
#[cfg(feature = "python-bindings")]
pub fn merge_lw_options(
    base: &LwOptions, bounds: Option<(f64, f64)>, taper: Option<&str>, diff: Option<i64>,
    verbose: Option<bool>,
) -> PyResult<LwOptions> {
    let mut options = base.clone();
    if let Some((lower, upper)) = bounds {
        options.bounds = Bounds::new(lower, upper)?;
    }
    if let Some(name) = taper {
        options.taper = name.parse::<Taper>()?;
    }
    if let Some(order) = extract_diff(diff)? {
        options.diff = Some(order);
    }
    if let Some(flag) = verbose {
        options.verbose = flag;
    }
    Ok(options)
}

#[cfg(feature = "python-bindings")]
pub fn merge_elw_options(
    base: &ElwOptions, bounds: Option<(f64, f64)>, mean: Option<MeanEstimation>,
    verbose: Option<bool>,
) -> PyResult<ElwOptions> {
    let bounds = match bounds {
        Some((lower, upper)) => Bounds::new(lower, upper)?,
        None => base.bounds,
    };
    Ok(ElwOptions::new(
        bounds,
        mean.unwrap_or(base.mean),
        base.optimizer.clone(),
        verbose.unwrap_or(base.verbose),
    )?)
}

#[cfg(feature = "python-bindings")]
pub fn merge_two_step_options(
    base: &TwoStepOptions, bounds: Option<(f64, f64)>, trend_order: Option<usize>,
    max_trend_iter: Option<usize>, trend_tol: Option<f64>, verbose: Option<bool>,
) -> PyResult<TwoStepOptions> {
    let bounds = match bounds {
        Some((lower, upper)) => Bounds::new(lower, upper)?,
        None => base.bounds,
    };
    Ok(TwoStepOptions::new(
        bounds,
        trend_order.unwrap_or(base.trend_order),
        max_trend_iter.unwrap_or(base.max_trend_iter),
        trend_tol.unwrap_or(base.trend_tol),
        base.optimizer.clone(),
        verbose.unwrap_or(base.verbose),
    )?)
}

#[cfg(feature = "python-bindings")]
pub fn extract_optimizer(
    solver: Option<&str>, xatol: Option<f64>, max_iter: Option<usize>, grid_points: Option<usize>,
    verbose: bool,
) -> PyResult<OptimizerOptions> {
    let solver = match solver {
        Some(name) => name.parse::<ScalarSolver>()?,
        None => ScalarSolver::Brent,
    };
    let defaults = Tolerances::default();
    let tols =
        Tolerances::new(xatol.unwrap_or(defaults.xatol), max_iter.unwrap_or(defaults.max_iter))?;
    Ok(OptimizerOptions::new(solver, tols, grid_points, verbose)?)
}

/// Flatten an estimate into a Python dict.
#[cfg(feature = "python-bindings")]
pub fn estimate_to_dict<'py>(
    py: Python<'py>, estimate: &WhittleEstimate, elapsed: Duration,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    let timing = PyDict::new(py);
    timing.set_item("total", elapsed.as_secs_f64())?;
    dict.set_item("method", estimate.method.name())?;
    dict.set_item("n", estimate.n)?;
    dict.set_item("m", estimate.m)?;
    dict.set_item("d_hat", estimate.d_hat)?;
    dict.set_item("se", estimate.se)?;
    dict.set_item("ase", estimate.ase)?;
    dict.set_item("objective", estimate.objective)?;
    dict.set_item("nfev", estimate.nfev)?;
    dict.set_item("converged", estimate.converged)?;
    dict.set_item("status", estimate.status.as_str())?;
    dict.set_item("taper", estimate.taper.name())?;
    dict.set_item("diff", estimate.diff)?;
    if let Some(mean) = estimate.mean {
        dict.set_item("mean", mean)?;
    }
    if let Some(trend) = &estimate.trend {
        dict.set_item("trend_order", trend.order)?;
        dict.set_item("trend_coefficients", trend.coefficients.clone())?;
        dict.set_item("d_first_stage", trend.d_first_stage)?;
        dict.set_item("trend_iterations", trend.iterations)?;
        dict.set_item("trend_converged", trend.converged)?;
    }
    dict.set_item("timing", timing)?;
    Ok(dict)
}
