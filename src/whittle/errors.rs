//! Errors for Whittle-type memory estimation (data validation, configuration
//! checks, numerical degeneracy, and wrapped optimizer/inference failures).
//!
//! This module defines [`WhittleError`], used across the Rust core and the
//! Python-facing API. It implements `Display`/`Error` and converts to `PyErr`
//! for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Configuration errors (bandwidth, bounds, taper and mean names,
//!   differencing and trend orders) are raised before any computation and
//!   are never silently clamped.
//! - Numerical degeneracy (e.g. a constant series) is an error, not a NaN.
//! - Optimizer non-convergence is *not* an error; it is a flag on the
//!   estimate.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{inference::errors::InferenceError, optimization::errors::OptError};

/// Crate-wide result alias for estimation operations.
pub type WhittleResult<T> = Result<T, WhittleError>;

/// Unified error type for Whittle estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum WhittleError {
    // ---- Input/data validation ----
    /// Series is shorter than the minimum usable length.
    InsufficientData { len: usize, min: usize },

    /// A data point is NaN/±inf.
    InvalidData { index: usize, value: f64 },

    // ---- Configuration ----
    /// Bandwidth must satisfy `1 ≤ m` and `2m < n`.
    InvalidBandwidth { m: usize, n: usize, reason: &'static str },

    /// Bounds must be finite with `lower < upper`.
    InvalidBounds { lower: f64, upper: f64, reason: &'static str },

    /// Unknown taper name.
    UnknownTaper { name: String },

    /// Unknown mean-estimation mode.
    UnknownMeanEstimation { name: String },

    /// Differencing order is negative or leaves too few observations.
    InvalidDiffOrder { diff: i64, reason: &'static str },

    /// Trend order leaves too few degrees of freedom.
    InvalidTrendOrder { order: usize, reason: &'static str },

    /// A caller-supplied mean must be finite.
    InvalidMean { value: f64 },

    /// Trend iteration settings must be positive and finite.
    InvalidTrendIteration { reason: &'static str },

    // ---- Numerical ----
    /// Periodogram carries no information (e.g. constant input).
    DegeneratePeriodogram { reason: &'static str },

    /// Objective evaluation overflowed at `d`.
    NumericalOverflow { d: f64, reason: &'static str },

    /// Least-squares trend fit failed.
    LeastSquaresFailed { reason: &'static str },

    // ---- Estimation ----
    /// Estimator hasn't been fitted yet.
    ModelNotFitted,

    /// Wrapped optimizer error.
    Optimization(OptError),

    /// Wrapped inference error.
    Inference(InferenceError),
}

impl std::error::Error for WhittleError {}

impl std::fmt::Display for WhittleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            WhittleError::InsufficientData { len, min } => {
                write!(f, "Series has {len} usable observations; at least {min} are required")
            }
            WhittleError::InvalidData { index, value } => {
                write!(f, "Data point at index {index} must be finite, got {value}")
            }

            // ---- Configuration ----
            WhittleError::InvalidBandwidth { m, n, reason } => {
                write!(f, "Invalid bandwidth m = {m} for n = {n}: {reason}")
            }
            WhittleError::InvalidBounds { lower, upper, reason } => {
                write!(f, "Invalid bounds ({lower}, {upper}): {reason}")
            }
            WhittleError::UnknownTaper { name } => write!(
                f,
                "Unknown taper '{name}'. Valid options are case insensitive 'none', 'bartlett' or 'hc'."
            ),
            WhittleError::UnknownMeanEstimation { name } => write!(
                f,
                "Unknown mean estimation '{name}'. Valid options are case insensitive 'none', 'mean', 'init' or 'weighted'."
            ),
            WhittleError::InvalidDiffOrder { diff, reason } => {
                write!(f, "Invalid differencing order {diff}: {reason}")
            }
            WhittleError::InvalidTrendOrder { order, reason } => {
                write!(f, "Invalid trend order {order}: {reason}")
            }
            WhittleError::InvalidMean { value } => {
                write!(f, "Given mean must be finite, got {value}")
            }
            WhittleError::InvalidTrendIteration { reason } => {
                write!(f, "Invalid trend iteration settings: {reason}")
            }

            // ---- Numerical ----
            WhittleError::DegeneratePeriodogram { reason } => {
                write!(f, "Degenerate periodogram: {reason}")
            }
            WhittleError::NumericalOverflow { d, reason } => {
                write!(f, "Numerical overflow at d = {d}: {reason}")
            }
            WhittleError::LeastSquaresFailed { reason } => {
                write!(f, "Least-squares trend fit failed: {reason}")
            }

            // ---- Estimation ----
            WhittleError::ModelNotFitted => write!(f, "Estimator has not been fitted yet."),
            WhittleError::Optimization(err) => write!(f, "Optimization failed: {err}"),
            WhittleError::Inference(err) => write!(f, "{err}"),
        }
    }
}

impl From<OptError> for WhittleError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::InvalidBounds { lower, upper, reason } => {
                WhittleError::InvalidBounds { lower, upper, reason }
            }
            other => WhittleError::Optimization(other),
        }
    }
}

impl From<InferenceError> for WhittleError {
    fn from(err: InferenceError) -> Self {
        WhittleError::Inference(err)
    }
}

/// Convert a [`WhittleError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<WhittleError> for PyErr {
    fn from(err: WhittleError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
