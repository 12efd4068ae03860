//! Errors for the bounded scalar optimizer.
//!
//! Purpose
//! -------
//! Give the optimization layer a single error enum, [`OptError`], and result
//! alias, [`OptResult`], covering option validation, objective failures and
//! Argmin backend errors. Model-layer errors are folded into
//! [`OptError::ObjectiveFailed`] so the solver wiring never depends on the
//! estimator types.
//!
//! Conventions
//! -----------
//! - Struct-like variants carry the offending value plus a short static
//!   `reason` where the message alone would be ambiguous.
//! - Argmin errors are downcast to [`ArgminError`] when possible and mapped
//!   onto matching variants; everything else becomes
//!   [`OptError::BackendError`].
use argmin::core::{ArgminError, Error};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::whittle::errors::WhittleError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Bounds ----
    /// Bounds must be finite with `lower < upper`.
    InvalidBounds {
        lower: f64,
        upper: f64,
        reason: &'static str,
    },

    /// A candidate outside the search interval was proposed.
    OutOfBounds {
        value: f64,
        lower: f64,
        upper: f64,
    },

    // ---- OptimizerOptions ----
    /// Absolute argument tolerance needs to be positive and finite.
    InvalidXTol {
        tol: f64,
        reason: &'static str,
    },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },

    /// Grid pre-scan needs at least three nodes.
    InvalidGridPoints {
        points: usize,
        reason: &'static str,
    },

    /// Invalid solver name.
    InvalidSolver {
        name: String,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Objective returned NaN or ±inf.
    NonFiniteCost {
        value: f64,
    },

    /// Objective evaluation failed at `d`.
    ObjectiveFailed {
        text: String,
    },

    /// Every objective evaluation failed; no usable minimizer exists.
    AllEvaluationsFailed {
        evaluations: u64,
    },

    // ---- Outcome ----
    /// Solver finished without a best parameter.
    MissingBestParam,

    /// Solver reported a non-finite best parameter.
    InvalidBestParam {
        value: f64,
    },

    // ---- Argmin errors ----
    InvalidParameter {
        text: String,
    },
    NotImplemented {
        text: String,
    },
    NotInitialized {
        text: String,
    },
    ConditionViolated {
        text: String,
    },
    CheckPointNotFound {
        text: String,
    },
    PotentialBug {
        text: String,
    },
    ImpossibleError {
        text: String,
    },
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Bounds ----
            OptError::InvalidBounds { lower, upper, reason } => {
                write!(f, "Invalid bounds ({lower}, {upper}): {reason}")
            }
            OptError::OutOfBounds { value, lower, upper } => {
                write!(f, "Candidate {value} lies outside the search interval [{lower}, {upper}]")
            }

            // ---- OptimizerOptions ----
            OptError::InvalidXTol { tol, reason } => {
                write!(f, "Invalid argument tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidGridPoints { points, reason } => {
                write!(f, "Invalid number of grid points {points}: {reason}")
            }
            OptError::InvalidSolver { name, reason } => {
                write!(f, "Invalid solver '{name}': {reason}")
            }

            // ---- Objective ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Objective value must be finite, got {value}")
            }
            OptError::ObjectiveFailed { text } => write!(f, "Objective evaluation failed: {text}"),
            OptError::AllEvaluationsFailed { evaluations } => {
                write!(f, "All {evaluations} objective evaluations failed")
            }

            // ---- Outcome ----
            OptError::MissingBestParam => write!(f, "Solver returned no best parameter"),
            OptError::InvalidBestParam { value } => {
                write!(f, "Solver returned a non-finite best parameter: {value}")
            }

            // ---- Argmin errors ----
            OptError::InvalidParameter { text } => write!(f, "Invalid parameter: {text}"),
            OptError::NotImplemented { text } => write!(f, "Not implemented: {text}"),
            OptError::NotInitialized { text } => write!(f, "Not initialized: {text}"),
            OptError::ConditionViolated { text } => write!(f, "Condition violated: {text}"),
            OptError::CheckPointNotFound { text } => write!(f, "Checkpoint not found: {text}"),
            OptError::PotentialBug { text } => write!(f, "Potential bug: {text}"),
            OptError::ImpossibleError { text } => write!(f, "Impossible error: {text}"),
            OptError::BackendError { text } => write!(f, "Optimizer backend error: {text}"),

            // ---- Fallback ----
            OptError::UnknownError => write!(f, "An unknown optimizer error occurred."),
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<ArgminError>() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => match err.downcast::<OptError>() {
                Ok(opt_err) => opt_err,
                Err(err) => OptError::BackendError { text: err.to_string() },
            },
        }
    }
}

impl From<WhittleError> for OptError {
    fn from(err: WhittleError) -> Self {
        OptError::ObjectiveFailed { text: err.to_string() }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
