//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the error type used by the
//! closed-form standard errors and confidence intervals. An alias
//! `InferenceResult<T>` standardizes the return type across inference code.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Unified error type for inference routines.
///
/// Covers invalid variance multipliers, empty or non-finite frequency sets,
/// invalid confidence levels and failures constructing the reference
/// distribution.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Standard errors ----
    /// Taper variance multiplier must be finite and > 0.
    InvalidVarianceFactor {
        value: f64,
        reason: &'static str,
    },

    /// No frequencies were supplied.
    EmptyFrequencies,

    /// A log-frequency is NaN or ±inf.
    NonFiniteLogFrequency {
        index: usize,
        value: f64,
    },

    // ---- Confidence intervals ----
    /// Confidence level must lie strictly inside (0, 1).
    InvalidConfidenceLevel {
        level: f64,
        reason: &'static str,
    },

    /// Standard error must be non-negative (or +inf).
    InvalidStandardError {
        value: f64,
    },

    /// Reference distribution could not be constructed.
    Distribution(String),

    // ---- Fallback ----
    UnknownError,
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Standard errors ----
            InferenceError::InvalidVarianceFactor { value, reason } => {
                write!(f, "Inference Error: invalid variance factor {value}: {reason}")
            }
            InferenceError::EmptyFrequencies => {
                write!(f, "Inference Error: at least one frequency is required")
            }
            InferenceError::NonFiniteLogFrequency { index, value } => write!(
                f,
                "Inference Error: log-frequency at index {index} must be finite, got {value}"
            ),

            // ---- Confidence intervals ----
            InferenceError::InvalidConfidenceLevel { level, reason } => {
                write!(f, "Inference Error: invalid confidence level {level}: {reason}")
            }
            InferenceError::InvalidStandardError { value } => {
                write!(f, "Inference Error: standard error must be non-negative, got {value}")
            }
            InferenceError::Distribution(msg) => write!(f, "Inference Error: {msg}"),

            // ---- Fallback ----
            InferenceError::UnknownError => write!(f, "Inference Error: Unknown error occurred"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<InferenceError> for PyErr {
    fn from(err: InferenceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
