//! Series validation for Whittle estimators.
//!
//! Purpose
//! -------
//! Check raw input series once, at the Rust boundary, so the periodogram and
//! objective code can assume clean data.
//!
//! Key behaviors
//! -------------
//! - [`validate_series`] rejects short series and non-finite values with the
//!   index of the first offending element.
//! - [`is_constant`] flags series with no variation, which carry no spectral
//!   information.
//!
//! Invariants & assumptions
//! ------------------------
//! - Series are never mutated here; transforms return new arrays.
//! - [`MIN_OBSERVATIONS`] applies to the series the periodogram is built
//!   from, i.e. after any differencing.
use crate::whittle::errors::{WhittleError, WhittleResult};
use ndarray::ArrayView1;

/// Minimum number of observations a periodogram can be built from.
pub const MIN_OBSERVATIONS: usize = 4;

/// Validate length and finiteness of a series.
///
/// # Errors
/// - [`WhittleError::InsufficientData`] if `series.len() < min`.
/// - [`WhittleError::InvalidData`] for the first NaN/±inf entry.
pub fn validate_series(series: ArrayView1<f64>, min: usize) -> WhittleResult<()> {
    if series.len() < min {
        return Err(WhittleError::InsufficientData { len: series.len(), min });
    }
    for (index, &value) in series.iter().enumerate() {
        if !value.is_finite() {
            return Err(WhittleError::InvalidData { index, value });
        }
    }
    Ok(())
}

/// `true` if every entry equals the first one (or the series is empty).
pub fn is_constant(series: ArrayView1<f64>) -> bool {
    match series.first() {
        Some(&first) => series.iter().all(|&v| v == first),
        None => true,
    }
}
