//! Validation helpers for bounded scalar optimization.
//!
//! - **Option checks**: [`verify_xatol`], [`verify_max_iter`],
//!   [`verify_grid_points`] reject unusable configuration up front.
//! - **Bounds checks**: [`verify_bounds`] enforces finite `lower < upper`.
//! - **Outcome checks**: [`validate_best_param`] and [`validate_value`]
//!   guard what the solver hands back.
//!
//! All helpers return domain-specific [`OptError`] variants.
use crate::optimization::errors::{OptError, OptResult};

/// Validate the absolute argument tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidXTol`] if the value is non-finite or ≤ 0.0.
pub fn verify_xatol(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidXTol { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidXTol { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate the iteration budget.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the optional grid pre-scan size.
///
/// A grid needs both endpoints plus at least one interior node to bracket a
/// minimum.
///
/// # Errors
/// Returns [`OptError::InvalidGridPoints`] if `points < 3`.
pub fn verify_grid_points(points: Option<usize>) -> OptResult<()> {
    if let Some(points) = points {
        if points < 3 {
            return Err(OptError::InvalidGridPoints {
                points,
                reason: "A grid pre-scan needs at least three nodes.",
            });
        }
    }
    Ok(())
}

/// Validate a search interval.
///
/// # Errors
/// Returns [`OptError::InvalidBounds`] if either end is non-finite or
/// `lower >= upper`.
pub fn verify_bounds(lower: f64, upper: f64) -> OptResult<()> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(OptError::InvalidBounds { lower, upper, reason: "Bounds must be finite." });
    }
    if lower >= upper {
        return Err(OptError::InvalidBounds {
            lower,
            upper,
            reason: "Lower bound must be strictly below the upper bound.",
        });
    }
    Ok(())
}

/// Validate and unwrap the solver's best parameter.
///
/// # Errors
/// - [`OptError::MissingBestParam`] if the solver produced none.
/// - [`OptError::InvalidBestParam`] if it is non-finite.
pub fn validate_best_param(best: Option<f64>) -> OptResult<f64> {
    match best {
        None => Err(OptError::MissingBestParam),
        Some(value) if !value.is_finite() => Err(OptError::InvalidBestParam { value }),
        Some(value) => Ok(value),
    }
}

/// Validate an objective value for finiteness.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] for NaN or ±inf.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}
