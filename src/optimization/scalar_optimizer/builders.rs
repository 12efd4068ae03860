//! scalar_optimizer::builders — derivative-free solver construction helpers.
//!
//! Purpose
//! -------
//! Build configured Argmin solvers for bounded scalar minimization so the
//! runner never touches solver-specific constructors.
//!
//! Key behaviors
//! -------------
//! - [`build_brent`] constructs Argmin's `BrentOpt` over the search interval,
//!   with relative tolerance `sqrt(ε)` and absolute tolerance `tols.xatol`.
//! - [`build_golden_section`] constructs Argmin's `GoldenSectionSearch` over
//!   the same interval with `tols.xatol` as its bracket tolerance.
//!
//! Conventions
//! -----------
//! - Builders do **not** set an initial point or `max_iters`; these are
//!   applied by the runner.
//! - Argmin constructor errors surface as [`OptError`] through the crate's
//!   `From<argmin::core::Error>` conversion.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use crate::optimization::{
    errors::OptResult,
    scalar_optimizer::{
        traits::{Bounds, Tolerances},
        types::{Brent, GoldenSection},
    },
};

/// Construct Brent's bounded minimizer over `bounds`.
pub fn build_brent(bounds: &Bounds, tols: &Tolerances) -> Brent {
    Brent::new(bounds.lower(), bounds.upper()).set_tolerance(f64::EPSILON.sqrt(), tols.xatol)
}

/// Construct a golden-section search over `bounds`.
///
/// # Errors
/// Propagates Argmin's validation of the interval and tolerance.
pub fn build_golden_section(bounds: &Bounds, tols: &Tolerances) -> OptResult<GoldenSection> {
    let solver = GoldenSection::new(bounds.lower(), bounds.upper())?.with_tolerance(tols.xatol)?;
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful construction of both solvers from validated inputs.
    //
    // They intentionally DO NOT cover:
    // - Solver behavior, which is exercised through `minimize`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure validated bounds and tolerances always build a golden-section
    // solver.
    //
    // Given
    // -----
    // - Bounds (-1, 3) and default tolerances.
    //
    // Expect
    // ------
    // - `build_golden_section` returns `Ok`.
    fn golden_section_builds_from_validated_inputs() {
        // Arrange
        let bounds = Bounds::new(-1.0, 3.0).expect("valid bounds");
        let tols = Tolerances::default();

        // Act
        let solver = build_golden_section(&bounds, &tols);

        // Assert
        assert!(solver.is_ok());
    }
}
