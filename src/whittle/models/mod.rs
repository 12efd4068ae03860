//! models — Whittle estimator facades for the memory parameter `d`.
//!
//! Purpose
//! -------
//! Wire the core periodogram, objective and optimizer pieces into three
//! user-facing estimators with one shared calling convention.
//!
//! Key behaviors
//! -------------
//! - [`LocalWhittle`]: LW with optional taper and differencing.
//! - [`ExactLocalWhittle`]: ELW with a configurable mean correction.
//! - [`TwoStepElw`]: detrending, a tapered LW first stage and an ELW second
//!   stage with the adaptive mean, optionally iterated.
//! - [`WhittleEstimator`]: `estimate`, `estimate_with`, `fit` and the fitted
//!   accessors, shared by all three.
//!
//! Invariants & assumptions
//! ------------------------
//! - `estimate` and `fit` run the same pure function; two identical calls
//!   return bit-identical records.
//! - `d_hat` always lies inside the configured bounds.
//! - Non-convergence is a flag on the record plus a `log::warn!`, never an
//!   error.
//!
//! Conventions
//! -----------
//! - Facades log through the `log` facade only (`debug`/`info` when
//!   `verbose`, `warn` on non-convergence or wide ELW bounds). The library
//!   never installs a logger.
//! - Estimators are `Send + Sync`; callers may run replications in parallel
//!   on separate instances or through `&self` estimation.
//!
//! Testing notes
//! -------------
//! - Unit tests in each facade cover state handling and bookkeeping;
//!   statistical behavior on simulated ARFIMA data lives in the crate's
//!   integration tests.

pub mod elw;
pub mod estimator;
pub mod lw;
pub mod two_step;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::elw::ExactLocalWhittle;
pub use self::estimator::WhittleEstimator;
pub use self::lw::LocalWhittle;
pub use self::two_step::TwoStepElw;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_elw::whittle::models::prelude::*;
//
// to import the estimator surface in a single line.

pub mod prelude {
    pub use super::elw::ExactLocalWhittle;
    pub use super::estimator::WhittleEstimator;
    pub use super::lw::LocalWhittle;
    pub use super::two_step::TwoStepElw;
}
