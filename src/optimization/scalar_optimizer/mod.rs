//! scalar_optimizer — Argmin-powered bounded minimization over one parameter.
//!
//! Purpose
//! -------
//! Provide a derivative-free, bounded optimizer for scalar objectives such as
//! concentrated Whittle objectives in the memory parameter `d`. Callers hand
//! over any [`ScalarObjective`] (closures included) and receive a
//! [`ScalarOutcome`] with the minimizer, its value and diagnostics.
//!
//! Key behaviors
//! -------------
//! - Convert a user objective into an Argmin `CostFunction` via
//!   [`adapter::ArgMinAdapter`], which enforces the bounds and absorbs failed
//!   evaluations into an [`adapter::EvalLog`].
//! - Expose a single entrypoint [`minimize`] that:
//!   - optionally runs an equispaced [`grid`] pre-scan to bracket the
//!     leftmost best node,
//!   - builds Brent or golden-section via [`builders`],
//!   - executes the solver via [`run::run_scalar`], and
//!   - normalizes results into a [`ScalarOutcome`].
//! - Centralize configuration ([`Bounds`], [`Tolerances`],
//!   [`OptimizerOptions`], [`ScalarSolver`]) and validation helpers
//!   ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is never evaluated outside `[lower, upper]`.
//! - Failed or non-finite evaluations never abort a run; they set
//!   `converged = false`. Only a run in which every evaluation failed is an
//!   error.
//! - An exhausted iteration budget is reported, not raised.
//!
//! Conventions
//! -----------
//! - The optimizer minimizes; there is no sign flip between the objective
//!   and the cost.
//! - Ties and flat regions resolve to whatever the chosen bracketing
//!   algorithm finds first; with a grid pre-scan, to the leftmost best node.
//! - Errors bubble up as [`OptResult<T>`]; this module never intentionally
//!   panics.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover bound enforcement and failure logging
//!   ([`adapter`]), bracketing and tie-breaks ([`grid`]), option and
//!   outcome invariants ([`traits`], [`validation`]) and end-to-end solver
//!   behavior on toy objectives ([`api`]).
//!
//! [`OptResult<T>`]: crate::optimization::errors::OptResult

pub mod adapter;
pub mod api;
pub mod builders;
pub mod grid;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{
    Bounds, OptimizerOptions, ScalarObjective, ScalarOutcome, ScalarSolver, Tolerances,
};
pub use self::types::{Cost, DEFAULT_MAX_ITER, DEFAULT_XATOL, FnEvalMap};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_elw::optimization::scalar_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{
        Bounds, OptimizerOptions, ScalarObjective, ScalarOutcome, ScalarSolver, Tolerances,
    };
}
