//! scalar_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the scalar types, Argmin state alias and default constants used
//! by the bounded scalar optimizer, so the rest of the optimizer code stays
//! agnostic to Argmin generics.
//!
//! Invariants & assumptions
//! ------------------------
//! - The single free parameter is the memory parameter `d`, an `f64`.
//! - `Cost` is the objective value being *minimized* (no sign flips).
//! - [`FAILED_EVAL_COST`] is large but finite so Brent's parabolic steps stay
//!   well-defined when an evaluation has to be replaced.
//!
//! Testing notes
//! -------------
//! - This module only defines aliases and constants; it is exercised by the
//!   tests of the surrounding optimizer modules.
use argmin::{
    core::IterState,
    solver::{brent::BrentOpt, goldensectionsearch::GoldenSectionSearch},
};
use std::collections::HashMap;

/// Scalar objective value used by the optimizer.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Argmin iteration state for a derivative-free scalar problem.
pub type ScalarState = IterState<f64, (), (), (), (), Cost>;

/// Brent's bounded minimizer specialized to `f64`.
pub type Brent = BrentOpt<f64>;

/// Golden-section search specialized to `f64`.
pub type GoldenSection = GoldenSectionSearch<f64>;

/// Key under which Argmin counts cost-function evaluations.
pub const COST_COUNT_KEY: &str = "cost_count";

/// Default absolute tolerance on the minimizer location.
pub const DEFAULT_XATOL: f64 = 1e-8;

/// Default iteration budget.
pub const DEFAULT_MAX_ITER: usize = 500;

/// Cost substituted for an evaluation that failed or returned a non-finite
/// value.
pub const FAILED_EVAL_COST: Cost = 1e150;
