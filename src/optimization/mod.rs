//! optimization — bounded scalar optimizer, numerical helpers, and error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used by the Whittle estimators: an
//! Argmin-backed bounded scalar minimizer, log-domain numerical helpers,
//! and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - Minimize scalar objectives over a closed interval (`scalar_optimizer`)
//!   with Brent or golden-section refinement and an optional grid pre-scan.
//! - Supply log-domain primitives (`numerical_stability`) so objectives
//!   such as `log(mean(λ^{2d} I))` never overflow for extreme `d`.
//! - Normalize configuration issues, numerical failures and backend solver
//!   errors into `errors::OptError` with the alias `OptResult<T>`.
//!
//! Conventions
//! -----------
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module and its submodules avoid logging; the estimator layer
//!   reports progress. The only output is the optional slog observer behind
//!   the `obs_slog` feature.
//!
//! Testing notes
//! -------------
//! - `scalar_optimizer`: solver wiring, bound enforcement, failure
//!   absorption and convergence flags on toy objectives.
//! - `numerical_stability`: agreement of log-domain helpers with naïve
//!   formulas on safe inputs and finiteness on extreme inputs.
//! - `errors`: conversions from backend/model errors into `OptError`.

pub mod errors;
pub mod numerical_stability;
pub mod scalar_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_elw::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
    pub use super::scalar_optimizer::prelude::*;
}
