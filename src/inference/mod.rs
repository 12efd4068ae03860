//! inference — standard errors and confidence intervals for Whittle estimates.
//!
//! Purpose
//! -------
//! Provide the post-estimation uncertainty layer: closed-form standard
//! errors for the memory parameter and normal confidence intervals built on
//! them.
//!
//! Key behaviors
//! -------------
//! - Define a unified error and result type, [`InferenceError`] and
//!   [`InferenceResult`].
//! - Compute the Fisher-information standard error and the asymptotic
//!   standard error from the frequency grid and a taper variance multiplier
//!   ([`standard_errors`]).
//! - Build two-sided normal intervals via `statrs` ([`confidence_interval`]).
//!
//! Conventions
//! -----------
//! - Functions are pure: no logging, no global state. Failures are reported
//!   through [`InferenceResult`] only.
//! - Frequencies are passed as `log λ_j`, which is what the objectives
//!   already hold.
//!
//! Downstream usage
//! ----------------
//! - Estimator facades call [`standard_errors`] once after `d̂` is found and
//!   store both values in the estimate record; the record's
//!   `confidence_interval` accessor delegates to [`confidence_interval`].
//!
//! Testing notes
//! -------------
//! - Unit tests in [`standard_errors`](mod@standard_errors) pin reference
//!   values and edge cases; integration tests check the values carried by
//!   fitted estimators.

pub mod errors;
pub mod standard_errors;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::standard_errors::{
    StandardErrors, asymptotic_se, confidence_interval, fisher_se, standard_errors,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_elw::inference::prelude::*;
//
// to import the main inference surface in a single line.

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::standard_errors::{StandardErrors, confidence_interval, standard_errors};
}
