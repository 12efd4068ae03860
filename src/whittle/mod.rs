//! whittle — local Whittle–type estimation of the memory parameter `d`.
//!
//! Purpose
//! -------
//! Estimate the fractional integration order `d` of a univariate series
//! from its low-frequency periodogram with the local Whittle (LW), exact
//! local Whittle (ELW) and two-step ELW estimators.
//!
//! Key behaviors
//! -------------
//! - `core`: validation, transforms, tapers, periodograms, bandwidth rules,
//!   objectives, options and the estimate record.
//! - `models`: the estimator facades and the shared
//!   [`WhittleEstimator`] interface.
//! - `errors`: [`WhittleError`] / [`WhittleResult`], wrapping optimizer and
//!   inference errors.
//!
//! Downstream usage
//! ----------------
//! ```
//! use ndarray::Array1;
//! use rust_elw::whittle::prelude::*;
//!
//! let x = Array1::from_iter((1..=256).map(|t| {
//!     let t = t as f64;
//!     (0.61 * t).sin() + (1.7 * t).cos()
//! }));
//! let est = LocalWhittle::default().estimate(x.view(), None)?;
//! assert!(est.d_hat >= -0.5 && est.d_hat <= 2.0);
//! # Ok::<(), rust_elw::whittle::errors::WhittleError>(())
//! ```

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{WhittleError, WhittleResult};
pub use self::models::{ExactLocalWhittle, LocalWhittle, TwoStepElw, WhittleEstimator};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_elw::whittle::prelude::*;
//
// to import the estimators, their options and the estimate record.

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{WhittleError, WhittleResult};
    pub use super::models::prelude::*;
}
