//! core — periodograms, tapers, transforms and objectives for Whittle
//! estimation.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks shared by the LW, ELW and two-step
//! ELW estimators: input validation, integer and fractional differencing,
//! polynomial detrending, data tapers, the low-frequency periodogram,
//! bandwidth rules, the concentrated objectives, option bundles and the
//! estimate record.
//!
//! Key behaviors
//! -------------
//! - Validate series ([`validate_series`]) and bandwidths
//!   ([`resolve_bandwidth`]) before any computation.
//! - Build tapered, differenced periodograms ([`build_periodogram`]) and
//!   reusable frequency grids ([`FourierGrid`]) on top of `rustfft`.
//! - Express LW and ELW as [`ScalarObjective`]s ([`LwObjective`],
//!   [`ElwObjective`]) so the bounded optimizer can minimize them directly.
//! - Fit polynomial trends by SVD least squares ([`detrend`],
//!   [`fractional_detrend`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Series are finite and at least [`MIN_OBSERVATIONS`] long after
//!   differencing; bandwidths satisfy `1 ≤ m`, `2m < n`.
//! - Degenerate inputs are errors, never NaN objectives.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based in code; formulas use `t = 1..n` and `j = 1..m`.
//! - This module performs no logging; the estimator facades do.
//!
//! Downstream usage
//! ----------------
//! - `whittle::models` wires these pieces into the estimator facades.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests against closed forms or direct
//!   (non-FFT) computations.
//!
//! [`ScalarObjective`]: crate::optimization::scalar_optimizer::ScalarObjective

pub mod bandwidth;
pub mod data;
pub mod objective;
pub mod options;
pub mod periodogram;
pub mod results;
pub mod taper;
pub mod transforms;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bandwidth::{default_bandwidth, max_bandwidth, resolve_bandwidth, validate_bandwidth};
pub use self::data::{MIN_OBSERVATIONS, is_constant, validate_series};
pub use self::objective::{ElwObjective, LwObjective, MeanEstimation, adaptive_weight};
pub use self::options::{
    ELW_DEFAULT_BOUNDS, ElwOptions, LW_DEFAULT_BOUNDS, LwOptions, TwoStepOptions,
};
pub use self::periodogram::{FourierGrid, Periodogram, build_periodogram};
pub use self::results::{Method, TrendFit, WhittleEstimate};
pub use self::taper::Taper;
pub use self::transforms::{
    FracDiffer, PolynomialTrend, cumsum, detrend, difference, fracdiff, fractional_detrend,
    integrate,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_elw::whittle::core::prelude::*;
//
// to import the main core surface in a single line.

pub mod prelude {
    pub use super::objective::MeanEstimation;
    pub use super::options::{
        ELW_DEFAULT_BOUNDS, ElwOptions, LW_DEFAULT_BOUNDS, LwOptions, TwoStepOptions,
    };
    pub use super::periodogram::{Periodogram, build_periodogram};
    pub use super::results::{Method, TrendFit, WhittleEstimate};
    pub use super::taper::Taper;
}
