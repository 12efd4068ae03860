//! numerical_stability — log-domain helpers and shared tolerances.
//!
//! Purpose
//! -------
//! Collect small numerical primitives used by the Whittle objectives and the
//! periodogram builder so that sums of powers of frequencies are evaluated
//! without overflow and degeneracy checks share one tolerance.
//!
//! Conventions
//! -----------
//! - Pure functions on `f64` / `ndarray` views; no logging, no I/O.
//! - `-∞` is used as the log of zero and is skipped by the log-sum-exp
//!   helpers; NaN propagates.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    DEGENERACY_TOL, GENERAL_TOL, log_mean_exp, log_sum_exp, safe_ln,
};

pub mod prelude {
    pub use super::transformations::{
        DEGENERACY_TOL, GENERAL_TOL, log_mean_exp, log_sum_exp, safe_ln,
    };
}
