//! Estimator options — validated configuration bundles for LW, ELW and
//! two-step ELW.
//!
//! Purpose
//! -------
//! Collect every knob an estimator reads in one immutable value, so a call
//! is fully described by `(series, m, options)`.
//!
//! Key behaviors
//! -------------
//! - [`LwOptions`]: bounds, taper, optional differencing order (defaults to
//!   the taper's own), optimizer settings and verbosity.
//! - [`ElwOptions`]: bounds, mean-correction mode, optimizer settings and
//!   verbosity.
//! - [`TwoStepOptions`]: bounds, polynomial trend order, trend-iteration cap
//!   and tolerance, optimizer settings and verbosity.
//!
//! Invariants & assumptions
//! ------------------------
//! - Components (`Bounds`, `OptimizerOptions`) are validated by their own
//!   constructors; `new` here only checks cross-cutting values (a finite
//!   given mean, a positive iteration cap, a positive finite tolerance).
//! - Bounds are always on the scale of the original series' `d`.
//!
//! Conventions
//! -----------
//! - `verbose` controls `log` output from the estimator layer only; the
//!   optimizer's own observer is driven by `OptimizerOptions::verbose`.
//!   Neither changes returned values.
//!
//! Testing notes
//! -------------
//! - Unit tests check defaults, the taper-driven differencing order and the
//!   validation errors.
use crate::{
    optimization::scalar_optimizer::{Bounds, OptimizerOptions},
    whittle::{
        core::{objective::MeanEstimation, taper::Taper},
        errors::{WhittleError, WhittleResult},
    },
};

/// Default LW search interval.
pub const LW_DEFAULT_BOUNDS: Bounds = Bounds::from_ordered(-0.5, 2.0);

/// Default ELW and two-step ELW search interval.
pub const ELW_DEFAULT_BOUNDS: Bounds = Bounds::from_ordered(-1.0, 3.0);

/// Width of the ELW consistency region; wider bounds are logged.
pub const ELW_MAX_BOUNDS_WIDTH: f64 = 4.5;

/// Local Whittle configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LwOptions {
    pub bounds: Bounds,
    pub taper: Taper,
    /// `None` uses [`Taper::default_diff`].
    pub diff: Option<usize>,
    pub optimizer: OptimizerOptions,
    pub verbose: bool,
}

impl LwOptions {
    pub fn new(
        bounds: Bounds, taper: Taper, diff: Option<usize>, optimizer: OptimizerOptions,
        verbose: bool,
    ) -> Self {
        Self { bounds, taper, diff, optimizer, verbose }
    }

    /// Convert a caller-supplied signed differencing order.
    ///
    /// # Errors
    /// [`WhittleError::InvalidDiffOrder`] for `diff < 0`.
    pub fn checked_diff(diff: i64) -> WhittleResult<usize> {
        usize::try_from(diff).map_err(|_| WhittleError::InvalidDiffOrder {
            diff,
            reason: "Differencing order must be non-negative.",
        })
    }

    /// Differencing order actually applied.
    pub fn diff(&self) -> usize {
        self.diff.unwrap_or_else(|| self.taper.default_diff())
    }
}

impl Default for LwOptions {
    fn default() -> Self {
        Self {
            bounds: LW_DEFAULT_BOUNDS,
            taper: Taper::None,
            diff: None,
            optimizer: OptimizerOptions::default(),
            verbose: false,
        }
    }
}

/// Exact local Whittle configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ElwOptions {
    pub bounds: Bounds,
    pub mean: MeanEstimation,
    pub optimizer: OptimizerOptions,
    pub verbose: bool,
}

impl ElwOptions {
    /// # Errors
    /// [`WhittleError::InvalidMean`] for `MeanEstimation::Given` with a
    /// non-finite value.
    pub fn new(
        bounds: Bounds, mean: MeanEstimation, optimizer: OptimizerOptions, verbose: bool,
    ) -> WhittleResult<Self> {
        if let MeanEstimation::Given(value) = mean {
            if !value.is_finite() {
                return Err(WhittleError::InvalidMean { value });
            }
        }
        Ok(Self { bounds, mean, optimizer, verbose })
    }
}

impl Default for ElwOptions {
    fn default() -> Self {
        Self {
            bounds: ELW_DEFAULT_BOUNDS,
            mean: MeanEstimation::Mean,
            optimizer: OptimizerOptions::default(),
            verbose: false,
        }
    }
}

/// Two-step ELW configuration.
///
/// - `trend_order`: polynomial order removed before estimation
///   (0 = mean, 1 = linear).
/// - `max_trend_iter`: number of ELW stages; `1` fits the trend once, larger
///   values re-fit it on the fractionally differenced scale after each
///   stage.
/// - `trend_tol`: stop iterating once successive estimates move less.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoStepOptions {
    pub bounds: Bounds,
    pub trend_order: usize,
    pub max_trend_iter: usize,
    pub trend_tol: f64,
    pub optimizer: OptimizerOptions,
    pub verbose: bool,
}

impl TwoStepOptions {
    /// # Errors
    /// [`WhittleError::InvalidTrendIteration`] for a zero cap or a
    /// non-positive / non-finite tolerance.
    pub fn new(
        bounds: Bounds, trend_order: usize, max_trend_iter: usize, trend_tol: f64,
        optimizer: OptimizerOptions, verbose: bool,
    ) -> WhittleResult<Self> {
        if max_trend_iter == 0 {
            return Err(WhittleError::InvalidTrendIteration {
                reason: "max_trend_iter must be at least 1.",
            });
        }
        if !trend_tol.is_finite() || trend_tol <= 0.0 {
            return Err(WhittleError::InvalidTrendIteration {
                reason: "trend_tol must be positive and finite.",
            });
        }
        Ok(Self { bounds, trend_order, max_trend_iter, trend_tol, optimizer, verbose })
    }
}

impl Default for TwoStepOptions {
    fn default() -> Self {
        Self {
            bounds: ELW_DEFAULT_BOUNDS,
            trend_order: 1,
            max_trend_iter: 1,
            trend_tol: 1e-4,
            optimizer: OptimizerOptions::default(),
            verbose: false,
        }
    }
}
