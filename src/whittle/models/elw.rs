//! Exact local Whittle estimator (Shimotsu & Phillips 2005) with a
//! configurable mean correction (Shimotsu 2010).
//!
//! The objective recomputes the periodogram of `Δ^d (x − μ̂(d))` for every
//! candidate `d`, so the estimator stays consistent for non-stationary `d`
//! without differencing or tapering. Bounds wider than the consistency width
//! of 9/2 are honored but logged.
use crate::{
    inference::standard_errors::standard_errors,
    optimization::scalar_optimizer::{Bounds, OptimizerOptions, ScalarOutcome, minimize},
    whittle::{
        core::{
            bandwidth::resolve_bandwidth,
            data::{MIN_OBSERVATIONS, is_constant, validate_series},
            objective::{ElwObjective, MeanEstimation},
            options::{ELW_MAX_BOUNDS_WIDTH, ElwOptions},
            results::{Method, WhittleEstimate},
            taper::Taper,
        },
        errors::{WhittleError, WhittleResult},
        models::estimator::{EstimateContext, WhittleEstimator, assemble_estimate, log_estimate},
    },
};
use ndarray::ArrayView1;

/// Exact local Whittle estimator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExactLocalWhittle {
    /// Estimation options.
    pub options: ElwOptions,
    /// Last fit (populated by `fit`).
    pub results: Option<WhittleEstimate>,
}

impl ExactLocalWhittle {
    pub fn new(options: ElwOptions) -> Self {
        Self { options, results: None }
    }
}

impl WhittleEstimator for ExactLocalWhittle {
    type Options = ElwOptions;

    fn estimate_with(
        &self, series: ArrayView1<f64>, m: Option<usize>, options: &ElwOptions,
    ) -> WhittleResult<WhittleEstimate> {
        validate_series(series, MIN_OBSERVATIONS)?;
        if is_constant(series) {
            return Err(WhittleError::DegeneratePeriodogram { reason: "Series is constant." });
        }
        let n = series.len();
        let m = resolve_bandwidth(m, n, 1)?;
        warn_on_wide_bounds(&options.bounds);
        if options.verbose {
            log::debug!("ELW: n = {n}, m = {m}, mean = {}", options.mean);
        }

        let stage = elw_stage(series, m, options.mean, &options.bounds, None, &options.optimizer)?;
        let estimate = stage.into_estimate(Method::ExactLocalWhittle, n, m)?;
        log_estimate(&estimate, options.verbose);
        Ok(estimate)
    }

    fn options(&self) -> &ElwOptions {
        &self.options
    }

    fn stored(&self) -> Option<&WhittleEstimate> {
        self.results.as_ref()
    }

    fn stored_mut(&mut self) -> &mut Option<WhittleEstimate> {
        &mut self.results
    }
}

/// One minimization of the ELW objective, kept together with the objective
/// so the mean and frequencies at the optimum can be read back.
pub(crate) struct ElwStage {
    pub objective: ElwObjective,
    pub outcome: ScalarOutcome,
}

impl ElwStage {
    /// Record with standard errors (`Φ = 1`) and the mean used at `d̂`.
    pub(crate) fn into_estimate(
        self, method: Method, n: usize, m: usize,
    ) -> WhittleResult<WhittleEstimate> {
        let ses = standard_errors(self.objective.log_freqs().view(), 1.0)?;
        let mean = self.objective.mean_at(self.outcome.d_hat);
        let ctx = EstimateContext { method, n, m, taper: Taper::None, diff: 0 };
        let mut estimate = assemble_estimate(ctx, self.outcome, ses);
        estimate.mean = Some(mean);
        Ok(estimate)
    }
}

/// Build the ELW objective for `series` and minimize it over `bounds`.
pub(crate) fn elw_stage(
    series: ArrayView1<f64>, m: usize, mean: MeanEstimation, bounds: &Bounds, init: Option<f64>,
    optimizer: &OptimizerOptions,
) -> WhittleResult<ElwStage> {
    let objective = ElwObjective::new(series, m, mean)?;
    let outcome = minimize(&objective, bounds, init, optimizer)?;
    Ok(ElwStage { objective, outcome })
}

pub(crate) fn warn_on_wide_bounds(bounds: &Bounds) {
    if bounds.width() > ELW_MAX_BOUNDS_WIDTH {
        log::warn!(
            "ELW bounds ({}, {}) are wider than {}; the estimator is only known to be consistent on narrower intervals",
            bounds.lower(),
            bounds.upper(),
            ELW_MAX_BOUNDS_WIDTH
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::whittle::core::transforms::cumsum;
    use approx::assert_relative_eq;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The fitted/unfitted state machine and the stored mean.
    // - Mean-mode bookkeeping and invariance to a level shift.
    // - Degenerate input.
    // -------------------------------------------------------------------------

    fn noisy(n: usize) -> Array1<f64> {
        Array1::from_iter((1..=n).map(|t| ((t as f64) * 12.9898).sin() * 43_758.545_3 % 1.0))
    }

    #[test]
    // Purpose
    // -------
    // `fit` stores the `estimate` record, including the mean at d̂.
    //
    // Given
    // -----
    // - Default ELW (sample mean), a 256-point series.
    //
    // Expect
    // ------
    // - Equal records; `mean` equals the sample mean; Φ = 1 errors.
    fn fit_matches_estimate_and_reports_mean() {
        // Arrange
        let x = noisy(256);
        let mut elw = ExactLocalWhittle::default();

        // Act
        let est = elw.estimate(x.view(), Some(30)).expect("valid input");
        let fitted = elw.fit(x.view(), Some(30)).expect("valid input").clone();

        // Assert
        assert_eq!(est, fitted);
        assert_relative_eq!(est.mean.expect("ELW reports a mean"), x.mean().expect("non-empty"));
        assert_relative_eq!(est.ase, 1.0 / (4.0f64 * 30.0).sqrt(), epsilon = 1e-12);
        assert_eq!(est.method, Method::ExactLocalWhittle);
    }

    #[test]
    // Purpose
    // -------
    // A level shift does not move the estimate under sample-mean correction,
    // while the uncorrected estimator sees it.
    //
    // Given
    // -----
    // - A random walk and the same walk plus 50.
    //
    // Expect
    // ------
    // - Equal d̂ (to optimizer tolerance) with `Mean`; `None` reports μ = 0.
    fn mean_correction_absorbs_level_shift() {
        // Arrange
        let walk = cumsum(noisy(300).view());
        let shifted = walk.mapv(|v| v + 50.0);
        let elw = ExactLocalWhittle::default();
        let raw = ExactLocalWhittle::new(ElwOptions {
            mean: MeanEstimation::None,
            ..ElwOptions::default()
        });

        // Act
        let a = elw.estimate(walk.view(), None).expect("valid");
        let b = elw.estimate(shifted.view(), None).expect("valid");
        let c = raw.estimate(shifted.view(), None).expect("valid");

        // Assert
        assert!((a.d_hat - b.d_hat).abs() < 1e-5);
        assert_eq!(c.mean, Some(0.0));
    }

    #[test]
    // Purpose
    // -------
    // Constant input is rejected before any optimization.
    //
    // Given
    // -----
    // - 100 copies of 2.5.
    //
    // Expect
    // ------
    // - `DegeneratePeriodogram`.
    fn constant_series_is_degenerate() {
        let flat = Array1::from_elem(100, 2.5);
        assert!(matches!(
            ExactLocalWhittle::default().estimate(flat.view(), None),
            Err(WhittleError::DegeneratePeriodogram { .. })
        ));
    }
}
