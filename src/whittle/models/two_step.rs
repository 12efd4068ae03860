//! Two-step exact local Whittle estimator (Shimotsu 2010).
//!
//! Purpose
//! -------
//! Estimate `d` for series with a polynomial trend and an unknown mean,
//! where plain ELW is sensitive to the initial condition.
//!
//! Key behaviors
//! -------------
//! 1. Remove a least-squares polynomial trend of order `trend_order`.
//! 2. First stage: Hurvich–Chen tapered LW (one difference) on the
//!    residuals over the same bounds, giving `d̃`.
//! 3. Second stage: ELW with the adaptive (weighted) mean on the residuals,
//!    started from `d̃`.
//! 4. With `max_trend_iter > 1`, re-fit the trend by regressing `Δ^{d̂} x` on
//!    `Δ^{d̂} X` and repeat step 3 until successive estimates differ by less
//!    than `trend_tol` or the cap is hit.
//!
//! Invariants & assumptions
//! ------------------------
//! - The reported `n`, `m`, standard errors and objective belong to the
//!   final ELW stage; the first stage and the trend are summarized in
//!   [`TrendFit`].
//! - The first stage uses `min(m, ⌈(n−1)/2⌉ − 1)` frequencies so any `m`
//!   valid for `n` also works after the difference.
//! - A series that is an exact polynomial of the chosen order has nothing
//!   left to estimate from and is rejected as degenerate.
use crate::{
    optimization::numerical_stability::transformations::DEGENERACY_TOL,
    whittle::{
        core::{
            bandwidth::{max_bandwidth, resolve_bandwidth},
            data::{MIN_OBSERVATIONS, is_constant, validate_series},
            objective::MeanEstimation,
            options::{LwOptions, TwoStepOptions},
            results::{Method, TrendFit, WhittleEstimate},
            taper::Taper,
            transforms::{PolynomialTrend, detrend, fractional_detrend},
        },
        errors::{WhittleError, WhittleResult},
        models::{
            elw::{elw_stage, warn_on_wide_bounds},
            estimator::{WhittleEstimator, log_estimate},
            lw::LocalWhittle,
        },
    },
};
use ndarray::ArrayView1;

/// Two-step ELW estimator with polynomial detrending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TwoStepElw {
    /// Estimation options.
    pub options: TwoStepOptions,
    /// Last fit (populated by `fit`).
    pub results: Option<WhittleEstimate>,
}

impl TwoStepElw {
    pub fn new(options: TwoStepOptions) -> Self {
        Self { options, results: None }
    }
}

impl WhittleEstimator for TwoStepElw {
    type Options = TwoStepOptions;

    fn estimate_with(
        &self, series: ArrayView1<f64>, m: Option<usize>, options: &TwoStepOptions,
    ) -> WhittleResult<WhittleEstimate> {
        validate_series(series, MIN_OBSERVATIONS)?;
        if is_constant(series) {
            return Err(WhittleError::DegeneratePeriodogram { reason: "Series is constant." });
        }
        let n = series.len();
        let m = resolve_bandwidth(m, n, 1)?;
        warn_on_wide_bounds(&options.bounds);

        // Step 1: detrend.
        let mut trend = detrend(series, options.trend_order)?;
        check_residual_energy(series, &trend)?;

        // Step 2: tapered LW on the residuals.
        let first_stage = LocalWhittle::new(LwOptions::new(
            options.bounds,
            Taper::HurvichChen,
            Some(1),
            options.optimizer.clone(),
            options.verbose,
        ));
        let m_first = m.min(max_bandwidth(n - 1));
        let d_first = first_stage.estimate(trend.residuals.view(), Some(m_first))?.d_hat;
        if options.verbose {
            log::debug!("2ELW: n = {n}, m = {m}, first stage d = {d_first:.6}");
        }

        // Steps 3-4: ELW with adaptive mean, optionally re-fitting the trend.
        let mut d_prev = d_first;
        let mut iterations = 0;
        let (stage, trend_converged) = loop {
            iterations += 1;
            let stage = elw_stage(
                trend.residuals.view(),
                m,
                MeanEstimation::Weighted,
                &options.bounds,
                Some(d_prev),
                &options.optimizer,
            )?;
            let d_new = stage.outcome.d_hat;
            if options.verbose {
                log::debug!("2ELW: stage {iterations}, d = {d_new:.6}");
            }
            if options.max_trend_iter == 1 {
                break (stage, true);
            }
            if iterations > 1 && (d_new - d_prev).abs() < options.trend_tol {
                break (stage, true);
            }
            if iterations >= options.max_trend_iter {
                break (stage, false);
            }
            trend = fractional_detrend(series, options.trend_order, d_new)?;
            d_prev = d_new;
        };
        if !trend_converged {
            log::warn!(
                "2ELW: trend iteration hit the cap of {} stages before reaching tolerance {}",
                options.max_trend_iter,
                options.trend_tol
            );
        }

        let mut estimate = stage.into_estimate(Method::TwoStepElw, n, m)?;
        estimate.trend = Some(TrendFit {
            order: options.trend_order,
            coefficients: trend.coefficients,
            d_first_stage: d_first,
            iterations,
            converged: trend_converged,
        });
        log_estimate(&estimate, options.verbose);
        Ok(estimate)
    }

    fn options(&self) -> &TwoStepOptions {
        &self.options
    }

    fn stored(&self) -> Option<&WhittleEstimate> {
        self.results.as_ref()
    }

    fn stored_mut(&mut self) -> &mut Option<WhittleEstimate> {
        &mut self.results
    }
}

/// Reject series the trend explains exactly.
fn check_residual_energy(series: ArrayView1<f64>, trend: &PolynomialTrend) -> WhittleResult<()> {
    let total: f64 = series.iter().map(|v| v * v).sum();
    let residual: f64 = trend.residuals.iter().map(|r| r * r).sum();
    if residual <= DEGENERACY_TOL * total {
        return Err(WhittleError::DegeneratePeriodogram {
            reason: "Series is an exact polynomial of the trend order.",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        optimization::scalar_optimizer::OptimizerOptions,
        whittle::core::options::ELW_DEFAULT_BOUNDS,
    };
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Trend bookkeeping on the estimate.
    // - The iteration cap and convergence flag.
    // - Exact polynomial input.
    // - Per-call options on the stateful path.
    // -------------------------------------------------------------------------

    fn noisy(n: usize) -> Array1<f64> {
        Array1::from_iter((1..=n).map(|t| ((t as f64) * 12.9898).sin() * 43_758.545_3 % 1.0))
    }

    #[test]
    // Purpose
    // -------
    // A single-stage fit reports the trend record and a weighted mean.
    //
    // Given
    // -----
    // - Noise plus 3 + 0.05 t, default options (linear trend, one stage).
    //
    // Expect
    // ------
    // - Trend order 1, one iteration, converged, slope ≈ 0.05, the first
    //   stage inside the bounds.
    fn single_stage_reports_trend() {
        // Arrange
        let x = Array1::from_iter(noisy(400).iter().enumerate().map(|(t, &e)| {
            3.0 + 0.05 * (t + 1) as f64 + e
        }));
        let two = TwoStepElw::default();

        // Act
        let est = two.estimate(x.view(), None).expect("valid input");

        // Assert
        let trend = est.trend.as_ref().expect("two-step reports a trend");
        assert_eq!(trend.order, 1);
        assert_eq!(trend.iterations, 1);
        assert!(trend.converged);
        assert!((trend.coefficients[1] - 0.05).abs() < 0.01);
        assert!((-1.0..=3.0).contains(&trend.d_first_stage));
        assert!(est.mean.is_some());
        assert_eq!(est.method, Method::TwoStepElw);
    }

    #[test]
    // Purpose
    // -------
    // The iteration stops within the cap and flags whether tolerance was
    // met.
    //
    // Given
    // -----
    // - Cap 3 with a loose tolerance, cap 2 with an impossible tolerance.
    //
    // Expect
    // ------
    // - At most 3 stages; the second run uses 2 stages and is not converged.
    fn iteration_respects_cap() {
        // Arrange
        let x = Array1::from_iter(noisy(300).iter().enumerate().map(|(t, &e)| {
            0.01 * (t as f64) + e
        }));
        let opt = OptimizerOptions::default();
        let loose = TwoStepOptions::new(ELW_DEFAULT_BOUNDS, 1, 3, 0.5, opt.clone(), false)
            .expect("valid options");
        let strict = TwoStepOptions::new(ELW_DEFAULT_BOUNDS, 1, 2, 1e-300, opt, false)
            .expect("valid options");

        // Act
        let a = TwoStepElw::new(loose).estimate(x.view(), None).expect("valid");
        let b = TwoStepElw::new(strict).estimate(x.view(), None).expect("valid");

        // Assert
        let ta = a.trend.expect("trend");
        let tb = b.trend.expect("trend");
        assert!(ta.iterations <= 3);
        assert!(ta.converged);
        assert_eq!(tb.iterations, 2);
        assert!(!tb.converged);
    }

    #[test]
    // Purpose
    // -------
    // An exact line leaves nothing to estimate.
    //
    // Given
    // -----
    // - x_t = 1 + 2t, linear trend.
    //
    // Expect
    // ------
    // - `DegeneratePeriodogram`.
    fn exact_polynomial_is_degenerate() {
        let x = Array1::from_iter((1..=100).map(|t| 1.0 + 2.0 * t as f64));
        assert!(matches!(
            TwoStepElw::default().estimate(x.view(), None),
            Err(WhittleError::DegeneratePeriodogram { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // A stateful fit under a per-call trend order stores the stateless
    // record for the same options.
    //
    // Given
    // -----
    // - Default two-step estimator; per-call options demeaning only
    //   (order 0) with two trend stages.
    //
    // Expect
    // ------
    // - Equal records; the stored trend has order 0 and one coefficient;
    //   the stored options keep the linear default.
    fn fit_with_uses_per_call_trend_order() {
        // Arrange
        let x = Array1::from_iter(noisy(320).iter().map(|&e| 4.0 + e));
        let per_call = TwoStepOptions::new(
            ELW_DEFAULT_BOUNDS,
            0,
            2,
            1e-4,
            OptimizerOptions::default(),
            false,
        )
        .expect("valid options");
        let mut two = TwoStepElw::default();

        // Act
        let stateless = two.estimate_with(x.view(), None, &per_call).expect("valid");
        let fitted = two.fit_with(x.view(), None, &per_call).expect("valid").clone();

        // Assert
        assert_eq!(stateless, fitted);
        let trend = fitted.trend.expect("trend");
        assert_eq!((trend.order, trend.coefficients.len()), (0, 1));
        assert_eq!(two.options.trend_order, 1);
    }
}
