//! Local Whittle estimator (Robinson 1995), optionally tapered and
//! differenced.
//!
//! Steps for one call:
//! 1. Validate the series and resolve `m` against the post-difference
//!    length and the taper stride.
//! 2. Difference `diff` times and build the tapered periodogram.
//! 3. Minimize the LW objective over the bounds shifted by `−diff`.
//! 4. Shift the estimate back by `+diff` and attach standard errors scaled
//!    by the taper's variance factor.
use crate::{
    inference::standard_errors::standard_errors,
    optimization::scalar_optimizer::minimize,
    whittle::{
        core::{
            bandwidth::resolve_bandwidth,
            data::{MIN_OBSERVATIONS, validate_series},
            objective::LwObjective,
            options::LwOptions,
            periodogram::build_periodogram,
            results::{Method, WhittleEstimate},
        },
        errors::{WhittleError, WhittleResult},
        models::estimator::{EstimateContext, WhittleEstimator, assemble_estimate, log_estimate},
    },
};
use ndarray::ArrayView1;

/// Local Whittle estimator.
///
/// Holds its options and, after [`fit`](WhittleEstimator::fit), the last
/// estimate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalWhittle {
    /// Estimation options.
    pub options: LwOptions,
    /// Last fit (populated by `fit`).
    pub results: Option<WhittleEstimate>,
}

impl LocalWhittle {
    pub fn new(options: LwOptions) -> Self {
        Self { options, results: None }
    }
}

impl WhittleEstimator for LocalWhittle {
    type Options = LwOptions;

    fn estimate_with(
        &self, series: ArrayView1<f64>, m: Option<usize>, options: &LwOptions,
    ) -> WhittleResult<WhittleEstimate> {
        validate_series(series, MIN_OBSERVATIONS)?;
        let diff = options.diff();
        let n = series.len().saturating_sub(diff);
        if n < MIN_OBSERVATIONS {
            return Err(WhittleError::InsufficientData { len: n, min: MIN_OBSERVATIONS });
        }
        let m = resolve_bandwidth(m, n, options.taper.stride())?;
        if options.verbose {
            log::debug!("LW: n = {n}, m = {m}, taper = {}, diff = {diff}", options.taper);
        }

        let periodogram = build_periodogram(series, m, diff, options.taper)?;
        let objective = LwObjective::new(&periodogram)?;
        let bounds = options.bounds.shift(-(diff as f64))?;
        let outcome = minimize(&objective, &bounds, None, &options.optimizer)?;
        let ses = standard_errors(periodogram.log_freqs.view(), options.taper.variance_factor())?;

        let ctx =
            EstimateContext { method: Method::LocalWhittle, n, m, taper: options.taper, diff };
        let estimate = assemble_estimate(ctx, outcome, ses);
        log_estimate(&estimate, options.verbose);
        Ok(estimate)
    }

    fn options(&self) -> &LwOptions {
        &self.options
    }

    fn stored(&self) -> Option<&WhittleEstimate> {
        self.results.as_ref()
    }

    fn stored_mut(&mut self) -> &mut Option<WhittleEstimate> {
        &mut self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        optimization::scalar_optimizer::{Bounds, OptimizerOptions},
        whittle::core::taper::Taper,
    };
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The fitted/unfitted state machine, with stored and per-call options.
    // - Bounds, differencing and taper bookkeeping on the estimate.
    // - Error propagation for bad inputs.
    //
    // Statistical accuracy is covered by the integration tests.
    // -------------------------------------------------------------------------

    fn noisy(n: usize) -> Array1<f64> {
        // Deterministic, aperiodic, roughly white.
        Array1::from_iter((1..=n).map(|t| ((t as f64) * 12.9898).sin() * 43_758.545_3 % 1.0))
    }

    #[test]
    // Purpose
    // -------
    // Accessors error before `fit` and agree with `estimate` after.
    //
    // Given
    // -----
    // - Default LW, a 300-point series.
    //
    // Expect
    // ------
    // - `ModelNotFitted` first; then identical d̂, se, ase and objective.
    fn fit_stores_what_estimate_returns() {
        // Arrange
        let x = noisy(300);
        let mut lw = LocalWhittle::default();

        // Act
        let before = lw.d_hat();
        let stateless = lw.estimate(x.view(), None).expect("valid input");
        let fitted = lw.fit(x.view(), None).expect("valid input").clone();

        // Assert
        assert_eq!(before, Err(WhittleError::ModelNotFitted));
        assert_eq!(stateless, fitted);
        assert_eq!(lw.d_hat().expect("fitted"), stateless.d_hat);
        assert_eq!(lw.se().expect("fitted"), stateless.se);
        assert_eq!(lw.nfev().expect("fitted"), stateless.nfev);
    }

    #[test]
    // Purpose
    // -------
    // Per-call options reach both the stateless and the stateful path and
    // leave the stored options alone.
    //
    // Given
    // -----
    // - Default LW; per-call options with the HC taper, one difference and
    //   bounds (-0.4, 1.8); a 300-point random walk.
    //
    // Expect
    // ------
    // - `fit_with` stores exactly the `estimate_with` record; the timed
    //   variant returns it too with a non-zero duration; the record
    //   reflects the per-call taper;
    //   `n` and `m` read back; the stored options are still the defaults.
    fn fit_with_matches_estimate_with_under_overrides() {
        // Arrange
        let walk = crate::whittle::core::transforms::cumsum(noisy(300).view());
        let mut lw = LocalWhittle::default();
        let per_call = LwOptions::new(
            Bounds::new(-0.4, 1.8).expect("valid"),
            Taper::HurvichChen,
            Some(1),
            OptimizerOptions::default(),
            false,
        );

        // Act
        let stateless = lw.estimate_with(walk.view(), Some(30), &per_call).expect("valid");
        let (timed, elapsed) =
            lw.estimate_timed_with(walk.view(), Some(30), &per_call).expect("valid");
        let fitted = lw.fit_with(walk.view(), Some(30), &per_call).expect("valid").clone();

        // Assert
        assert_eq!(stateless, fitted);
        assert_eq!(stateless, timed);
        assert!(elapsed > std::time::Duration::ZERO);
        assert_eq!((fitted.taper, fitted.diff, fitted.n), (Taper::HurvichChen, 1, 299));
        assert!((-0.4..=1.8).contains(&fitted.d_hat));
        assert_eq!(lw.n().expect("fitted"), 299);
        assert_eq!(lw.m().expect("fitted"), 30);
        assert_eq!(lw.options, LwOptions::default());
    }

    #[test]
    // Purpose
    // -------
    // Check the Hurvich–Chen path differences once and reports d on the
    // original scale, within the original bounds.
    //
    // Given
    // -----
    // - A random walk built from the noisy series, HC taper, default diff.
    //
    // Expect
    // ------
    // - diff = 1, n = len − 1, d̂ inside (-0.5, 2.0), se scaled by √1.5.
    fn hurvich_chen_reports_original_scale() {
        // Arrange
        let walk = crate::whittle::core::transforms::cumsum(noisy(400).view());
        let options = LwOptions::new(
            Bounds::new(-0.5, 2.0).expect("valid"),
            Taper::HurvichChen,
            None,
            OptimizerOptions::default(),
            false,
        );
        let lw = LocalWhittle::new(options);

        // Act
        let est = lw.estimate(walk.view(), Some(40)).expect("valid input");

        // Assert
        assert_eq!(est.diff, 1);
        assert_eq!(est.n, 399);
        assert!((-0.5..=2.0).contains(&est.d_hat));
        assert!((est.ase - (1.5f64 / 160.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid inputs surface as typed errors.
    //
    // Given
    // -----
    // - A NaN entry, m = 0, a constant series, too short a series for
    //   `diff = 2`.
    //
    // Expect
    // ------
    // - `InvalidData`, `InvalidBandwidth`, `DegeneratePeriodogram`,
    //   `InsufficientData`.
    fn invalid_inputs_are_reported() {
        // Arrange
        let lw = LocalWhittle::default();
        let mut with_nan = noisy(50);
        with_nan[7] = f64::NAN;
        let flat = Array1::from_elem(100, 1.0);
        let short_opts = LwOptions { diff: Some(2), ..LwOptions::default() };

        // Act & Assert
        assert!(matches!(
            lw.estimate(with_nan.view(), None),
            Err(WhittleError::InvalidData { index: 7, .. })
        ));
        assert!(matches!(
            lw.estimate(noisy(50).view(), Some(0)),
            Err(WhittleError::InvalidBandwidth { m: 0, .. })
        ));
        assert!(matches!(
            lw.estimate(flat.view(), None),
            Err(WhittleError::DegeneratePeriodogram { .. })
        ));
        assert!(matches!(
            lw.estimate_with(noisy(5).view(), None, &short_opts),
            Err(WhittleError::InsufficientData { len: 3, min: 4 })
        ));
    }
}
