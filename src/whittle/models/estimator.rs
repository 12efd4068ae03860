//! Shared estimator surface: the stateless/stateful duality and the pieces
//! of result assembly every facade repeats.
//!
//! Every estimator implements [`WhittleEstimator::estimate_with`], a pure
//! function of `(series, m, options)`. `estimate` applies the stored options
//! and `fit` stores the record `estimate` would have returned, so the two
//! paths can never disagree. The `_with` variants take per-call options
//! in place of the stored ones; `fit_with` stores the record
//! `estimate_with` returns for the same options.
use crate::{
    inference::standard_errors::StandardErrors,
    optimization::scalar_optimizer::ScalarOutcome,
    whittle::{
        core::{
            results::{Method, WhittleEstimate},
            taper::Taper,
        },
        errors::{WhittleError, WhittleResult},
    },
};
use ndarray::ArrayView1;
use std::time::{Duration, Instant};

/// Common interface of the LW, ELW and two-step ELW facades.
///
/// Implementors provide the pure estimation function and access to their
/// options and result slot; everything else is shared.
pub trait WhittleEstimator {
    type Options: Clone;

    /// Estimate `d` for `series` with bandwidth `m` (default rule if `None`)
    /// under explicit `options`.
    fn estimate_with(
        &self, series: ArrayView1<f64>, m: Option<usize>, options: &Self::Options,
    ) -> WhittleResult<WhittleEstimate>;

    /// Options used by `estimate` and `fit`.
    fn options(&self) -> &Self::Options;

    /// Last stored result, if any.
    fn stored(&self) -> Option<&WhittleEstimate>;

    /// Mutable access to the result slot.
    fn stored_mut(&mut self) -> &mut Option<WhittleEstimate>;

    /// Stateless estimation with the stored options.
    fn estimate(
        &self, series: ArrayView1<f64>, m: Option<usize>,
    ) -> WhittleResult<WhittleEstimate> {
        self.estimate_with(series, m, self.options())
    }

    /// `estimate_with` plus the wall-clock time the call took.
    fn estimate_timed_with(
        &self, series: ArrayView1<f64>, m: Option<usize>, options: &Self::Options,
    ) -> WhittleResult<(WhittleEstimate, Duration)> {
        let start = Instant::now();
        let estimate = self.estimate_with(series, m, options)?;
        Ok((estimate, start.elapsed()))
    }

    /// Keep `estimate` as the fitted record, replacing any previous one.
    fn store(&mut self, estimate: WhittleEstimate) -> &WhittleEstimate {
        self.stored_mut().insert(estimate)
    }

    /// Estimate and keep the record; a re-fit overwrites it.
    fn fit(
        &mut self, series: ArrayView1<f64>, m: Option<usize>,
    ) -> WhittleResult<&WhittleEstimate> {
        let estimate = self.estimate(series, m)?;
        Ok(self.store(estimate))
    }

    /// `fit` under per-call `options`; the stored options are untouched.
    fn fit_with(
        &mut self, series: ArrayView1<f64>, m: Option<usize>, options: &Self::Options,
    ) -> WhittleResult<&WhittleEstimate> {
        let estimate = self.estimate_with(series, m, options)?;
        Ok(self.store(estimate))
    }

    /// # Errors
    /// [`WhittleError::ModelNotFitted`] before the first successful `fit`.
    fn results(&self) -> WhittleResult<&WhittleEstimate> {
        self.stored().ok_or(WhittleError::ModelNotFitted)
    }

    fn n(&self) -> WhittleResult<usize> {
        Ok(self.results()?.n)
    }

    fn m(&self) -> WhittleResult<usize> {
        Ok(self.results()?.m)
    }

    fn d_hat(&self) -> WhittleResult<f64> {
        Ok(self.results()?.d_hat)
    }

    fn se(&self) -> WhittleResult<f64> {
        Ok(self.results()?.se)
    }

    fn ase(&self) -> WhittleResult<f64> {
        Ok(self.results()?.ase)
    }

    fn objective(&self) -> WhittleResult<f64> {
        Ok(self.results()?.objective)
    }

    fn nfev(&self) -> WhittleResult<usize> {
        Ok(self.results()?.nfev)
    }
}

/// Fields of an estimate that do not come from the optimizer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EstimateContext {
    pub method: Method,
    pub n: usize,
    pub m: usize,
    pub taper: Taper,
    pub diff: usize,
}

/// Assemble a record from an optimizer outcome on the differenced scale.
///
/// `d_hat` is shifted back by `diff`; `mean` and `trend` are left empty.
pub(crate) fn assemble_estimate(
    ctx: EstimateContext, outcome: ScalarOutcome, ses: StandardErrors,
) -> WhittleEstimate {
    WhittleEstimate {
        n: ctx.n,
        m: ctx.m,
        d_hat: outcome.d_hat + ctx.diff as f64,
        se: ses.se,
        ase: ses.ase,
        objective: outcome.value,
        nfev: outcome.nfev,
        converged: outcome.converged,
        status: outcome.status,
        iterations: outcome.iterations,
        method: ctx.method,
        taper: ctx.taper,
        diff: ctx.diff,
        mean: None,
        trend: None,
    }
}

/// Emit the per-call diagnostics: a warning on non-convergence, a summary
/// line when `verbose`.
pub(crate) fn log_estimate(estimate: &WhittleEstimate, verbose: bool) {
    if !estimate.converged {
        log::warn!(
            "{}: optimizer did not converge ({}); returning best point d = {:.6}",
            estimate.method,
            estimate.status,
            estimate.d_hat
        );
    }
    if verbose {
        log::info!(
            "{}: n = {}, m = {}, d_hat = {:.6}, se = {:.6}, R = {:.6}, nfev = {}",
            estimate.method,
            estimate.n,
            estimate.m,
            estimate.d_hat,
            estimate.se,
            estimate.objective,
            estimate.nfev
        );
    }
}
