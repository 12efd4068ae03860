//! Estimate records returned by the Whittle estimators.
use crate::{
    inference::standard_errors::confidence_interval,
    whittle::{core::taper::Taper, errors::WhittleResult},
};
use std::fmt;

/// Which estimator produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    LocalWhittle,
    ExactLocalWhittle,
    TwoStepElw,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::LocalWhittle => "LW",
            Method::ExactLocalWhittle => "ELW",
            Method::TwoStepElw => "2ELW",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Polynomial trend removed by the two-step estimator.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendFit {
    /// Polynomial order.
    pub order: usize,
    /// `β_0..β_order` on the `t = 1..n` scale, from the final stage.
    pub coefficients: Vec<f64>,
    /// Tapered LW estimate used to start the ELW stage.
    pub d_first_stage: f64,
    /// ELW stages run.
    pub iterations: usize,
    /// `false` when the iteration cap was hit before successive estimates
    /// agreed to tolerance.
    pub converged: bool,
}

/// Immutable result of one estimation call.
///
/// Fields
/// ------
/// - `n`: sample size the periodogram used (after any differencing).
/// - `m`: bandwidth.
/// - `d_hat`: estimate on the original series' scale.
/// - `se`, `ase`: Fisher-information and asymptotic standard errors.
/// - `objective`: objective value at the optimum.
/// - `nfev`: objective evaluations.
/// - `converged`, `status`, `iterations`: optimizer diagnostics.
/// - `method`, `taper`, `diff`: how the estimate was produced.
/// - `mean`: ELW mean correction at `d_hat`.
/// - `trend`: two-step trend fit.
#[derive(Debug, Clone, PartialEq)]
pub struct WhittleEstimate {
    pub n: usize,
    pub m: usize,
    pub d_hat: f64,
    pub se: f64,
    pub ase: f64,
    pub objective: f64,
    pub nfev: usize,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub method: Method,
    pub taper: Taper,
    pub diff: usize,
    pub mean: Option<f64>,
    pub trend: Option<TrendFit>,
}

impl WhittleEstimate {
    /// Two-sided normal interval `d̂ ± z · se` at `level`.
    ///
    /// # Errors
    /// Inference errors for a level outside `(0, 1)`.
    pub fn confidence_interval(&self, level: f64) -> WhittleResult<(f64, f64)> {
        Ok(confidence_interval(self.d_hat, self.se, level)?)
    }
}
