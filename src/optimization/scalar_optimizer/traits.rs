//! Public API surface for bounded scalar minimization.
//!
//! - [`ScalarObjective`]: the objective a caller hands to the optimizer.
//! - [`Bounds`]: validated search interval.
//! - [`OptimizerOptions`] and [`Tolerances`]: optimizer configuration.
//! - [`ScalarSolver`]: choice of derivative-free Argmin solver.
//! - [`ScalarOutcome`]: normalized result returned by [`minimize`].
//!
//! Convention: the optimizer *minimizes* the objective directly. Estimators
//! hand over concentrated Whittle objectives, which are already costs.
//!
//! [`minimize`]: crate::optimization::scalar_optimizer::minimize
use crate::optimization::{
    errors::{OptError, OptResult},
    scalar_optimizer::{
        types::{COST_COUNT_KEY, Cost, DEFAULT_MAX_ITER, DEFAULT_XATOL, FnEvalMap},
        validation::{
            validate_best_param, validate_value, verify_bounds, verify_grid_points,
            verify_max_iter, verify_xatol,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use std::str::FromStr;

/// Scalar objective interface.
///
/// Implementors evaluate the objective at a candidate `d`. Invalid candidates
/// and numerical failures are reported as [`OptError`] values; the optimizer
/// treats them as failed evaluations rather than aborting the search.
///
/// Any closure `Fn(f64) -> OptResult<Cost>` is an objective.
pub trait ScalarObjective {
    fn value(&self, d: f64) -> OptResult<Cost>;
}

impl<F> ScalarObjective for F
where
    F: Fn(f64) -> OptResult<Cost>,
{
    fn value(&self, d: f64) -> OptResult<Cost> {
        self(d)
    }
}

/// Closed search interval `[lower, upper]` with `lower < upper`, both finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// Construct validated bounds.
    ///
    /// # Errors
    /// [`OptError::InvalidBounds`] if either end is non-finite or
    /// `lower >= upper`.
    pub fn new(lower: f64, upper: f64) -> OptResult<Self> {
        verify_bounds(lower, upper)?;
        Ok(Self { lower, upper })
    }

    /// Unchecked constructor for compile-time defaults; callers guarantee
    /// finite `lower < upper`.
    pub(crate) const fn from_ordered(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Inclusive membership test.
    pub fn contains(&self, d: f64) -> bool {
        d >= self.lower && d <= self.upper
    }

    /// Clamp `d` into the interval.
    pub fn clamp(&self, d: f64) -> f64 {
        d.clamp(self.lower, self.upper)
    }

    /// Shift both ends by `delta`.
    ///
    /// Used to move bounds between the original and a differenced scale.
    pub fn shift(&self, delta: f64) -> OptResult<Self> {
        Self::new(self.lower + delta, self.upper + delta)
    }
}

/// Choice of derivative-free solver.
///
/// Variants:
/// - `Brent`: Brent's bounded minimizer (parabolic interpolation with
///   golden-section fallback).
/// - `GoldenSection`: plain golden-section search started from an initial
///   estimate.
///
/// Parsing:
/// `FromStr` accepts case-insensitive `"brent"`, `"golden"` or
/// `"goldensection"`. Unknown names return `OptError::InvalidSolver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarSolver {
    Brent,
    GoldenSection,
}

impl FromStr for ScalarSolver {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "brent" => Ok(ScalarSolver::Brent),
            "golden" | "goldensection" => Ok(ScalarSolver::GoldenSection),
            _ => Err(OptError::InvalidSolver {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'brent' or 'golden-section'.",
            }),
        }
    }
}

/// Stopping rules for the scalar solvers.
///
/// - `xatol`: absolute tolerance on the minimizer location. Brent uses it as
///   its absolute tolerance; golden-section uses it as a relative bracket
///   width.
/// - `max_iter`: hard cap on solver iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub xatol: f64,
    pub max_iter: usize,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::InvalidXTol`] for a non-finite or non-positive `xatol`.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(xatol: f64, max_iter: usize) -> OptResult<Self> {
        verify_xatol(xatol)?;
        verify_max_iter(max_iter)?;
        Ok(Self { xatol, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { xatol: DEFAULT_XATOL, max_iter: DEFAULT_MAX_ITER }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `solver: ScalarSolver` — Argmin solver used for the refinement.
/// - `tols: Tolerances` — stopping rules.
/// - `grid_points: Option<usize>` — if set, evaluate an equispaced grid over
///   the bounds first and refine only around the leftmost best node.
/// - `verbose: bool` — if `true`, attaches an observer (behind the
///   `obs_slog` feature) and prints the initial objective value.
///
/// Default: Brent, default tolerances, no grid, quiet.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerOptions {
    pub solver: ScalarSolver,
    pub tols: Tolerances,
    pub grid_points: Option<usize>,
    pub verbose: bool,
}

impl OptimizerOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// [`OptError::InvalidGridPoints`] if `grid_points` is `Some(k)` with
    /// `k < 3`.
    pub fn new(
        solver: ScalarSolver, tols: Tolerances, grid_points: Option<usize>, verbose: bool,
    ) -> OptResult<Self> {
        verify_grid_points(grid_points)?;
        Ok(Self { solver, tols, grid_points, verbose })
    }
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            solver: ScalarSolver::Brent,
            tols: Tolerances::default(),
            grid_points: None,
            verbose: false,
        }
    }
}

/// Canonical result returned by `minimize`.
///
/// - `d_hat`: best point found, always inside the search bounds.
/// - `value`: objective at `d_hat`.
/// - `converged`: `true` only if the solver met its tolerance and no
///   evaluation had to be replaced.
/// - `status`: human-readable termination status.
/// - `iterations`: solver iterations performed.
/// - `fn_evals`: Argmin's evaluation counters.
/// - `nfev`: total objective evaluations, grid pre-scan included.
/// - `failed_evals`: evaluations that errored or were non-finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarOutcome {
    pub d_hat: f64,
    pub value: Cost,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub nfev: usize,
    pub failed_evals: usize,
}

impl ScalarOutcome {
    /// Build a validated [`ScalarOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `best` check via `validate_best_param`.
    /// - `value` check via `validate_value`.
    /// - Maps `TerminationStatus` into `(converged, status)`: only
    ///   `SolverConverged` counts as converged; an exhausted iteration budget
    ///   does not.
    ///
    /// # Errors
    /// Propagates validation errors for `best` or `value`.
    pub fn new(
        best: Option<f64>, value: Cost, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, failed_evals: u64,
    ) -> OptResult<Self> {
        let d_hat = validate_best_param(best)?;
        validate_value(value)?;
        let solver_converged = matches!(
            termination,
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        let mut status = match termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        if failed_evals > 0 {
            status.push_str(&format!(" ({failed_evals} failed evaluations)"));
        }
        let nfev = fn_evals.get(COST_COUNT_KEY).copied().unwrap_or(0) as usize;
        Ok(Self {
            d_hat,
            value,
            converged: solver_converged && failed_evals == 0,
            status,
            iterations: iterations as usize,
            fn_evals,
            nfev,
            failed_evals: failed_evals as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parsing of `ScalarSolver` names.
    // - Validation in `Bounds`, `Tolerances` and `OptimizerOptions`.
    // - Mapping of termination status into the `converged` flag.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Check that solver names parse case-insensitively.
    //
    // Given
    // -----
    // - "Brent", "GOLDEN-SECTION", "golden" and "nelder-mead".
    //
    // Expect
    // ------
    // - The first three parse; the last is `InvalidSolver`.
    fn scalar_solver_parses_known_names_case_insensitively() {
        // Act & Assert
        assert_eq!("Brent".parse::<ScalarSolver>(), Ok(ScalarSolver::Brent));
        assert_eq!("GOLDEN-SECTION".parse::<ScalarSolver>(), Ok(ScalarSolver::GoldenSection));
        assert_eq!("golden".parse::<ScalarSolver>(), Ok(ScalarSolver::GoldenSection));
        assert!(matches!(
            "nelder-mead".parse::<ScalarSolver>(),
            Err(OptError::InvalidSolver { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Exercise the small helpers on `Bounds`.
    //
    // Given
    // -----
    // - Bounds (-0.5, 2.0).
    //
    // Expect
    // ------
    // - Inclusive membership at both ends, clamping, midpoint and a shift by
    //   -1 that moves both ends.
    fn bounds_helpers_respect_closed_interval() {
        // Arrange
        let bounds = Bounds::new(-0.5, 2.0).expect("valid bounds");

        // Act
        let shifted = bounds.shift(-1.0).expect("shifted bounds stay ordered");

        // Assert
        assert!(bounds.contains(-0.5) && bounds.contains(2.0));
        assert!(!bounds.contains(2.0 + 1e-12));
        assert_eq!(bounds.clamp(3.0), 2.0);
        assert_eq!(bounds.midpoint(), 0.75);
        assert_eq!((shifted.lower(), shifted.upper()), (-1.5, 1.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure an exhausted iteration budget is not reported as convergence.
    //
    // Given
    // -----
    // - Outcomes built with `SolverConverged` and `MaxItersReached`.
    //
    // Expect
    // ------
    // - Only the former has `converged == true`; `nfev` reads `cost_count`.
    fn scalar_outcome_only_solver_convergence_counts() {
        // Arrange
        let mut counts = FnEvalMap::new();
        counts.insert(COST_COUNT_KEY.to_string(), 12);

        // Act
        let ok = ScalarOutcome::new(
            Some(0.3),
            -1.0,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            10,
            counts.clone(),
            0,
        )
        .expect("valid outcome");
        let capped = ScalarOutcome::new(
            Some(0.3),
            -1.0,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            10,
            counts,
            0,
        )
        .expect("valid outcome");

        // Assert
        assert!(ok.converged);
        assert_eq!(ok.nfev, 12);
        assert!(!capped.converged);
    }

    #[test]
    // Purpose
    // -------
    // Ensure replaced evaluations downgrade an otherwise converged run.
    //
    // Given
    // -----
    // - A `SolverConverged` status with two failed evaluations.
    //
    // Expect
    // ------
    // - `converged == false` and the status mentions the failures.
    fn scalar_outcome_failed_evaluations_clear_converged_flag() {
        // Act
        let out = ScalarOutcome::new(
            Some(0.1),
            0.5,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            4,
            FnEvalMap::new(),
            2,
        )
        .expect("valid outcome");

        // Assert
        assert!(!out.converged);
        assert_eq!(out.failed_evals, 2);
        assert!(out.status.contains("2 failed evaluations"));
    }

    #[test]
    // Purpose
    // -------
    // Check option validation defaults and failures.
    //
    // Given
    // -----
    // - Zero iterations, a two-node grid and the defaults.
    //
    // Expect
    // ------
    // - Invalid inputs are rejected; defaults use Brent with no grid.
    fn optimizer_options_validate_inputs() {
        // Act & Assert
        assert!(Tolerances::new(1e-8, 0).is_err());
        assert!(
            OptimizerOptions::new(ScalarSolver::Brent, Tolerances::default(), Some(2), false)
                .is_err()
        );
        let opts = OptimizerOptions::default();
        assert_eq!(opts.solver, ScalarSolver::Brent);
        assert_eq!(opts.grid_points, None);
    }
}
