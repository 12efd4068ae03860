//! High-level entry point for bounded scalar minimization.
//!
//! Picks the configured Argmin solver, optionally narrows the search with a
//! grid pre-scan, wraps the objective in an [`ArgMinAdapter`] and delegates
//! the run to [`run_scalar`].
use crate::optimization::{
    errors::{OptError, OptResult},
    scalar_optimizer::{
        adapter::{ArgMinAdapter, EvalLog},
        builders::{build_brent, build_golden_section},
        grid::{GridScan, grid_scan},
        run::run_scalar,
        traits::{Bounds, OptimizerOptions, ScalarObjective, ScalarOutcome, ScalarSolver},
    },
};

/// Minimize a scalar objective over a closed interval.
///
/// # Behavior
/// - With `opts.grid_points = Some(k)`, evaluates a `k`-node grid over
///   `bounds`, then refines inside the bracket around the leftmost best
///   node, starting from that node. The grid point is kept if the
///   refinement does not improve on it.
/// - Otherwise refines over the full `bounds`, starting from `init`
///   (clamped) or the midpoint.
/// - The objective is never evaluated outside `bounds`.
/// - Evaluation failures are absorbed: the run continues and is reported
///   with `converged = false`.
///
/// # Parameters
/// - `objective`: anything implementing [`ScalarObjective`], including
///   closures `Fn(f64) -> OptResult<f64>`.
/// - `bounds`: validated search interval.
/// - `init`: optional starting point (used by golden-section search).
/// - `opts`: solver choice, tolerances, grid and verbosity.
///
/// # Errors
/// - The first recorded evaluation error if **every** evaluation failed.
/// - Builder and Argmin runtime errors.
///
/// # Example
/// ```
/// use rust_elw::optimization::errors::OptResult;
/// use rust_elw::optimization::scalar_optimizer::{Bounds, OptimizerOptions, minimize};
///
/// let f = |d: f64| -> OptResult<f64> { Ok((d - 0.4).powi(2)) };
/// let bounds = Bounds::new(-0.5, 2.0)?;
/// let out = minimize(&f, &bounds, None, &OptimizerOptions::default())?;
/// assert!((out.d_hat - 0.4).abs() < 1e-6);
/// # Ok::<(), rust_elw::optimization::errors::OptError>(())
/// ```
pub fn minimize<O>(
    objective: &O, bounds: &Bounds, init: Option<f64>, opts: &OptimizerOptions,
) -> OptResult<ScalarOutcome>
where
    O: ScalarObjective + ?Sized,
{
    let log = EvalLog::new();
    let scan = match opts.grid_points {
        Some(points) => Some(grid_scan(&ArgMinAdapter::new(objective, *bounds, &log), points)?),
        None => None,
    };
    let (search, start) = match &scan {
        Some(scan) => (scan.bracket, scan.best_d),
        None => (*bounds, bounds.clamp(init.unwrap_or_else(|| bounds.midpoint()))),
    };

    let problem = ArgMinAdapter::new(objective, search, &log);
    let mut outcome = match opts.solver {
        ScalarSolver::Brent => {
            run_scalar(start, opts, problem, build_brent(&search, &opts.tols), &log)?
        }
        ScalarSolver::GoldenSection => {
            run_scalar(start, opts, problem, build_golden_section(&search, &opts.tols)?, &log)?
        }
    };
    if let Some(scan) = scan {
        absorb_grid(&mut outcome, &scan);
    }

    if outcome.failed_evals >= outcome.nfev {
        return Err(log
            .take_first()
            .unwrap_or(OptError::AllEvaluationsFailed { evaluations: outcome.nfev as u64 }));
    }
    Ok(outcome)
}

/// Fold the grid pre-scan into the refined outcome.
fn absorb_grid(outcome: &mut ScalarOutcome, scan: &GridScan) {
    outcome.nfev += scan.evaluations;
    if scan.best_value < outcome.value {
        outcome.d_hat = scan.best_d;
        outcome.value = scan.best_value;
    }
}
