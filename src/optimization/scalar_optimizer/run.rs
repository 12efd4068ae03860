//! Execution helper that runs an `argmin` solver on a scalar problem and
//! returns a crate-friendly [`ScalarOutcome`].
use crate::optimization::{
    errors::OptResult,
    scalar_optimizer::{
        adapter::{ArgMinAdapter, EvalLog},
        traits::{OptimizerOptions, ScalarObjective, ScalarOutcome},
        types::ScalarState,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, Solver, State};

/// Run an `argmin` solver for a bounded scalar problem.
///
/// This is the shared runner for every solver variant. It wires up:
/// - the objective via [`ArgMinAdapter`],
/// - the chosen `Solver` (Brent or golden-section),
/// - the initial point `init` (used by golden-section, ignored by Brent),
/// - optional observers (behind the `obs_slog` feature),
/// - `max_iters` from `opts.tols`,
///   then executes the solver and converts the final state into
///   [`ScalarOutcome`].
///
/// # Arguments
/// - `init`: Starting point, assumed inside the adapter's bounds.
/// - `opts`: Optimizer options (tolerances, verbosity).
/// - `problem`: An [`ArgMinAdapter`] sharing `log` with the caller.
/// - `solver`: A fully constructed solver from the builders module.
/// - `log`: The failure log the adapter writes into.
///
/// # Feature flags
/// With `obs_slog` enabled and `opts.verbose == true`, a terminal slog
/// observer is attached with `ObserverMode::Always` and the objective at
/// `init` is printed once before the first iteration.
///
/// # Errors
/// - Propagates any `argmin` runtime error via `From<argmin::core::Error>`.
/// - Propagates validation errors from [`ScalarOutcome::new`].
pub fn run_scalar<'a, O, S>(
    init: f64, opts: &OptimizerOptions, problem: ArgMinAdapter<'a, O>, solver: S, log: &EvalLog,
) -> OptResult<ScalarOutcome>
where
    O: ScalarObjective + ?Sized,
    S: Solver<ArgMinAdapter<'a, O>, ScalarState>,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(init, &problem)?;
    }
    let max_iters = opts.tols.max_iter as u64;
    let optimizer =
        Executor::new(problem, solver).configure(|state| state.param(init).max_iters(max_iters));
    #[cfg(feature = "obs_slog")]
    let optimizer = if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always)
    } else {
        optimizer
    };

    let result = optimizer.run()?;
    let state = result.state();
    ScalarOutcome::new(
        state.get_best_param().copied(),
        state.get_best_cost(),
        state.get_termination_status().clone(),
        state.get_iter(),
        state.get_func_counts().clone(),
        log.failures(),
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<O>(init: f64, problem: &ArgMinAdapter<'_, O>) -> OptResult<()>
where
    O: ScalarObjective + ?Sized,
{
    let r0 = problem.cost(&init)?;
    eprintln!("init: R(d0 = {init:.6}) = {r0:.6}");
    Ok(())
}
