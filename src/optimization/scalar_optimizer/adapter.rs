//! Adapter that exposes a [`ScalarObjective`] as an `argmin` problem.
//!
//! The adapter enforces the search interval and absorbs evaluation failures:
//! a candidate outside the bounds is never handed to the objective, and an
//! objective error or non-finite value is recorded in a shared
//! [`EvalLog`] and replaced by [`FAILED_EVAL_COST`]. The solver therefore
//! moves away from bad regions instead of aborting, and the runner can later
//! report the run as not converged.
use std::cell::{Cell, RefCell};

use crate::optimization::{
    errors::OptError,
    scalar_optimizer::{
        traits::{Bounds, ScalarObjective},
        types::{Cost, FAILED_EVAL_COST},
    },
};
use argmin::core::{CostFunction, Error};

/// Record of evaluations that had to be replaced during one run.
///
/// Keeps the first error verbatim (for reporting when nothing succeeded) and
/// a running count of failures.
#[derive(Debug, Default)]
pub struct EvalLog {
    first: RefCell<Option<OptError>>,
    failures: Cell<u64>,
}

impl EvalLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `err` if it is the first failure and bump the counter.
    pub fn record(&self, err: OptError) {
        let mut slot = self.first.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
        self.failures.set(self.failures.get() + 1);
    }

    pub fn failures(&self) -> u64 {
        self.failures.get()
    }

    /// Take the first recorded error, if any.
    pub fn take_first(&self) -> Option<OptError> {
        self.first.borrow_mut().take()
    }
}

/// Bridges a [`ScalarObjective`] to `argmin`'s `CostFunction`.
///
/// - Candidates outside `bounds` are rejected without evaluation.
/// - Failed or non-finite evaluations are logged and replaced.
pub struct ArgMinAdapter<'a, O: ScalarObjective + ?Sized> {
    pub objective: &'a O,
    pub bounds: Bounds,
    pub log: &'a EvalLog,
}

impl<'a, O: ScalarObjective + ?Sized> ArgMinAdapter<'a, O> {
    /// Construct a new adapter over an objective, its search interval and a
    /// shared failure log.
    pub fn new(objective: &'a O, bounds: Bounds, log: &'a EvalLog) -> Self {
        Self { objective, bounds, log }
    }

    /// Evaluate with bound enforcement and failure substitution.
    ///
    /// Shared by the Argmin `cost` entry point and the grid pre-scan so both
    /// count and treat failures identically.
    pub fn guarded_value(&self, d: f64) -> Cost {
        if !self.bounds.contains(d) {
            self.log.record(OptError::OutOfBounds {
                value: d,
                lower: self.bounds.lower(),
                upper: self.bounds.upper(),
            });
            return FAILED_EVAL_COST;
        }
        match self.objective.value(d) {
            Ok(value) if value.is_finite() => value,
            Ok(value) => {
                self.log.record(OptError::NonFiniteCost { value });
                FAILED_EVAL_COST
            }
            Err(err) => {
                self.log.record(err);
                FAILED_EVAL_COST
            }
        }
    }
}

impl<'a, O: ScalarObjective + ?Sized> CostFunction for ArgMinAdapter<'a, O> {
    type Param = f64;
    type Output = Cost;

    fn cost(&self, d: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.guarded_value(*d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Bound enforcement before the objective is called.
    // - Substitution and logging of failed / non-finite evaluations.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that an out-of-bounds candidate never reaches the objective.
    //
    // Given
    // -----
    // - An objective that panics if called.
    // - Bounds [0, 1] and a candidate 1.5.
    //
    // Expect
    // ------
    // - The penalty cost is returned and an `OutOfBounds` error is logged.
    fn out_of_bounds_candidate_is_not_evaluated() {
        // Arrange
        let objective = |_d: f64| -> OptResult<f64> { panic!("must not be evaluated") };
        let bounds = Bounds::new(0.0, 1.0).expect("valid bounds");
        let log = EvalLog::new();
        let adapter = ArgMinAdapter::new(&objective, bounds, &log);

        // Act
        let cost = adapter.cost(&1.5).expect("cost never errors");

        // Assert
        assert_eq!(cost, FAILED_EVAL_COST);
        assert_eq!(log.failures(), 1);
        assert!(matches!(log.take_first(), Some(OptError::OutOfBounds { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify that errors and non-finite values are replaced and counted, with
    // the first error retained.
    //
    // Given
    // -----
    // - An objective returning an error for d < 0.5 and NaN otherwise.
    //
    // Expect
    // ------
    // - Two failures logged; the retained error is the first one.
    fn failed_evaluations_are_logged_and_replaced() {
        // Arrange
        let objective = |d: f64| -> OptResult<f64> {
            if d < 0.5 {
                Err(OptError::ObjectiveFailed { text: "left".to_string() })
            } else {
                Ok(f64::NAN)
            }
        };
        let bounds = Bounds::new(0.0, 1.0).expect("valid bounds");
        let log = EvalLog::new();
        let adapter = ArgMinAdapter::new(&objective, bounds, &log);

        // Act
        let a = adapter.guarded_value(0.1);
        let b = adapter.guarded_value(0.9);

        // Assert
        assert_eq!((a, b), (FAILED_EVAL_COST, FAILED_EVAL_COST));
        assert_eq!(log.failures(), 2);
        assert_eq!(log.take_first(), Some(OptError::ObjectiveFailed { text: "left".to_string() }));
    }
}
