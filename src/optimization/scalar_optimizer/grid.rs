//! Equispaced grid pre-scan used to bracket the refinement step.
//!
//! The scan evaluates the objective on `points` equally spaced nodes that
//! include both bounds, picks the *leftmost* node with the smallest value,
//! and returns the bracket formed by its neighbors. Flat or multimodal
//! objectives therefore resolve towards the lower end of the interval.
use crate::optimization::{
    errors::OptResult,
    scalar_optimizer::{
        adapter::ArgMinAdapter,
        traits::{Bounds, ScalarObjective},
        types::Cost,
    },
};

/// Result of a grid pre-scan.
#[derive(Debug, Clone, PartialEq)]
pub struct GridScan {
    pub best_d: f64,
    pub best_value: Cost,
    pub bracket: Bounds,
    pub evaluations: usize,
}

/// Evaluate the adapter's objective on an equispaced grid over its bounds.
///
/// Parameters
/// ----------
/// - `adapter`: bounded, failure-absorbing view of the objective.
/// - `points`: number of nodes, at least 3 (validated by
///   `OptimizerOptions::new`).
///
/// Returns
/// -------
/// The leftmost best node, its value, the bracket `[x_{k-1}, x_{k+1}]`
/// (clipped at the ends) and the number of evaluations spent.
///
/// Errors
/// ------
/// Only if the bracket cannot be represented as valid [`Bounds`], which
/// requires adjacent nodes to coincide numerically.
pub fn grid_scan<O>(adapter: &ArgMinAdapter<'_, O>, points: usize) -> OptResult<GridScan>
where
    O: ScalarObjective + ?Sized,
{
    let bounds = adapter.bounds;
    let last = points - 1;
    let step = bounds.width() / last as f64;
    let nodes: Vec<f64> = (0..points)
        .map(|i| if i == last { bounds.upper() } else { bounds.lower() + i as f64 * step })
        .collect();
    let values: Vec<Cost> = nodes.iter().map(|&d| adapter.guarded_value(d)).collect();

    let mut best = 0;
    for (i, &value) in values.iter().enumerate().skip(1) {
        if value < values[best] {
            best = i;
        }
    }
    let bracket = Bounds::new(nodes[best.saturating_sub(1)], nodes[(best + 1).min(last)])?;
    Ok(GridScan { best_d: nodes[best], best_value: values[best], bracket, evaluations: points })
}
