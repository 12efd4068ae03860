//! Shared helpers for the integration tests: a seeded ARFIMA(1, d, 0)
//! simulator built on the crate's own fractional filter.
#![allow(dead_code)]

use ndarray::{Array1, s};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use rust_elw::whittle::core::transforms::fracdiff;

/// Purpose
/// -------
/// Simulate `x_t = (1 − L)^{−d} u_t` with `u_t = φ u_{t−1} + σ ε_t`,
/// `ε_t ~ N(0, 1)`, using the truncated (type II) fractional filter.
///
/// Parameters
/// ----------
/// - `n`: returned length.
/// - `d`: memory parameter; any real value.
/// - `phi`: AR(1) coefficient of the short-memory part.
/// - `sigma`: innovation scale.
/// - `seed`: ChaCha8 seed; equal seeds give equal paths.
/// - `burnin`: leading observations simulated and discarded.
///
/// Returns
/// -------
/// - A length-`n` path. With `burnin = 0` the path starts from zero initial
///   conditions, which is exactly the process the ELW objective models.
pub fn arfima(n: usize, d: f64, phi: f64, sigma: f64, seed: u64, burnin: usize) -> Array1<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let total = n + burnin;
    let mut prev = 0.0;
    let u = Array1::from_iter((0..total).map(|_| {
        let eps: f64 = rng.sample(StandardNormal);
        prev = phi * prev + sigma * eps;
        prev
    }));
    fracdiff(u.view(), -d).slice(s![burnin..]).to_owned()
}

/// ARFIMA(0, d, 0) with unit variance and no burn-in.
pub fn fractional_noise(n: usize, d: f64, seed: u64) -> Array1<f64> {
    arfima(n, d, 0.0, 1.0, seed, 0)
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
