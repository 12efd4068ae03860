//! Bandwidth (number of Fourier frequencies) selection and validation.
//!
//! A bandwidth `m` is valid for an effective sample size `n` when
//! `1 ≤ m`, `2m < n`, and at least one frequency survives the taper stride
//! (`m ≥ stride`). An explicit invalid `m` is always an error; only the
//! default rule clamps.
use crate::whittle::errors::{WhittleError, WhittleResult};

/// Exponent of the default rule `m = round(n^0.65)`.
pub const DEFAULT_BANDWIDTH_EXPONENT: f64 = 0.65;

/// Largest valid bandwidth for `n` observations, `⌈n/2⌉ − 1`.
pub fn max_bandwidth(n: usize) -> usize {
    n.saturating_sub(1) / 2
}

/// `round(n^0.65)` clamped into `[stride, max_bandwidth(n)]`.
pub fn default_bandwidth(n: usize, stride: usize) -> usize {
    let raw = (n as f64).powf(DEFAULT_BANDWIDTH_EXPONENT).round() as usize;
    raw.min(max_bandwidth(n)).max(stride.max(1))
}

/// Check `m` against `n` and the taper stride.
///
/// # Errors
/// [`WhittleError::InvalidBandwidth`] naming the violated condition.
pub fn validate_bandwidth(m: usize, n: usize, stride: usize) -> WhittleResult<()> {
    if m == 0 {
        return Err(WhittleError::InvalidBandwidth {
            m,
            n,
            reason: "Bandwidth must be at least 1.",
        });
    }
    if 2 * m >= n {
        return Err(WhittleError::InvalidBandwidth {
            m,
            n,
            reason: "Bandwidth must satisfy 2m < n.",
        });
    }
    if m < stride {
        return Err(WhittleError::InvalidBandwidth {
            m,
            n,
            reason: "Bandwidth leaves no frequency on the taper grid.",
        });
    }
    Ok(())
}

/// Use `m` if given, the default rule otherwise; validate either way.
pub fn resolve_bandwidth(m: Option<usize>, n: usize, stride: usize) -> WhittleResult<usize> {
    let m = m.unwrap_or_else(|| default_bandwidth(n, stride));
    validate_bandwidth(m, n, stride)?;
    Ok(m)
}
