//! Adaptive kernel-density p-value estimation.
//!
//! Scores how extreme an observation is relative to the empirical
//! distribution of a window of recent values. The window is treated as a
//! sample from an unknown distribution, smoothed by a Gaussian kernel whose
//! bandwidth adapts to the sample spread, so nothing assumes the data itself
//! is Gaussian.

use crate::utils::stats::{iqr, median, std_dev};
use statrs::distribution::{ContinuousCDF, Normal};

/// Minimum number of window samples required for density estimation.
const MIN_SAMPLES: usize = 2;

/// Two-sided p-value of `value` against the window's empirical distribution.
///
/// Returns the probability, under a Gaussian-kernel density estimate of the
/// window, of drawing a value at least as far from the window median as
/// `value` is. Always in `[0, 1]` and deterministic for fixed inputs.
///
/// Windows with fewer than [`MIN_SAMPLES`] values carry no evidence and
/// yield 1.0. A zero-spread window (all values identical) is a point mass:
/// the p-value is 1.0 when `value` equals the constant and 0.0 otherwise.
pub fn empirical_p_value(window: &[f64], value: f64) -> f64 {
    if window.len() < MIN_SAMPLES {
        return 1.0;
    }

    let center = median(window);
    let deviation = (value - center).abs();

    let bandwidth = match kernel_bandwidth(window) {
        Some(h) => h,
        None => return if deviation == 0.0 { 1.0 } else { 0.0 },
    };

    // Equal-weight mixture of N(x_i, h^2); the p-value is the mixture's
    // tail mass at distance >= deviation from the center.
    let standard_normal = Normal::new(0.0, 1.0).unwrap();
    let upper = center + deviation;
    let lower = center - deviation;

    let tail_mass = window
        .iter()
        .map(|&x| {
            let right = 1.0 - standard_normal.cdf((upper - x) / bandwidth);
            let left = standard_normal.cdf((lower - x) / bandwidth);
            right + left
        })
        .sum::<f64>()
        / window.len() as f64;

    tail_mass.clamp(0.0, 1.0)
}

/// Silverman's rule-of-thumb bandwidth, adapted to the window spread.
///
/// Scale is the smaller of the sample standard deviation and IQR / 1.34;
/// when only one of them is positive, that one is used. `None` means the
/// window has no spread at all.
fn kernel_bandwidth(window: &[f64]) -> Option<f64> {
    let sd = std_dev(window);
    let robust = iqr(window) / 1.34;

    let scale = match (sd > 0.0, robust > 0.0) {
        (true, true) => sd.min(robust),
        (true, false) => sd,
        (false, true) => robust,
        (false, false) => return None,
    };

    Some(0.9 * scale * (window.len() as f64).powf(-0.2))
}
