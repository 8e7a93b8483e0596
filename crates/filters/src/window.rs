//! Trimmed rolling-window statistics.
//!
//! Computes, for every position of a time-ordered price sequence, the mean
//! and standard deviation of the surrounding window after discarding the
//! window's own extreme tails.

use statrs::statistics::Statistics;

/// Per-position trimmed mean and sample standard deviation, with boundary
/// positions filled from the nearest computable window center.
#[derive(Debug, Clone)]
pub struct RollingBand {
    /// Trimmed mean per position.
    pub mean: Vec<f64>,
    /// Trimmed sample standard deviation per position.
    pub std: Vec<f64>,
}

/// Linearly interpolated quantile of an ascending-sorted slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Mean and sample standard deviation of a window after dropping values at or
/// below its `trim_fraction` quantile and at or above its `1 - trim_fraction`
/// quantile.
///
/// A window whose trimmed remainder is empty or a singleton (e.g. a constant
/// window, whose two quantiles coincide) yields NaN statistics; the outlier
/// test treats NaN as no evidence, so such ticks are kept.
pub fn trimmed_stats(window: &[f64], trim_fraction: f64) -> (f64, f64) {
    if window.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let mut sorted = window.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let lower = quantile_sorted(&sorted, trim_fraction);
    let upper = quantile_sorted(&sorted, 1.0 - trim_fraction);

    let trimmed: Vec<f64> = window
        .iter()
        .copied()
        .filter(|&v| v > lower && v < upper)
        .collect();

    (trimmed.iter().mean(), trimmed.iter().std_dev())
}

/// Compute the rolling trimmed band over a single day's price sequence.
///
/// Window centers run from `half` to `n - half - 1` inclusive, each covering
/// exactly `window_width` consecutive prices. Positions before the first
/// center copy the first center's statistics; positions after the last copy
/// the last's. Returns `None` when the day is shorter than the window, in
/// which case no center is computable at all.
pub fn rolling_band(prices: &[f64], window_width: usize, trim_fraction: f64) -> Option<RollingBand> {
    let n = prices.len();
    if n < window_width {
        return None;
    }
    let half = (window_width - 1) / 2;

    let mut mean = vec![f64::NAN; n];
    let mut std = vec![f64::NAN; n];

    for center in half..(n - half) {
        let window = &prices[center - half..=center + half];
        let (m, s) = trimmed_stats(window, trim_fraction);
        mean[center] = m;
        std[center] = s;
    }

    for i in 0..half {
        mean[i] = mean[half];
        std[i] = std[half];
    }
    for i in (n - half)..n {
        mean[i] = mean[n - half - 1];
        std[i] = std[n - half - 1];
    }

    Some(RollingBand { mean, std })
}
