//! Configuration structures for the taq-clean system.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Candidate grid for the robust-band outlier fit.
///
/// Every (window width, slack) combination is scored during the per-symbol
/// grid search; the enumeration order is fixed (slack ascending outer, width
/// ascending inner) because ties between equal-scoring candidates are broken
/// in favor of the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Rolling window widths k (number of ticks, odd).
    pub window_widths: Vec<usize>,
    /// Additive slack thresholds y on the 3-sigma band.
    pub slack_thresholds: Vec<f64>,
    /// Two-sided trim fraction applied to each window before computing
    /// mean and standard deviation.
    pub trim_fraction: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            window_widths: vec![41, 61, 81, 101],
            slack_thresholds: vec![0.02, 0.04, 0.06],
            trim_fraction: 0.1,
        }
    }
}

impl GridConfig {
    /// Validate the grid once, before any per-tick work.
    ///
    /// Even or tiny window widths, negative or non-finite slacks, and trim
    /// fractions outside (0, 0.5) are programmer errors, not data conditions,
    /// so they fail here rather than mid-scan.
    pub fn validate(&self) -> Result<()> {
        if self.window_widths.is_empty() {
            return Err(Error::config("grid has no window widths"));
        }
        for &k in &self.window_widths {
            if k < 3 || k % 2 == 0 {
                return Err(Error::config(format!(
                    "window width {k} must be odd and at least 3"
                )));
            }
        }
        if self.slack_thresholds.is_empty() {
            return Err(Error::config("grid has no slack thresholds"));
        }
        for &y in &self.slack_thresholds {
            if !y.is_finite() || y < 0.0 {
                return Err(Error::config(format!(
                    "slack threshold {y} must be finite and non-negative"
                )));
            }
        }
        if !(self.trim_fraction > 0.0 && self.trim_fraction < 0.5) {
            return Err(Error::config(format!(
                "trim fraction {} must lie in (0, 0.5)",
                self.trim_fraction
            )));
        }
        Ok(())
    }

    /// Enumerate the (k, y) candidates in scan order: slack ascending outer,
    /// width ascending inner.
    pub fn candidates(&self) -> Vec<(usize, f64)> {
        let mut out = Vec::with_capacity(self.window_widths.len() * self.slack_thresholds.len());
        for &y in &self.slack_thresholds {
            for &k in &self.window_widths {
                out.push((k, y));
            }
        }
        out
    }

    /// Smallest window width in the grid.
    pub fn min_window_width(&self) -> usize {
        self.window_widths.iter().copied().min().unwrap_or(0)
    }
}
