//! Robust-band outlier detection with a per-symbol grid search.
//!
//! For each symbol, every (window width, slack) candidate in the grid is
//! scored by the number of ticks its 3-sigma trimmed band flags across all of
//! the symbol's trading days; the candidate flagging the most ticks wins,
//! with ties going to the earlier candidate in scan order. The winner's
//! keep-mask is merged back into a mask over the full collection.

use crate::window::rolling_band;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use taq_core::{GridConfig, Mask, Result, TradeRecord};
use tracing::{debug, warn};

/// Winning grid candidate for one symbol, reported for observability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFit {
    /// Ticker symbol.
    pub symbol: String,
    /// Chosen rolling window width k.
    pub window_width: usize,
    /// Chosen slack threshold y.
    pub slack: f64,
    /// Ticks flagged by the chosen candidate across all days.
    pub outlier_count: usize,
}

/// Keep-mask over the full collection plus per-symbol fit diagnostics.
#[derive(Debug, Clone, Default)]
pub struct OutlierOutcome {
    /// True = tick is not an outlier under the symbol's chosen candidate.
    pub keep: Mask,
    /// Chosen candidate per requested symbol, in request order.
    pub fits: Vec<SymbolFit>,
}

/// Best-so-far state of one symbol's grid scan.
///
/// A candidate replaces the incumbent only with a strictly greater outlier
/// count, so the first candidate to reach the maximum wins and later equal
/// scores never overwrite it.
#[derive(Debug, Clone)]
struct BestCandidate {
    window_width: usize,
    slack: f64,
    outlier_count: usize,
    keep: Vec<bool>,
}

impl BestCandidate {
    fn consider(slot: &mut Option<BestCandidate>, candidate: BestCandidate) {
        match slot {
            Some(best) if candidate.outlier_count <= best.outlier_count => {}
            _ => *slot = Some(candidate),
        }
    }
}

/// Band test for one tick: an outlier deviates from the trimmed mean by
/// strictly more than three standard deviations plus the slack. A tick
/// sitting exactly on the band edge is not an outlier, and NaN statistics
/// compare false, so both stay kept.
fn exceeds_band(price: f64, mean: f64, std: f64, slack: f64) -> bool {
    (price - mean).abs() > 3.0 * std + slack
}

/// Per-symbol outlier detector over a fixed candidate grid.
pub struct OutlierDetector {
    grid: GridConfig,
}

impl OutlierDetector {
    /// Create a detector, validating the grid once up front.
    pub fn new(grid: GridConfig) -> Result<Self> {
        grid.validate()?;
        Ok(Self { grid })
    }

    /// The validated grid this detector scans.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Score every grid candidate for every requested symbol and return the
    /// merged keep-mask plus the chosen candidate per symbol.
    ///
    /// Ticks outside the requested (symbol, date) selection are never scored
    /// and stay unkept; a day shorter than a candidate's window contributes
    /// zero outliers for that candidate and keeps all its ticks.
    pub fn detect(
        &self,
        records: &[TradeRecord],
        symbols: &[String],
        dates: &[NaiveDate],
    ) -> OutlierOutcome {
        let mut keep = vec![false; records.len()];
        let mut fits = Vec::with_capacity(symbols.len());

        // Bucket record indices per (symbol, date) in one pass; intraday
        // time order is the original record order and must be preserved.
        let mut buckets: HashMap<(&str, NaiveDate), Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            buckets
                .entry((record.symbol.as_str(), record.date))
                .or_default()
                .push(idx);
        }

        let mut covered = 0usize;

        for symbol in symbols {
            let days: Vec<&[usize]> = dates
                .iter()
                .filter_map(|date| {
                    buckets
                        .get(&(symbol.as_str(), *date))
                        .map(Vec::as_slice)
                })
                .collect();
            let tick_indices: Vec<usize> =
                days.iter().flat_map(|day| day.iter().copied()).collect();
            covered += tick_indices.len();

            let mut best: Option<BestCandidate> = None;

            for (width, slack) in self.grid.candidates() {
                let mut outlier_count = 0usize;
                let mut keep_symbol = Vec::with_capacity(tick_indices.len());

                for day in &days {
                    let prices: Vec<f64> = day.iter().map(|&i| records[i].price).collect();
                    match rolling_band(&prices, width, self.grid.trim_fraction) {
                        Some(band) => {
                            for (i, &price) in prices.iter().enumerate() {
                                let outlier =
                                    exceeds_band(price, band.mean[i], band.std[i], slack);
                                outlier_count += outlier as usize;
                                keep_symbol.push(!outlier);
                            }
                        }
                        None => {
                            debug!(
                                symbol = %symbol,
                                width,
                                ticks = prices.len(),
                                "day shorter than window, keeping all ticks"
                            );
                            keep_symbol.extend(std::iter::repeat(true).take(prices.len()));
                        }
                    }
                }

                BestCandidate::consider(
                    &mut best,
                    BestCandidate {
                        window_width: width,
                        slack,
                        outlier_count,
                        keep: keep_symbol,
                    },
                );
            }

            if let Some(best) = best {
                for (&idx, &keep_tick) in tick_indices.iter().zip(best.keep.iter()) {
                    keep[idx] = keep_tick;
                }
                debug!(
                    symbol = %symbol,
                    width = best.window_width,
                    slack = best.slack,
                    outliers = best.outlier_count,
                    "selected grid candidate"
                );
                fits.push(SymbolFit {
                    symbol: symbol.clone(),
                    window_width: best.window_width,
                    slack: best.slack,
                    outlier_count: best.outlier_count,
                });
            }
        }

        if covered < records.len() {
            warn!(
                unselected = records.len() - covered,
                "ticks outside the requested symbol/date selection stay unkept"
            );
        }

        OutlierOutcome { keep, fits }
    }
}
