//! Cleaning pipeline orchestration.
//!
//! Composes the condition masks and the per-symbol outlier keep-mask with
//! logical AND, applies the result to the raw collection once, and aggregates
//! what survives. No partial results are emitted mid-run.

use crate::activity::{summarize_activity, SymbolActivity};
use crate::aggregate::aggregate;
use chrono::NaiveDate;
use taq_core::{AggregatedObservation, GridConfig, Result, TradeRecord};
use taq_filters::{filter_conditions, OutlierDetector, SymbolFit};
use tracing::warn;

/// Everything one pipeline run produces: the surviving ticks, the aggregated
/// series, and the diagnostics gathered along the way.
#[derive(Debug, Clone)]
pub struct CleanRun {
    /// Raw ticks that passed all three masks, in original order.
    pub filtered: Vec<TradeRecord>,
    /// One observation per surviving (symbol, date, time) key.
    pub aggregated: Vec<AggregatedObservation>,
    /// Chosen outlier grid candidate per symbol.
    pub fits: Vec<SymbolFit>,
    /// Raw-collection indices of ticks with unrecognized condition
    /// characters.
    pub unseen_rows: Vec<usize>,
    /// Per-symbol min/max daily tick counts over the raw collection.
    pub activity: Vec<SymbolActivity>,
}

/// Batch cleaning pipeline: condition filter, outlier fit, aggregation.
pub struct CleaningPipeline {
    detector: OutlierDetector,
}

impl CleaningPipeline {
    /// Create a pipeline over the given outlier grid; the grid is validated
    /// here, once, before any data is touched.
    pub fn new(grid: GridConfig) -> Result<Self> {
        Ok(Self {
            detector: OutlierDetector::new(grid)?,
        })
    }

    /// Clean and aggregate one batch of trade records.
    ///
    /// Pure given its inputs: the same records, symbols, and dates always
    /// produce the same `CleanRun`. Records are owned for the duration of
    /// the run; the filters only read them.
    pub fn run(
        &self,
        records: Vec<TradeRecord>,
        symbols: &[String],
        dates: &[NaiveDate],
    ) -> CleanRun {
        let stray_suffixes = records.iter().filter(|r| r.has_suffix()).count();
        if stray_suffixes > 0 {
            warn!(
                count = stray_suffixes,
                "records with a listing suffix reached the pipeline; \
                 the acquisition layer should have excluded them"
            );
        }

        let activity = summarize_activity(&records, symbols, dates);

        let masks = filter_conditions(&records);
        let outcome = self.detector.detect(&records, symbols, dates);

        let filtered: Vec<TradeRecord> = records
            .into_iter()
            .enumerate()
            .filter(|(i, _)| masks.correction_ok[*i] && masks.condition_ok[*i] && outcome.keep[*i])
            .map(|(_, record)| record)
            .collect();

        let aggregated = aggregate(&filtered);

        CleanRun {
            filtered,
            aggregated,
            fits: outcome.fits,
            unseen_rows: masks.unseen_rows,
            activity,
        }
    }
}
