//! Core data types for the taq-clean system.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Correction code marking a trade report as neither corrected nor deleted.
pub const CLEAN_CORRECTION: &str = "00";

/// Boolean keep-mask aligned by index to a record collection.
pub type Mask = Vec<bool>;

/// One trade execution (tick) as delivered by the acquisition layer.
///
/// Within one symbol and date, records arrive ordered by `time`
/// non-decreasing; the rolling-window outlier test relies on that order, so
/// nothing downstream may reorder them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Ticker symbol (root, e.g. "AAPL").
    pub symbol: String,
    /// Trading date.
    pub date: NaiveDate,
    /// Intraday execution timestamp (microsecond resolution).
    pub time: NaiveTime,
    /// Execution price.
    pub price: f64,
    /// Executed volume.
    pub size: u64,
    /// Exchange correction code; `"00"` means the trade stands.
    pub correction_code: String,
    /// Trade condition code(s), single characters separated by blanks.
    pub condition: String,
    /// Ticker suffix of secondary listings; expected empty here.
    pub suffix: Option<String>,
}

impl TradeRecord {
    /// Grouping key for same-timestamp aggregation.
    pub fn key(&self) -> ObservationKey {
        (self.symbol.clone(), self.date, self.time)
    }

    /// Whether the record still carries a secondary-listing suffix that the
    /// acquisition layer should have removed.
    pub fn has_suffix(&self) -> bool {
        self.suffix.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// (symbol, date, time) key identifying one aggregated observation.
pub type ObservationKey = (String, NaiveDate, NaiveTime);

/// One row of the de-noised output series: all admissible ticks sharing a
/// (symbol, date, time) key collapsed into a single observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedObservation {
    /// Ticker symbol.
    pub symbol: String,
    /// Trading date.
    pub date: NaiveDate,
    /// Intraday timestamp shared by the contributing ticks.
    pub time: NaiveTime,
    /// Median price of the contributing ticks.
    pub price: f64,
    /// Summed volume of the contributing ticks.
    pub size: u64,
}
