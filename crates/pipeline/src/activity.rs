//! Per-symbol activity summary.
//!
//! Tracks, for each symbol, the least and most active trading day in the raw
//! collection (tick counts before any filtering). Diagnostic only.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taq_core::TradeRecord;

/// Min/max daily tick counts for one symbol, with the day each occurred.
/// When several days share the extreme count, the earliest day is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolActivity {
    /// Ticker symbol.
    pub symbol: String,
    /// Smallest daily tick count observed.
    pub min_ticks: usize,
    /// Day on which the minimum occurred.
    pub min_ticks_date: NaiveDate,
    /// Largest daily tick count observed.
    pub max_ticks: usize,
    /// Day on which the maximum occurred.
    pub max_ticks_date: NaiveDate,
}

impl SymbolActivity {
    fn new(symbol: &str, date: NaiveDate, ticks: usize) -> Self {
        Self {
            symbol: symbol.to_string(),
            min_ticks: ticks,
            min_ticks_date: date,
            max_ticks: ticks,
            max_ticks_date: date,
        }
    }

    /// Fold one day's tick count into the summary. Strict comparisons keep
    /// the earliest day on ties.
    fn record_day(&mut self, date: NaiveDate, ticks: usize) {
        if ticks < self.min_ticks {
            self.min_ticks = ticks;
            self.min_ticks_date = date;
        } else if ticks > self.max_ticks {
            self.max_ticks = ticks;
            self.max_ticks_date = date;
        }
    }
}

/// Summarize per-symbol activity over the requested symbols and dates.
///
/// Only days on which a symbol actually traded participate; a symbol with no
/// ticks at all produces no summary row.
pub fn summarize_activity(
    records: &[TradeRecord],
    symbols: &[String],
    dates: &[NaiveDate],
) -> Vec<SymbolActivity> {
    let mut counts: HashMap<(&str, NaiveDate), usize> = HashMap::new();
    for record in records {
        *counts.entry((record.symbol.as_str(), record.date)).or_insert(0) += 1;
    }

    let mut summaries = Vec::new();

    for symbol in symbols {
        let mut summary: Option<SymbolActivity> = None;
        for &date in dates {
            let Some(&ticks) = counts.get(&(symbol.as_str(), date)) else {
                continue;
            };
            match &mut summary {
                Some(summary) => summary.record_day(date, ticks),
                None => summary = Some(SymbolActivity::new(symbol, date, ticks)),
            }
        }
        if let Some(summary) = summary {
            summaries.push(summary);
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use taq_core::CLEAN_CORRECTION;

    fn make_tick(symbol: &str, date: NaiveDate, seq: u32) -> TradeRecord {
        TradeRecord {
            symbol: symbol.to_string(),
            date,
            time: NaiveTime::from_hms_milli_opt(9, 40, 0, seq).unwrap(),
            price: 100.0,
            size: 1,
            correction_code: CLEAN_CORRECTION.to_string(),
            condition: "@".to_string(),
            suffix: None,
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 4, day).unwrap()
    }

    fn day(symbol: &str, date_: NaiveDate, ticks: u32) -> Vec<TradeRecord> {
        (0..ticks).map(|i| make_tick(symbol, date_, i)).collect()
    }

    #[test]
    fn test_min_max_across_days() {
        let mut records = day("AAPL", date(1), 5);
        records.extend(day("AAPL", date(2), 9));
        records.extend(day("AAPL", date(3), 2));

        let summaries =
            summarize_activity(&records, &["AAPL".to_string()], &[date(1), date(2), date(3)]);

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.min_ticks, 2);
        assert_eq!(summary.min_ticks_date, date(3));
        assert_eq!(summary.max_ticks, 9);
        assert_eq!(summary.max_ticks_date, date(2));
    }

    #[test]
    fn test_tie_keeps_earliest_day() {
        let mut records = day("AAPL", date(1), 5);
        records.extend(day("AAPL", date(2), 5));

        let summaries = summarize_activity(&records, &["AAPL".to_string()], &[date(1), date(2)]);

        assert_eq!(summaries[0].min_ticks_date, date(1));
        assert_eq!(summaries[0].max_ticks_date, date(1));
    }

    #[test]
    fn test_non_trading_days_skipped() {
        let records = day("AAPL", date(2), 4);
        let summaries =
            summarize_activity(&records, &["AAPL".to_string()], &[date(1), date(2), date(3)]);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].min_ticks, 4);
        assert_eq!(summaries[0].max_ticks, 4);
        assert_eq!(summaries[0].min_ticks_date, date(2));
    }

    #[test]
    fn test_symbol_without_ticks_has_no_row() {
        let records = day("AAPL", date(1), 3);
        let summaries = summarize_activity(
            &records,
            &["AAPL".to_string(), "TSLA".to_string()],
            &[date(1)],
        );

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].symbol, "AAPL");
    }

    #[test]
    fn test_interleaved_symbols_counted_separately() {
        // Records arrive interleaved across symbols and days; each
        // (symbol, day) pair still gets its own count.
        let mut records = Vec::new();
        for i in 0..6u32 {
            records.push(make_tick("AAPL", date(1), i));
            records.push(make_tick("TSLA", date(1), i));
            if i < 3 {
                records.push(make_tick("TSLA", date(2), i));
            }
        }

        let summaries = summarize_activity(
            &records,
            &["AAPL".to_string(), "TSLA".to_string()],
            &[date(1), date(2)],
        );

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].symbol, "AAPL");
        assert_eq!(summaries[0].min_ticks, 6);
        assert_eq!(summaries[0].max_ticks, 6);
        assert_eq!(summaries[1].symbol, "TSLA");
        assert_eq!(summaries[1].min_ticks, 3);
        assert_eq!(summaries[1].min_ticks_date, date(2));
        assert_eq!(summaries[1].max_ticks, 6);
        assert_eq!(summaries[1].max_ticks_date, date(1));
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize_activity(&[], &["AAPL".to_string()], &[date(1)]).is_empty());
    }
}
