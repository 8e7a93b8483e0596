//! Same-timestamp aggregation.
//!
//! Collapses admissible ticks sharing a (symbol, date, time) key into one
//! observation: median price, summed size.

use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use taq_core::{AggregatedObservation, ObservationKey, TradeRecord};

/// Prices and summed size accumulated for one key.
#[derive(Debug, Clone, Default)]
struct GroupAccumulator {
    prices: Vec<f64>,
    size: u64,
}

impl GroupAccumulator {
    fn add(&mut self, record: &TradeRecord) {
        self.prices.push(record.price);
        self.size += record.size;
    }

    fn median_price(mut self) -> f64 {
        self.prices.sort_unstable_by_key(|&p| OrderedFloat(p));
        let n = self.prices.len();
        if n % 2 == 1 {
            self.prices[n / 2]
        } else {
            (self.prices[n / 2 - 1] + self.prices[n / 2]) / 2.0
        }
    }
}

/// Aggregate a filtered record collection into one observation per unique
/// (symbol, date, time) key.
///
/// Output is ordered ascending by key, so repeated runs over the same input
/// are byte-identical. Singleton groups pass through with price and size
/// unchanged; empty input yields empty output.
pub fn aggregate(records: &[TradeRecord]) -> Vec<AggregatedObservation> {
    let mut groups: BTreeMap<ObservationKey, GroupAccumulator> = BTreeMap::new();

    for record in records {
        groups.entry(record.key()).or_default().add(record);
    }

    groups
        .into_iter()
        .map(|((symbol, date, time), group)| {
            let size = group.size;
            AggregatedObservation {
                symbol,
                date,
                time,
                price: group.median_price(),
                size,
            }
        })
        .collect()
}
