//! Tick admissibility filters for the taq-clean system.
//!
//! This crate handles:
//! - Correction-code and trade-condition screening
//! - Trimmed rolling-window band statistics
//! - Per-symbol outlier grid search

pub mod condition;
pub mod outlier;
pub mod window;

pub use condition::{classify_condition, filter_conditions, ConditionClass, ConditionMasks};
pub use outlier::{OutlierDetector, OutlierOutcome, SymbolFit};
pub use window::{rolling_band, trimmed_stats, RollingBand};
