//! Aggregation and orchestration for the taq-clean system.
//!
//! This crate handles:
//! - Same-timestamp aggregation (median price, summed size)
//! - Per-symbol activity summaries
//! - The end-to-end cleaning pipeline

pub mod activity;
pub mod aggregate;
pub mod pipeline;

pub use activity::{summarize_activity, SymbolActivity};
pub use aggregate::aggregate;
pub use pipeline::{CleanRun, CleaningPipeline};
