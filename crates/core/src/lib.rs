//! Core types and configuration for the taq-clean system.
//!
//! This crate provides shared types used across all other crates:
//! - Trade tick and aggregated observation types
//! - Outlier-grid configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::GridConfig;
pub use error::{Error, Result};
pub use types::*;
