#![forbid(unsafe_code)]

//! Core domain model and business logic for the bmilog measurement logger.
//!
//! This crate provides:
//! - Domain types (records, categories, trend points)
//! - BMI computation and classification
//! - Persistence (SQLite record store)
//! - CSV export
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod engine;
pub mod store;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{classify, compute_bmi};
pub use store::RecordStore;
pub use export::export_csv;
