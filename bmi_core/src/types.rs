//! Core domain types for the bmilog system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Persisted measurement records
//! - BMI categories
//! - Trend points and user summaries returned by store reads

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text format used for timestamps everywhere: in the database, in CSV
/// exports, and in terminal/JSON output. Second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// BMI classification band
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        write!(f, "{}", label)
    }
}

/// One persisted BMI measurement
///
/// Records are immutable: created exactly once per successful submission,
/// never updated, never deleted. The id is assigned by the store and is
/// unique and monotonically increasing.
#[derive(Clone, Debug, PartialEq)]
pub struct BmiRecord {
    pub id: i64,
    pub username: String,
    pub recorded_at: NaiveDateTime,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmi: f64,
}

impl BmiRecord {
    /// Classification band for this record's BMI value
    pub fn category(&self) -> BmiCategory {
        crate::engine::classify(self.bmi)
    }
}

/// One point of a user's BMI trend, as returned by `RecordStore::history`
#[derive(Clone, Debug, PartialEq)]
pub struct TrendPoint {
    pub recorded_at: NaiveDateTime,
    pub bmi: f64,
}

/// A known username and how many records it has
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSummary {
    pub username: String,
    pub records: i64,
}
