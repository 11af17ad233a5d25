//! Error types for the bmi_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bmi_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// SQLite error from the record store
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Rejected weight/height input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Export error
    #[error("export error: {0}")]
    Export(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
