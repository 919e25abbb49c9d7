//! Error types for the analytics pipeline.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while decoding payloads or deriving statistics.
///
/// Degenerate numeric cases (a state with no outgoing transitions, a state
/// that never leaves) are not errors; they surface as NaN or infinity.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// A record cannot be mapped onto the declared schema.
    #[error("{}", schema_message(.record, .reason))]
    Schema {
        /// Zero-based index of the offending record, if record-local.
        record: Option<usize>,
        /// What was wrong.
        reason: String,
    },

    /// Segmentation was requested on a series with no observations.
    #[error("cannot segment an empty series")]
    EmptySeries,

    /// Payload text is not a valid Trends response.
    #[error("Failed to parse payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload source could not be read.
    #[error("Failed to read payload: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be loaded.
    #[error("Failed to load settings: {0}")]
    Config(#[from] config::ConfigError),

    /// Query range ends before it starts.
    #[error("Invalid range: stop {stop} precedes start {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
    },

    /// Time span string cannot be parsed.
    #[error("Unknown span format: {0}")]
    InvalidSpan(String),

    /// Query window reaches past the representable calendar range.
    #[error("Window of {days} days is out of range")]
    WindowOutOfRange { days: i64 },
}

impl TrendsError {
    /// Schema error not tied to a particular record.
    pub fn schema(reason: impl Into<String>) -> Self {
        TrendsError::Schema {
            record: None,
            reason: reason.into(),
        }
    }

    /// Schema error raised by a specific record.
    pub fn record(index: usize, reason: impl Into<String>) -> Self {
        TrendsError::Schema {
            record: Some(index),
            reason: reason.into(),
        }
    }
}

fn schema_message(record: &Option<usize>, reason: &str) -> String {
    match record {
        Some(index) => format!("Schema error in record {}: {}", index, reason),
        None => format!("Schema error: {}", reason),
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, TrendsError>;
