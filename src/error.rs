//! Error taxonomy for series loading and projection queries

use thiserror::Error;

/// Errors produced while loading birth data or computing projections
#[derive(Debug, Error)]
pub enum DemographyError {
    /// Duplicate year, negative birth count, or non-numeric field in loaded data
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// An operation needed a latest/earliest year on a series with no entries
    #[error("birth series is empty")]
    EmptySeries,

    /// Average-age denominator (qualifying birth total) was zero
    #[error("average age undefined for year {year}: no qualifying population")]
    DivisionUndefined { year: i32 },

    /// Age bounds or bucket thresholds out of order
    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
