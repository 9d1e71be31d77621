//! NutriSmart tools module
//!
//! The engine operations behind the MCP tools. All mutable state (meal
//! history, the calorie goal) is passed in explicitly through the database
//! handle; there is no ambient state.

pub mod bmi;
pub mod goals;
pub mod meals;
pub mod status;

use chrono::NaiveDate;
use thiserror::Error;

use crate::db::DbError;
use crate::provider::ProviderError;

/// Engine error taxonomy. Every variant is recoverable and local; none
/// should take the process down.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The nutrition lookup failed or timed out. Retryable; no meal entry
    /// is recorded.
    #[error("nutrition lookup unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    /// The lookup succeeded but matched no ingredients. A warning, not a
    /// fault; history is left unchanged.
    #[error("no ingredients matched the meal description")]
    EmptyResult,

    /// Goal-relative progress was requested before any goal was set
    #[error("no calorie goal has been set")]
    NoActiveGoal,

    /// Rejected at the boundary before any computation
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type for engine operations
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Validate a "YYYY-MM-DD" day string
pub(crate) fn parse_day(date: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        TrackerError::InvalidInput(format!("invalid date '{}', expected YYYY-MM-DD", date))
    })
}

/// Today's calendar date in the process's local time zone
pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_accepts_iso_dates() {
        assert!(parse_day("2025-03-02").is_ok());
    }

    #[test]
    fn test_parse_day_rejects_garbage() {
        assert!(matches!(parse_day("yesterday"), Err(TrackerError::InvalidInput(_))));
        assert!(matches!(parse_day("2025-13-40"), Err(TrackerError::InvalidInput(_))));
    }
}
