//! Failures of the leaderboard store.

use derive_more::{Display, Error};
use tracing::instrument;

/// A score could not be saved to or read back from the `scores` table.
///
/// Carries the call site that raised it so a failed submission can be
/// traced from the log line alone.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// What went wrong.
    pub message: String,
    /// Line of the call site.
    pub line: u32,
    /// File of the call site.
    pub file: &'static str,
}

impl DbError {
    /// Wraps a leaderboard failure, recording where it was raised.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Query on scores failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Cannot open leaderboard database: {}", err))
    }
}

// Word counts and levels are stored as SQLite integers
impl From<std::num::TryFromIntError> for DbError {
    #[track_caller]
    fn from(err: std::num::TryFromIntError) -> Self {
        Self::new(format!("Count does not fit the scores table: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_its_call_site() {
        let err = DbError::new("locked");
        assert_eq!(err.file, file!());
        assert!(err.to_string().starts_with("Score store error: locked at "));
    }

    #[test]
    fn test_out_of_range_count() {
        let err: DbError = i32::try_from(u64::MAX).unwrap_err().into();
        assert!(err.message.contains("scores table"));
    }
}
