//! Score submission business logic layer.

use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use crate::{
    DbError, LeaderboardStats, NewScore, Score, ScoreRepository, ScoreSink, SessionSummary,
};

/// Highest score accepted.
pub const MAX_SCORE: u32 = 999_999;

/// Most words a recorded level may have.
pub const MAX_TOTAL_WORDS: usize = 20;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;
const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', '"', '\''];

/// Service layer for score operations.
///
/// Wraps [`ScoreRepository`] with submission validation and the leaderboard
/// view for the configured levels.
#[derive(Debug, Clone)]
pub struct ScoreService {
    repository: ScoreRepository,
    levels: Vec<u32>,
}

impl ScoreService {
    /// Creates a service accepting scores for the given level ids.
    #[instrument(skip(repository))]
    pub fn new(repository: ScoreRepository, levels: Vec<u32>) -> Self {
        info!("Creating ScoreService");
        Self { repository, levels }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &ScoreRepository {
        &self.repository
    }

    /// Checks a summary against the submission rules.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] naming the first rule that fails.
    #[instrument(skip(self, summary), fields(name = %summary.name()))]
    pub fn validate(&self, summary: &SessionSummary) -> Result<(), SubmissionError> {
        let name = summary.name().trim();
        let name_len = name.chars().count();
        if name_len < NAME_MIN_CHARS {
            return Err(SubmissionError::new(format!(
                "Name must have at least {} characters",
                NAME_MIN_CHARS
            )));
        }
        if name_len > NAME_MAX_CHARS {
            return Err(SubmissionError::new(format!(
                "Name must have at most {} characters",
                NAME_MAX_CHARS
            )));
        }
        if name.contains(FORBIDDEN_NAME_CHARS) {
            return Err(SubmissionError::new("Name contains forbidden characters"));
        }

        if !self.levels.contains(summary.level()) {
            return Err(SubmissionError::new(format!(
                "Unknown level {}",
                summary.level()
            )));
        }
        if *summary.score() > MAX_SCORE {
            return Err(SubmissionError::new(format!(
                "Score {} outside 0-{}",
                summary.score(),
                MAX_SCORE
            )));
        }
        if !(1..=MAX_TOTAL_WORDS).contains(summary.total_count()) {
            return Err(SubmissionError::new(format!(
                "Total words {} outside 1-{}",
                summary.total_count(),
                MAX_TOTAL_WORDS
            )));
        }
        if summary.found_count() > summary.total_count() {
            return Err(SubmissionError::new("Found words exceed total words"));
        }

        debug!("Submission valid");
        Ok(())
    }

    /// Validates and stores a summary.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] if validation or storage fails.
    #[instrument(skip(self, summary), fields(name = %summary.name(), score = summary.score()))]
    pub fn record(&self, summary: &SessionSummary) -> Result<Score, SubmissionError> {
        if let Err(e) = self.validate(summary) {
            warn!(reason = %e.message, "Score rejected");
            return Err(e);
        }
        let row = NewScore::from_summary(summary)?;
        let recorded = self.repository.record_score(row)?;
        info!(score_id = recorded.id(), "Score accepted");
        Ok(recorded)
    }

    /// Best scores first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn top_scores(&self, limit: i64) -> Result<Vec<Score>, DbError> {
        self.repository.top_scores(limit)
    }

    /// Leaderboard figures for the configured levels.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard_stats(&self) -> Result<LeaderboardStats, DbError> {
        self.repository.leaderboard_stats(&self.levels)
    }
}

impl ScoreSink for ScoreService {
    type Error = SubmissionError;

    fn submit(&self, summary: &SessionSummary) -> Result<(), Self::Error> {
        self.record(summary).map(|_| ())
    }
}

/// Rejected or failed score submission.
#[derive(Debug, Clone, Display, Error)]
#[display("Submission error: {} at {}:{}", message, file, line)]
pub struct SubmissionError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SubmissionError {
    /// Creates a new submission error.
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

impl From<DbError> for SubmissionError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        Self::new(err.message)
    }
}
