//! Database models and leaderboard aggregates.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;
use tracing::instrument;

use crate::SessionSummary;
use crate::db::{DbError, schema};

/// Stored result of a finished game.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::scores)]
pub struct Score {
    id: i32,
    name: String,
    level: i32,
    score: i32,
    found_words: i32,
    total_words: i32,
    completed_levels: String,
    played_at: NaiveDateTime,
}

impl Score {
    /// Completed level ids parsed from the stored comma list.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn completed_level_ids(&self) -> Vec<u32> {
        parse_level_list(&self.completed_levels)
    }
}

/// Insertable score for recording a finished game.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::scores)]
pub struct NewScore {
    name: String,
    level: i32,
    score: i32,
    found_words: i32,
    total_words: i32,
    completed_levels: String,
    played_at: NaiveDateTime,
}

impl NewScore {
    /// Converts a session summary into a storable row.
    ///
    /// The name is stored trimmed and the timestamp as naive UTC.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a count does not fit the column type.
    #[instrument(skip(summary), fields(name = %summary.name()))]
    pub fn from_summary(summary: &SessionSummary) -> Result<Self, DbError> {
        Ok(Self::new(
            summary.name().trim().to_string(),
            i32::try_from(*summary.level())?,
            i32::try_from(*summary.score())?,
            i32::try_from(*summary.found_count())?,
            i32::try_from(*summary.total_count())?,
            format_level_list(summary.completed_levels()),
            summary.timestamp().naive_utc(),
        ))
    }
}

/// Joins level ids as `1,2,3`.
pub(crate) fn format_level_list(levels: &[u32]) -> String {
    levels
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a `1,2,3` list, skipping anything that is not a number.
pub(crate) fn parse_level_list(list: &str) -> Vec<u32> {
    list.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

/// Per-level leaderboard figures.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, new)]
pub struct LevelStats {
    /// Level id.
    level: u32,
    /// Games recorded at this level.
    games: usize,
    /// Mean score, rounded to one decimal.
    average_score: f64,
    /// Best score.
    max_score: i32,
}

/// Leaderboard-wide figures.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, new)]
pub struct LeaderboardStats {
    /// Games recorded.
    total_games: usize,
    /// Distinct player names.
    total_players: usize,
    /// Best score overall.
    max_score: i32,
    /// Mean score overall, rounded to one decimal.
    average_score: f64,
    /// One entry per requested level, in request order.
    levels: Vec<LevelStats>,
}

/// Mean of `scores` rounded to one decimal; zero when empty.
pub(crate) fn rounded_average(scores: &[i32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let sum: i64 = scores.iter().map(|s| i64::from(*s)).sum();
    let mean = sum as f64 / scores.len() as f64;
    (mean * 10.0).round() / 10.0
}
