//! Database repository for recorded scores and leaderboard statistics.

use std::collections::HashSet;

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::models::rounded_average;
use crate::db::{DbError, LeaderboardStats, LevelStats, NewScore, Score, schema};

/// Schema migrations bundled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for score operations.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    db_path: String,
}

impl ScoreRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// The schema must already exist; see [`ScoreRepository::open`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is invalid.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating ScoreRepository");
        Ok(Self { db_path })
    }

    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repository = Self::new(db_path)?;
        let mut conn = repository.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        debug!(applied = applied.len(), "Migrations applied");
        Ok(repository)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Records a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, score), fields(name = %score.name(), points = score.score()))]
    pub fn record_score(&self, score: NewScore) -> Result<Score, DbError> {
        debug!("Recording score");
        let mut conn = self.connection()?;

        let recorded = diesel::insert_into(schema::scores::table)
            .values(&score)
            .returning(Score::as_returning())
            .get_result(&mut conn)?;

        info!(
            score_id = recorded.id(),
            name = %recorded.name(),
            score = recorded.score(),
            "Score recorded"
        );
        Ok(recorded)
    }

    /// Best scores first; ties go to the earlier game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn top_scores(&self, limit: i64) -> Result<Vec<Score>, DbError> {
        debug!("Loading top scores");
        let mut conn = self.connection()?;

        let scores = schema::scores::table
            .order((schema::scores::score.desc(), schema::scores::played_at.asc()))
            .limit(limit)
            .select(Score::as_select())
            .load(&mut conn)?;

        info!(count = scores.len(), "Top scores loaded");
        Ok(scores)
    }

    /// Totals, averages and per-level figures over every recorded game.
    ///
    /// `levels` lists the level ids to report; levels without games report
    /// zeros.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard_stats(&self, levels: &[u32]) -> Result<LeaderboardStats, DbError> {
        debug!("Computing leaderboard stats");
        let mut conn = self.connection()?;

        let rows: Vec<(String, i32, i32)> = schema::scores::table
            .select((
                schema::scores::name,
                schema::scores::level,
                schema::scores::score,
            ))
            .load(&mut conn)?;

        let scores: Vec<i32> = rows.iter().map(|(_, _, score)| *score).collect();
        let players: HashSet<&str> = rows.iter().map(|(name, _, _)| name.as_str()).collect();

        let per_level = levels
            .iter()
            .map(|&level| {
                let level_scores: Vec<i32> = rows
                    .iter()
                    .filter(|(_, l, _)| i64::from(*l) == i64::from(level))
                    .map(|(_, _, score)| *score)
                    .collect();
                LevelStats::new(
                    level,
                    level_scores.len(),
                    rounded_average(&level_scores),
                    level_scores.iter().copied().max().unwrap_or(0),
                )
            })
            .collect();

        let stats = LeaderboardStats::new(
            scores.len(),
            players.len(),
            scores.iter().copied().max().unwrap_or(0),
            rounded_average(&scores),
            per_level,
        );

        info!(
            total_games = stats.total_games(),
            total_players = stats.total_players(),
            max_score = stats.max_score(),
            "Leaderboard stats computed"
        );
        Ok(stats)
    }
}
