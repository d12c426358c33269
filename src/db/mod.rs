//! Database persistence layer for finished games and the leaderboard.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{LeaderboardStats, LevelStats, NewScore, Score};
pub use repository::{MIGRATIONS, ScoreRepository};
