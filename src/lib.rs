//! Strictly Puzzles library - crossword campaign around the puzzle engine
//!
//! The engine itself lives in `strictly_crossword`; this crate supplies the
//! collaborators around it.
//!
//! # Architecture
//!
//! - **Config**: game tunables and levels from TOML
//! - **Words**: JSON word pool, filtering and random selection
//! - **Campaign**: levels, cumulative clock and scoring
//! - **Persistence**: SQLite score table and leaderboard via diesel
//! - **Play**: line-driven terminal loop
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strictly_puzzles::{Campaign, GameConfig, WordPool};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GameConfig::from_file("game.toml")?;
//! let pool = WordPool::load_or_fallback("data/palabras.json");
//! let campaign = Campaign::new(config, pool, StdRng::seed_from_u64(7))?;
//! println!("{}", campaign.crossword().render());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod campaign;
pub mod cli;
mod config;
pub mod db;
pub mod play;
mod score_service;
mod words;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, LevelConfig};

// Crate-level exports - Word source
pub use words::{MAX_WORD_LEN, MIN_WORD_LEN, WordPool, WordSourceError, select_words};

// Crate-level exports - Campaign
pub use campaign::{Campaign, LevelStatus, ScoreSink, SessionSummary};

// Crate-level exports - Persistence
pub use db::{DbError, LeaderboardStats, LevelStats, NewScore, Score, ScoreRepository};
pub use score_service::{MAX_SCORE, MAX_TOTAL_WORDS, ScoreService, SubmissionError};

// Crate-level exports - Play
pub use play::{PlayInput, PlayLoop, PlayOutcome, parse_line, render_board, render_clues};
