//! Command-line interface for strictly_puzzles.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Puzzles - crossword campaign with a local leaderboard
#[derive(Parser, Debug)]
#[command(name = "strictly_puzzles")]
#[command(about = "Crossword generator and level campaign", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate one crossword and print it with its clues
    Generate {
        /// JSON word file
        #[arg(short, long)]
        words: PathBuf,

        /// Number of words to draw from the file
        #[arg(short, long, default_value = "8")]
        count: usize,

        /// Seed for the word draw
        #[arg(short, long)]
        seed: Option<u64>,

        /// Optional game configuration (grid limits)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play the level campaign in the terminal
    Play {
        /// JSON word file (the built-in list is used if it cannot be read)
        #[arg(short, long, default_value = "data/palabras.json")]
        words: PathBuf,

        /// Game configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Path to the score database (created if it doesn't exist)
        #[arg(long, default_value = "strictly_puzzles.db")]
        db: String,

        /// Player name for the leaderboard; scores are not saved without it
        #[arg(short, long)]
        name: Option<String>,

        /// Seed for the word draw
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show the leaderboard
    Ranking {
        /// Path to the score database
        #[arg(long, default_value = "strictly_puzzles.db")]
        db: String,

        /// Number of scores to list
        #[arg(short, long, default_value = "50")]
        limit: i64,

        /// Game configuration file (level list)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
