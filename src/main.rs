//! Strictly Puzzles - Unified CLI
//!
//! Crossword generation, terminal play and the local leaderboard.

#![warn(missing_docs)]

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_crossword::{Direction, Generator};
use strictly_puzzles::cli::{Cli, Command};
use strictly_puzzles::{Campaign, GameConfig, PlayLoop, ScoreRepository, ScoreService, WordPool};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Generate {
            words,
            count,
            seed,
            config,
        } => run_generate(&words, count, seed, config.as_deref()),
        Command::Play {
            words,
            config,
            db,
            name,
            seed,
        } => run_play(&words, config.as_deref(), db, name, seed),
        Command::Ranking { db, limit, config } => run_ranking(db, limit, config.as_deref()),
    }
}

#[instrument]
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_crossword=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}

#[instrument]
fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => Ok(GameConfig::from_file(path)?),
        None => {
            info!("No config file given, using defaults");
            Ok(GameConfig::default())
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Generate one crossword and print it
#[instrument]
fn run_generate(words: &Path, count: usize, seed: Option<u64>, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let pool = WordPool::from_file(words)?;
    let mut rng = make_rng(seed);

    let selected = pool.select(count, &mut rng);
    let crossword = Generator::new(config.generator_config()).generate(&selected)?;

    println!("{}\n", crossword.render());
    for (direction, title) in [
        (Direction::Horizontal, "Across"),
        (Direction::Vertical, "Down"),
    ] {
        println!("{}:", title);
        for word in crossword.clues(direction) {
            println!(
                "  {:>2}. {} ({}) = {} at {}",
                word.number(),
                word.word().clue(),
                word.word().len(),
                word.word().text(),
                word.start()
            );
        }
    }
    if !crossword.unplaced().is_empty() {
        let dropped: Vec<&str> = crossword
            .unplaced()
            .iter()
            .map(|w| w.text().as_str())
            .collect();
        println!("Not placed: {}", dropped.join(", "));
    }
    Ok(())
}

/// Play the campaign on stdin/stdout
#[instrument(skip(name))]
fn run_play(
    words: &Path,
    config: Option<&Path>,
    db: String,
    name: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let config = load_config(config)?;
    let levels: Vec<u32> = config.levels().iter().map(|l| *l.id()).collect();
    let pool = WordPool::load_or_fallback(words);

    let service = match name {
        Some(_) => match ScoreRepository::open(db) {
            Ok(repository) => Some(ScoreService::new(repository, levels)),
            Err(e) => {
                warn!(error = %e, "Scores will not be saved");
                None
            }
        },
        None => None,
    };

    let mut campaign = Campaign::new(config, pool, make_rng(seed))?;
    println!("Commands: <n> select word, <row> <col> select cell, letters to type,");
    println!("          - backspace, ! check, . clear, r restart level, n new game, q quit");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = PlayLoop::new(&mut campaign, stdout.lock()).run(
        stdin.lock(),
        service.as_ref(),
        name.as_deref(),
    )?;

    info!(?outcome, "Game over");
    Ok(())
}

/// Print the leaderboard
#[instrument]
fn run_ranking(db: String, limit: i64, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let levels: Vec<u32> = config.levels().iter().map(|l| *l.id()).collect();
    let service = ScoreService::new(ScoreRepository::open(db)?, levels);

    let scores = service.top_scores(limit)?;
    println!("{:>3}  {:<20} {:>5} {:>7} {:>7}  {}", "#", "Name", "Level", "Score", "Words", "Date");
    for (rank, score) in scores.iter().enumerate() {
        println!(
            "{:>3}  {:<20} {:>5} {:>7} {:>3}/{:<3}  {}",
            rank + 1,
            score.name(),
            score.level(),
            score.score(),
            score.found_words(),
            score.total_words(),
            score.played_at().format("%d/%m/%Y")
        );
    }

    let stats = service.leaderboard_stats()?;
    println!(
        "\nGames: {}  Players: {}  Best: {}  Average: {:.1}",
        stats.total_games(),
        stats.total_players(),
        stats.max_score(),
        stats.average_score()
    );
    for level in stats.levels() {
        println!(
            "  Level {}: {} games, average {:.1}, best {}",
            level.level(),
            level.games(),
            level.average_score(),
            level.max_score()
        );
    }
    Ok(())
}
