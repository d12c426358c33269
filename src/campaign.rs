//! Level campaign: cumulative clock, level scores and the finished-game summary.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strictly_crossword::{
    Command, Crossword, Effect, GenerateError, Generator, PuzzleSession, time_bonus,
};
use tracing::{debug, info, instrument, warn};

use crate::{GameConfig, LevelConfig, WordPool};

/// Where the current level stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum LevelStatus {
    /// Clock running, puzzle unsolved.
    InProgress,
    /// Every word found before time ran out.
    Completed,
    /// Time ran out.
    Failed,
}

/// Persistence payload for a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct SessionSummary {
    /// Player name as typed.
    name: String,
    /// Highest completed level, or the level being played.
    level: u32,
    /// Total score across levels.
    score: u32,
    /// Words found in the last level.
    found_count: usize,
    /// Words placed in the last level.
    total_count: usize,
    /// Ids of completed levels, in completion order.
    completed_levels: Vec<u32>,
    /// When the summary was built.
    timestamp: DateTime<Utc>,
}

/// Receiver for finished-game summaries.
///
/// Implementations must not block play; callers log failures and carry on.
pub trait ScoreSink {
    /// Error raised when a summary is rejected or cannot be stored.
    type Error: std::error::Error;

    /// Stores a summary.
    fn submit(&self, summary: &SessionSummary) -> Result<(), Self::Error>;
}

/// A run through the configured levels.
#[derive(Debug)]
pub struct Campaign {
    config: GameConfig,
    pool: WordPool,
    rng: StdRng,
    generator: Generator,
    level_index: usize,
    crossword: Crossword,
    session: PuzzleSession,
    status: LevelStatus,
    time_remaining: u32,
    level_score: u32,
    total_score: u32,
    completed_levels: Vec<u32>,
}

impl Campaign {
    /// Starts at the first configured level.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if the first crossword cannot be generated.
    #[instrument(skip(config, pool, rng), fields(levels = config.levels().len(), pool = pool.len()))]
    pub fn new(config: GameConfig, pool: WordPool, rng: StdRng) -> Result<Self, GenerateError> {
        let config = if config.levels().is_empty() {
            warn!("No levels configured, using the stock levels");
            GameConfig::default()
        } else {
            config
        };
        let generator = Generator::new(config.generator_config());
        let first = config.levels()[0].clone();
        let mut rng = rng;
        let crossword = build_crossword(&generator, &pool, *first.words(), &mut rng)?;
        let session = new_session(&crossword, &config);

        info!(level = first.id(), time = first.time_secs(), "Campaign started");
        Ok(Self {
            time_remaining: *first.time_secs(),
            config,
            pool,
            rng,
            generator,
            level_index: 0,
            crossword,
            session,
            status: LevelStatus::InProgress,
            level_score: 0,
            total_score: 0,
            completed_levels: Vec::new(),
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Current level configuration.
    pub fn level(&self) -> &LevelConfig {
        &self.config.levels()[self.level_index]
    }

    /// Crossword of the current level.
    pub fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    /// Session of the current level.
    pub fn session(&self) -> &PuzzleSession {
        &self.session
    }

    /// Status of the current level.
    pub fn status(&self) -> LevelStatus {
        self.status
    }

    /// Seconds left on the clock.
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Score earned in the current level.
    pub fn level_score(&self) -> u32 {
        self.level_score
    }

    /// Score banked from completed levels.
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Ids of completed levels, in completion order.
    pub fn completed_levels(&self) -> &[u32] {
        &self.completed_levels
    }

    /// Returns true if another level follows the current one.
    pub fn has_next_level(&self) -> bool {
        self.level_index + 1 < self.config.levels().len()
    }

    /// Returns true when the last level is completed.
    pub fn is_finished(&self) -> bool {
        self.status == LevelStatus::Completed && !self.has_next_level()
    }

    // ─────────────────────────────────────────────────────────────
    //  Play
    // ─────────────────────────────────────────────────────────────

    /// Forwards a player command to the level session.
    ///
    /// Found words add to the level score; solving the puzzle completes the
    /// level. Commands after the level ended are ignored.
    #[instrument(skip(self), fields(level = self.level().id()))]
    pub fn apply(&mut self, command: Command) -> Vec<Effect> {
        if self.status != LevelStatus::InProgress {
            debug!(status = %self.status, "Level over, ignoring command");
            return Vec::new();
        }

        let session = std::mem::replace(&mut self.session, PuzzleSession::from_words(Vec::new()));
        let transition = session.apply(command);
        self.session = transition.session;

        for effect in &transition.effects {
            match effect {
                Effect::WordFound { points, .. } => {
                    self.level_score = self.level_score.saturating_add(*points)
                }
                Effect::PuzzleSolved => self.complete_level(),
                _ => {}
            }
        }
        transition.effects
    }

    /// Advances the clock. Running out of time fails the level.
    #[instrument(skip(self))]
    pub fn tick(&mut self, seconds: u32) -> LevelStatus {
        if self.status != LevelStatus::InProgress {
            return self.status;
        }

        self.time_remaining = self.time_remaining.saturating_sub(seconds);
        if self.time_remaining == 0 {
            self.session.terminate();
            self.status = LevelStatus::Failed;
            info!(level = self.level().id(), score = self.level_score, "Time is up");
        }
        self.status
    }

    #[instrument(skip(self))]
    fn complete_level(&mut self) {
        let bonus = time_bonus(self.time_remaining, *self.config.time_bonus_per_second());
        self.level_score = self.level_score.saturating_add(bonus);
        self.status = LevelStatus::Completed;
        self.session.terminate();

        let id = *self.level().id();
        if !self.completed_levels.contains(&id) {
            self.completed_levels.push(id);
            self.total_score = self.total_score.saturating_add(self.level_score);
        }
        info!(
            level = id,
            bonus,
            level_score = self.level_score,
            total_score = self.total_score,
            "Level completed"
        );
    }

    /// Moves on to the next level after completing the current one.
    ///
    /// The new level's time is added to the time left over. Returns
    /// `Ok(false)` when the current level is not completed or is the last.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if the next crossword cannot be generated.
    #[instrument(skip(self))]
    pub fn next_level(&mut self) -> Result<bool, GenerateError> {
        if self.status != LevelStatus::Completed || !self.has_next_level() {
            debug!(status = %self.status, "No level to advance to");
            return Ok(false);
        }
        self.load_level(self.level_index + 1)?;
        Ok(true)
    }

    /// Replays the current level with a fresh crossword.
    ///
    /// Level score resets; banked score and the clock carry over, with the
    /// level's time added again past the first level.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if the crossword cannot be generated.
    #[instrument(skip(self))]
    pub fn restart_level(&mut self) -> Result<(), GenerateError> {
        self.load_level(self.level_index)
    }

    /// Starts over from the first level with nothing banked.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if the crossword cannot be generated.
    #[instrument(skip(self))]
    pub fn restart_game(&mut self) -> Result<(), GenerateError> {
        self.total_score = 0;
        self.completed_levels.clear();
        self.load_level(0)
    }

    fn load_level(&mut self, index: usize) -> Result<(), GenerateError> {
        let level = self.config.levels()[index].clone();
        let crossword =
            build_crossword(&self.generator, &self.pool, *level.words(), &mut self.rng)?;

        self.time_remaining = if index == 0 {
            *level.time_secs()
        } else {
            self.time_remaining.saturating_add(*level.time_secs())
        };
        self.session = new_session(&crossword, &self.config);
        self.crossword = crossword;
        self.level_index = index;
        self.level_score = 0;
        self.status = LevelStatus::InProgress;

        info!(
            level = level.id(),
            words = self.crossword.placed().len(),
            time = self.time_remaining,
            "Level loaded"
        );
        Ok(())
    }

    /// Builds the persistence payload for this game.
    #[instrument(skip(self, name))]
    pub fn summary(&self, name: impl Into<String>) -> SessionSummary {
        let level = self
            .completed_levels
            .iter()
            .copied()
            .max()
            .unwrap_or(*self.level().id());
        SessionSummary::new(
            name.into(),
            level,
            self.total_score,
            self.session.found().len(),
            self.session.words().len(),
            self.completed_levels.clone(),
            Utc::now(),
        )
    }

    /// Sends the summary to a sink, logging instead of failing.
    #[instrument(skip(self, sink, name))]
    pub fn submit<S: ScoreSink>(&self, sink: &S, name: impl Into<String>) -> bool {
        let summary = self.summary(name);
        match sink.submit(&summary) {
            Ok(()) => {
                info!(score = summary.score(), "Score submitted");
                true
            }
            Err(e) => {
                warn!(error = %e, "Score submission failed");
                false
            }
        }
    }
}

fn build_crossword(
    generator: &Generator,
    pool: &WordPool,
    count: usize,
    rng: &mut StdRng,
) -> Result<Crossword, GenerateError> {
    let words = pool.select(count, rng);
    generator.generate(&words)
}

fn new_session(crossword: &Crossword, config: &GameConfig) -> PuzzleSession {
    PuzzleSession::new(crossword).with_points_per_letter(*config.points_per_letter())
}
