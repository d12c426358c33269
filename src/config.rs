//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_crossword::{
    GeneratorConfig, MAX_INTERSECTION_ATTEMPTS, MAX_PLACED_WORDS, POINTS_PER_LETTER,
    TIME_BONUS_PER_SECOND, WORKING_GRID_SIZE,
};
use tracing::{debug, info, instrument};

/// One level of the campaign.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level number, starting at 1.
    id: u32,
    /// Words drawn from the pool for this level.
    words: usize,
    /// Seconds added to the clock when the level starts.
    time_secs: u32,
    /// Label shown to the player.
    theme: String,
}

impl LevelConfig {
    /// Creates a level description.
    #[instrument(skip(theme))]
    pub fn new(id: u32, words: usize, time_secs: u32, theme: impl Into<String>) -> Self {
        Self {
            id,
            words,
            time_secs,
            theme: theme.into(),
        }
    }
}

/// Tunables for the whole game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Points per letter of a solved word.
    #[serde(default = "default_points_per_letter")]
    points_per_letter: u32,

    /// Points per second left on the clock when a level is completed.
    #[serde(default = "default_time_bonus_per_second")]
    time_bonus_per_second: u32,

    /// Side length of the working grid.
    #[serde(default = "default_grid_size")]
    grid_size: usize,

    /// Cap on placed words per crossword.
    #[serde(default = "default_max_placed_words")]
    max_placed_words: usize,

    /// Intersection candidates tried per word.
    #[serde(default = "default_max_intersection_attempts")]
    max_intersection_attempts: usize,

    /// Campaign levels, in play order.
    #[serde(default = "default_levels")]
    levels: Vec<LevelConfig>,
}

fn default_points_per_letter() -> u32 {
    POINTS_PER_LETTER
}

fn default_time_bonus_per_second() -> u32 {
    TIME_BONUS_PER_SECOND
}

fn default_grid_size() -> usize {
    WORKING_GRID_SIZE
}

fn default_max_placed_words() -> usize {
    MAX_PLACED_WORDS
}

fn default_max_intersection_attempts() -> usize {
    MAX_INTERSECTION_ATTEMPTS
}

#[instrument]
fn default_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig::new(1, 6, 180, "Fácil"),
        LevelConfig::new(2, 9, 120, "Medio"),
        LevelConfig::new(3, 13, 90, "Difícil"),
    ]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            points_per_letter: default_points_per_letter(),
            time_bonus_per_second: default_time_bonus_per_second(),
            grid_size: default_grid_size(),
            max_placed_words: default_max_placed_words(),
            max_intersection_attempts: default_max_intersection_attempts(),
            levels: default_levels(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if
    /// it declares no levels.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or an empty level list.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.levels.is_empty() {
            return Err(ConfigError::new("Config declares no levels"));
        }

        info!(levels = config.levels.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Level with the given id.
    pub fn level(&self, id: u32) -> Option<&LevelConfig> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Highest level id.
    pub fn max_level(&self) -> u32 {
        self.levels.iter().map(|l| l.id).max().unwrap_or(1)
    }

    /// Generator limits taken from this configuration.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new(
            self.grid_size,
            self.max_placed_words,
            self.max_intersection_attempts,
        )
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.levels().len(), 3);
        assert_eq!(config.max_level(), 3);
    }

    #[test]
    fn test_partial_toml_overrides_only_given_keys() {
        let config = GameConfig::from_toml("points_per_letter = 7\n").unwrap();
        assert_eq!(*config.points_per_letter(), 7);
        assert_eq!(*config.time_bonus_per_second(), 5);
        assert_eq!(*config.grid_size(), 25);
    }

    #[test]
    fn test_custom_levels() {
        let toml = r#"
            [[levels]]
            id = 1
            words = 4
            time_secs = 60
            theme = "Proba"
        "#;
        let config = GameConfig::from_toml(toml).unwrap();
        assert_eq!(config.levels().len(), 1);
        assert_eq!(config.level(1).unwrap().theme(), "Proba");
        assert!(config.level(2).is_none());
    }

    #[test]
    fn test_empty_level_list_is_rejected() {
        let err = GameConfig::from_toml("levels = []").unwrap_err();
        assert!(err.message.contains("no levels"));
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        assert!(GameConfig::from_toml("points_per_letter = \"ten\"").is_err());
    }
}
