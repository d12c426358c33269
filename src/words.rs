//! Word pool loading and random selection.

use derive_more::{Display, Error};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use strictly_crossword::WordEntry;
use tracing::{debug, info, instrument, warn};

/// Shortest usable answer.
pub const MIN_WORD_LEN: usize = 3;

/// Longest usable answer.
pub const MAX_WORD_LEN: usize = 13;

/// Word file layout: `{ "palabras": [{ "palabra": ..., "definicion": ... }] }`.
#[derive(Debug, Deserialize)]
struct WordFile {
    #[serde(alias = "words", default)]
    palabras: Vec<RawWord>,
}

#[derive(Debug, Deserialize)]
struct RawWord {
    #[serde(alias = "text", default)]
    palabra: String,
    #[serde(alias = "clue", default)]
    definicion: String,
}

/// Built-in words used when no word file can be loaded.
const FALLBACK_WORDS: &[(&str, &str)] = &[
    ("GALEGO", "Lingua oficial de Galicia"),
    ("LINGUA", "Órgano muscular da boca"),
    ("GAITA", "Instrumento musical tradicional"),
    ("QUEIMADA", "Bebida típica galega"),
    ("HORREO", "Construcción para gardar gran"),
    ("CURSOS", "Clases ou leccións"),
];

/// Words available for crossword generation.
///
/// Every entry is uppercase, 3 to 13 letters long and unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    entries: Vec<WordEntry>,
}

impl WordPool {
    /// Builds a pool, dropping unusable and repeated words.
    #[instrument(skip(entries))]
    pub fn new(entries: impl IntoIterator<Item = WordEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries: Vec<WordEntry> = entries
            .into_iter()
            .filter(is_usable)
            .filter(|w| seen.insert(w.text().clone()))
            .collect();
        debug!(count = entries.len(), "Word pool built");
        Self { entries }
    }

    /// Loads a pool from a JSON word file.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError`] if the file cannot be read or parsed, or
    /// holds no usable words.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WordSourceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| WordSourceError::new(format!("Failed to read word file: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parses a pool from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`WordSourceError`] on malformed JSON or when nothing survives
    /// filtering.
    #[instrument(skip(content))]
    pub fn from_json(content: &str) -> Result<Self, WordSourceError> {
        let file: WordFile = serde_json::from_str(content)
            .map_err(|e| WordSourceError::new(format!("Failed to parse word file: {}", e)))?;

        let total = file.palabras.len();
        let pool = Self::new(
            file.palabras
                .into_iter()
                .map(|raw| WordEntry::new(raw.palabra, raw.definicion.trim())),
        );

        if pool.is_empty() {
            return Err(WordSourceError::new(format!(
                "No usable words among {} entries",
                total
            )));
        }

        info!(total, usable = pool.len(), "Word file loaded");
        Ok(pool)
    }

    /// The built-in word list.
    #[instrument]
    pub fn fallback() -> Self {
        Self::new(
            FALLBACK_WORDS
                .iter()
                .map(|(text, clue)| WordEntry::new(text, *clue)),
        )
    }

    /// Loads a word file, falling back to the built-in list on any error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        match Self::from_file(path) {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "Using built-in words");
                Self::fallback()
            }
        }
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draws `count` words at random. See [`select_words`].
    pub fn select<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<WordEntry> {
        select_words(&self.entries, count, rng)
    }
}

fn is_usable(word: &WordEntry) -> bool {
    (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len())
}

/// Picks `count` words from `pool`.
///
/// A pool no larger than `count` is returned whole and in order; otherwise
/// a random subset of exactly `count` words.
#[instrument(skip(pool, rng), fields(pool = pool.len()))]
pub fn select_words<R: Rng + ?Sized>(
    pool: &[WordEntry],
    count: usize,
    rng: &mut R,
) -> Vec<WordEntry> {
    if pool.len() <= count {
        return pool.to_vec();
    }
    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

/// Word source error.
#[derive(Debug, Clone, Display, Error)]
#[display("Word source error: {} at {}:{}", message, file, line)]
pub struct WordSourceError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl WordSourceError {
    /// Creates a new word source error.
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
    fn test_fallback_has_six_words() {
        let pool = WordPool::fallback();
        assert_eq!(pool.len(), 6);
        assert_eq!(pool.entries()[0].text(), "GALEGO");
    }

    #[test]
    fn test_length_filter_counts_letters() {
        let pool = WordPool::new([
            WordEntry::new("MU", "too short"),
            WordEntry::new("SOL", "shortest allowed"),
            WordEntry::new("ÑU", "too short"),
            WordEntry::new("ELECTRODOMÉSTICO", "too long"),
            WordEntry::new("CAMIÑO", "fine"),
        ]);
        let texts: Vec<&str> = pool.entries().iter().map(|w| w.text().as_str()).collect();
        assert_eq!(texts, vec!["SOL", "CAMIÑO"]);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let pool = WordPool::new([
            WordEntry::new("gato", "first"),
            WordEntry::new("GATO", "second"),
        ]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.entries()[0].clue(), "first");
    }
}
