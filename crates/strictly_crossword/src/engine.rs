//! Crossword generation engine.
//!
//! Words are placed longest first. The seed goes across the middle of the
//! working grid; every later word must cross a word already placed, and
//! takes the orientation perpendicular to the word it crosses.

use super::action::{GenerateError, Placement};
use super::contracts::{Candidate, Contract, PlacementContract, can_place};
use super::crossword::Crossword;
use super::grid::{Grid, compute_bounds};
use super::intersection::find_intersections;
#[cfg(debug_assertions)]
use super::invariants::{CrosswordInvariants, InvariantSet};
use super::types::{Direction, PlacedWord, WordEntry};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Side length of the working grid.
pub const WORKING_GRID_SIZE: usize = 25;

/// Most words a single crossword holds.
pub const MAX_PLACED_WORDS: usize = 8;

/// Intersection candidates examined per word before giving up on it.
pub const MAX_INTERSECTION_ATTEMPTS: usize = 20;

/// Total placement attempts allowed per remaining word.
const ATTEMPTS_PER_WORD: usize = 3;

/// Tunable limits for a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeneratorConfig {
    /// Side length of the working grid.
    grid_size: usize,
    /// Cap on placed words, seed included.
    max_placed_words: usize,
    /// Per-word budget of intersection candidates.
    max_intersection_attempts: usize,
}

impl GeneratorConfig {
    /// Creates a generator configuration.
    #[instrument]
    pub fn new(grid_size: usize, max_placed_words: usize, max_intersection_attempts: usize) -> Self {
        Self {
            grid_size,
            max_placed_words,
            max_intersection_attempts,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(
            WORKING_GRID_SIZE,
            MAX_PLACED_WORDS,
            MAX_INTERSECTION_ATTEMPTS,
        )
    }
}

/// Places words into a fresh grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator with the given limits.
    #[instrument]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the generator limits.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a crossword from `words`.
    ///
    /// Placement is best effort: words that find no legal crossing within
    /// their budget are dropped and reported in [`Crossword::unplaced`].
    ///
    /// # Errors
    ///
    /// - [`GenerateError::EmptyWordList`] if `words` is empty.
    /// - [`GenerateError::SeedDoesNotFit`] if the longest word is wider than the grid.
    #[instrument(skip(self, words), fields(count = words.len(), grid_size = self.config.grid_size))]
    pub fn generate(&self, words: &[WordEntry]) -> Result<Crossword, GenerateError> {
        if words.is_empty() {
            warn!("No words to place");
            return Err(GenerateError::EmptyWordList);
        }

        // Stable: equal lengths keep their input order.
        let mut sorted = words.to_vec();
        sorted.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut grid = Grid::new(self.config.grid_size);
        let mut placed: Vec<PlacedWord> = Vec::new();
        let mut unplaced = Vec::new();

        let seed = &sorted[0];
        let seed_placement = self.seed_placement(seed);
        if !can_place(&seed.letters(), seed_placement, &grid) {
            warn!(word = %seed.text(), "Seed word does not fit");
            return Err(GenerateError::SeedDoesNotFit {
                word: seed.text().clone(),
                grid_size: self.config.grid_size,
            });
        }
        placed.push(commit(&mut grid, seed, seed_placement, 1));

        let rest = &sorted[1..];
        let max_attempts = rest.len() * ATTEMPTS_PER_WORD;
        let mut total_attempts = 0;

        for word in rest {
            if placed.len() >= self.config.max_placed_words || total_attempts >= max_attempts {
                unplaced.push(word.clone());
                continue;
            }
            total_attempts += 1;

            match self.find_placement(word, &grid, &placed) {
                Some(placement) => {
                    let number = placed.len() + 1;
                    placed.push(commit(&mut grid, word, placement, number));
                }
                None => {
                    debug!(word = %word.text(), "No legal crossing, dropping word");
                    unplaced.push(word.clone());
                }
            }
        }

        info!(
            placed = placed.len(),
            total = sorted.len(),
            "Crossword generated"
        );

        let bounds = compute_bounds(&placed);
        let crossword = Crossword::new(grid, placed, bounds, unplaced);

        #[cfg(debug_assertions)]
        if let Err(violations) = CrosswordInvariants::check_all(&crossword) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            debug_assert!(false, "Generated crossword violates invariants: {descriptions}");
        }

        Ok(crossword)
    }

    /// Seed position: across the middle row, horizontally centred.
    fn seed_placement(&self, seed: &WordEntry) -> Placement {
        let size = self.config.grid_size as isize;
        let row = size / 2;
        let col = (size - seed.len() as isize).div_euclid(2);
        Placement::new(row, col, Direction::Horizontal)
    }

    /// Finds the first legal crossing for `word`.
    ///
    /// Placed words are scanned in placement order and their intersections
    /// in [`find_intersections`] order. The search is abandoned once the
    /// candidate count passes the per-word budget.
    #[instrument(skip(self, grid, placed), fields(word = %word.text()))]
    pub fn find_placement(
        &self,
        word: &WordEntry,
        grid: &Grid,
        placed: &[PlacedWord],
    ) -> Option<Placement> {
        let letters = word.letters();
        let mut attempts = 0;

        for existing in placed {
            let existing_letters = existing.word().letters();

            for hit in find_intersections(&letters, &existing_letters) {
                if attempts > self.config.max_intersection_attempts {
                    debug!(attempts, "Intersection budget exhausted");
                    return None;
                }
                attempts += 1;

                let placement = Placement::crossing(existing, hit);
                if can_place(&letters, placement, grid) {
                    debug!(%placement, crosses = existing.number(), "Found crossing");
                    return Some(placement);
                }
            }
        }

        None
    }
}

/// Writes a validated word into the grid and records it.
#[instrument(skip(grid, word), fields(word = %word.text()))]
fn commit(grid: &mut Grid, word: &WordEntry, placement: Placement, number: usize) -> PlacedWord {
    #[cfg(debug_assertions)]
    let before = grid.clone();

    let letters = word.letters();
    debug_assert!(
        PlacementContract::pre(grid, &Candidate::new(&letters, placement)).is_ok(),
        "commit requires a validated placement"
    );

    // Validation guarantees a non-negative start.
    let start = placement.start().unwrap_or_default();
    let placed = PlacedWord::new(word.clone(), start.row, start.col, placement.direction, number);
    grid.place(placed.cells(), &letters);

    #[cfg(debug_assertions)]
    if let Err(e) = PlacementContract::post(&before, grid) {
        warn!(error = %e, "Placement postcondition failed");
    }

    debug!(row = start.row, col = start.col, "Word placed");
    placed
}
