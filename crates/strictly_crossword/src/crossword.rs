//! Generated crossword and its read-only queries.

use super::grid::Grid;
use super::types::{Cell, Coord, Direction, GridBounds, PlacedWord, WordEntry};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Output of a generation run.
///
/// Presentation reads it; nothing mutates it after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Crossword {
    /// Working grid with every placed letter.
    grid: Grid,
    /// Placed words in placement order.
    placed: Vec<PlacedWord>,
    /// Bounding box of the placed words.
    bounds: GridBounds,
    /// Words the engine dropped.
    unplaced: Vec<WordEntry>,
}

impl Crossword {
    pub(crate) fn new(
        grid: Grid,
        placed: Vec<PlacedWord>,
        bounds: GridBounds,
        unplaced: Vec<WordEntry>,
    ) -> Self {
        Self {
            grid,
            placed,
            bounds,
            unplaced,
        }
    }

    /// Entries of the placed words, in placement order.
    pub fn words(&self) -> Vec<WordEntry> {
        self.placed.iter().map(|p| p.word().clone()).collect()
    }

    /// Placed word with the given display number.
    pub fn word(&self, number: usize) -> Option<&PlacedWord> {
        self.placed.iter().find(|p| *p.number() == number)
    }

    /// Placed words covering a cell, in placement order.
    #[instrument(skip(self))]
    pub fn words_at(&self, coord: Coord) -> Vec<&PlacedWord> {
        if !self.bounds.contains(coord) {
            return Vec::new();
        }
        self.placed.iter().filter(|p| p.covers(coord)).collect()
    }

    /// Display number shown in a cell, if a word starts there.
    pub fn number_at(&self, coord: Coord) -> Option<usize> {
        self.placed
            .iter()
            .find(|p| p.start() == coord)
            .map(|p| *p.number())
    }

    /// Placed words of one orientation, sorted by display number.
    #[instrument(skip(self))]
    pub fn clues(&self, direction: Direction) -> Vec<&PlacedWord> {
        let mut clues: Vec<_> = self
            .placed
            .iter()
            .filter(|p| *p.direction() == direction)
            .collect();
        clues.sort_by_key(|p| *p.number());
        clues
    }

    /// Renders the solution cropped to the bounds.
    ///
    /// Letters are shown as-is and unused cells as `#`.
    #[instrument(skip(self))]
    pub fn render(&self) -> String {
        let b = self.bounds;
        (b.min_row..=b.max_row)
            .map(|row| {
                (b.min_col..=b.max_col)
                    .map(|col| match self.grid.get(Coord::new(row, col)) {
                        Some(Cell::Letter(c)) => c,
                        _ => '#',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
