//! Candidate placements and the errors they can raise.
//!
//! A placement is a proposal, not a side effect. It is validated against
//! the grid before anything is written.

use super::intersection::Intersection;
use super::types::{Coord, Direction, PlacedWord};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A proposed start cell and orientation for a word.
///
/// Coordinates are signed: positions derived from an intersection may fall
/// off the top or left of the grid and are rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Start row.
    pub row: isize,
    /// Start column.
    pub col: isize,
    /// Orientation.
    pub direction: Direction,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(row: isize, col: isize, direction: Direction) -> Self {
        Self {
            row,
            col,
            direction,
        }
    }

    /// Derives the crossing placement for a word meeting `placed` at `hit`.
    ///
    /// The new word always takes the perpendicular orientation:
    /// - across `placed` → down at `(placed.row - new_index, placed.col + placed_index)`
    /// - down `placed` → across at `(placed.row + placed_index, placed.col - new_index)`
    #[instrument(skip(placed), fields(number = placed.number()))]
    pub fn crossing(placed: &PlacedWord, hit: Intersection) -> Self {
        let (pdr, pdc) = placed.direction().step();
        let direction = placed.direction().perpendicular();
        let (ndr, ndc) = direction.step();
        let new_index = hit.new_index as isize;
        let placed_index = hit.placed_index as isize;

        // Shared cell, then back along the new word to its first letter
        let row = *placed.row() as isize + pdr * placed_index;
        let col = *placed.col() as isize + pdc * placed_index;
        Self::new(row - ndr * new_index, col - ndc * new_index, direction)
    }

    /// Signed position of the `i`-th letter.
    pub fn offset(&self, i: isize) -> (isize, isize) {
        let (dr, dc) = self.direction.step();
        (self.row + dr * i, self.col + dc * i)
    }

    /// Start cell, if the placement lies inside the grid.
    pub fn start(&self) -> Option<Coord> {
        (self.row >= 0 && self.col >= 0).then(|| Coord::new(self.row as usize, self.col as usize))
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}", self.row, self.col, self.direction)
    }
}

/// Reason a placement was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlacementError {
    /// Part of the word would fall outside the grid.
    #[display("Placement {} leaves the grid", _0)]
    OutOfBounds(Placement),

    /// A covered cell already holds a different letter.
    #[display("Letter {} at index {} conflicts with {}", expected, index, found)]
    LetterConflict {
        /// Letter index within the word.
        index: usize,
        /// Letter the word would write.
        expected: char,
        /// Letter already in the grid.
        found: char,
    },

    /// The word does not cross any placed word.
    #[display("Word does not cross any placed word")]
    NoIntersection,

    /// The cell before the start or after the end is occupied.
    #[display("Word would run into an adjacent word")]
    EndNotClear,

    /// A newly filled cell touches a letter on the perpendicular axis.
    #[display("Letter at index {} would touch a neighbouring word", _0)]
    SideContact(usize),

    /// A postcondition failed after committing a placement.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for PlacementError {}

/// Error that aborts crossword generation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GenerateError {
    /// No words were supplied.
    #[display("Word list is empty")]
    EmptyWordList,

    /// The longest word cannot be seeded in the working grid.
    #[display("Seed word {} does not fit a {}x{} grid", word, grid_size, grid_size)]
    SeedDoesNotFit {
        /// The seed word.
        word: String,
        /// Working grid size.
        grid_size: usize,
    },
}

impl std::error::Error for GenerateError {}
