//! Core domain types for crossword generation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Orientation of a word in the grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    #[strum(to_string = "horizontal")]
    Horizontal,
    /// Top to bottom.
    #[strum(to_string = "vertical")]
    Vertical,
}

impl Direction {
    /// Returns the crossing orientation.
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Row/column step taken to advance one letter along this direction.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        }
    }
}

/// A cell position inside the working grid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coord {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl Coord {
    /// Creates a new coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No word covers this cell.
    #[default]
    Empty,
    /// Cell holds a letter of one or more placed words.
    Letter(char),
}

impl Cell {
    /// Returns true if the cell holds a letter.
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Letter(_))
    }

    /// Returns the letter, if any.
    pub fn letter(self) -> Option<char> {
        match self {
            Cell::Letter(c) => Some(c),
            Cell::Empty => None,
        }
    }
}

/// A word together with its clue.
///
/// The text is stored uppercase. Length is measured in characters, so
/// accented letters and `Ñ` count once.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Getters,
)]
pub struct WordEntry {
    /// Uppercase answer.
    text: String,
    /// Clue shown to the player.
    clue: String,
}

impl WordEntry {
    /// Creates a word entry, trimming and uppercasing the answer.
    #[instrument(skip(text, clue))]
    pub fn new(text: impl AsRef<str>, clue: impl Into<String>) -> Self {
        Self {
            text: text.as_ref().trim().to_uppercase(),
            clue: clue.into(),
        }
    }

    /// Answer as a sequence of characters.
    pub fn letters(&self) -> Vec<char> {
        self.text.chars().collect()
    }

    /// Number of letters in the answer.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true if the answer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A word committed to the grid.
///
/// Created once at placement time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlacedWord {
    /// The word and its clue.
    word: WordEntry,
    /// Start row.
    row: usize,
    /// Start column.
    col: usize,
    /// Orientation.
    direction: Direction,
    /// Display number, 1-based, in placement order.
    number: usize,
    /// Covered cells, front to back.
    cells: Vec<Coord>,
}

impl PlacedWord {
    /// Creates a placed word, deriving its covered cells.
    pub(crate) fn new(
        word: WordEntry,
        row: usize,
        col: usize,
        direction: Direction,
        number: usize,
    ) -> Self {
        let cells = word_cells(row, col, word.len(), direction);
        Self {
            word,
            row,
            col,
            direction,
            number,
            cells,
        }
    }

    /// Start cell of the word.
    pub fn start(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// Returns true if the word covers the cell.
    pub fn covers(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

/// Cells covered by a word of `len` letters starting at `(row, col)`.
pub fn word_cells(row: usize, col: usize, len: usize, direction: Direction) -> Vec<Coord> {
    (0..len)
        .map(|i| match direction {
            Direction::Horizontal => Coord::new(row, col + i),
            Direction::Vertical => Coord::new(row + i, col),
        })
        .collect()
}

/// Minimal rectangle covering every placed cell (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    /// Topmost used row.
    pub min_row: usize,
    /// Bottommost used row.
    pub max_row: usize,
    /// Leftmost used column.
    pub min_col: usize,
    /// Rightmost used column.
    pub max_col: usize,
}

impl GridBounds {
    /// Number of rows in the rectangle.
    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    /// Number of columns in the rectangle.
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    /// Returns true if the coordinate lies inside the rectangle.
    pub fn contains(&self, coord: Coord) -> bool {
        (self.min_row..=self.max_row).contains(&coord.row)
            && (self.min_col..=self.max_col).contains(&coord.col)
    }
}

impl Default for GridBounds {
    /// Drawable fallback used when nothing was placed.
    fn default() -> Self {
        Self {
            min_row: 0,
            max_row: 10,
            min_col: 0,
            max_col: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_entry_uppercases_and_counts_chars() {
        let word = WordEntry::new(" piñata ", "Festa");
        assert_eq!(word.text(), "PIÑATA");
        assert_eq!(word.len(), 6);
        assert_eq!(word.clue(), "Festa");
    }

    #[test]
    fn test_word_cells_follow_direction() {
        assert_eq!(
            word_cells(2, 3, 3, Direction::Horizontal),
            vec![Coord::new(2, 3), Coord::new(2, 4), Coord::new(2, 5)]
        );
        assert_eq!(
            word_cells(2, 3, 2, Direction::Vertical),
            vec![Coord::new(2, 3), Coord::new(3, 3)]
        );
    }

    #[test]
    fn test_perpendicular() {
        assert_eq!(Direction::Horizontal.perpendicular(), Direction::Vertical);
        assert_eq!(Direction::Vertical.perpendicular(), Direction::Horizontal);
    }

    #[test]
    fn test_default_bounds() {
        let bounds = GridBounds::default();
        assert_eq!(bounds.width(), 11);
        assert_eq!(bounds.height(), 11);
    }
}
