//! Working grid and bounding-box calculation.

use super::types::{Cell, Coord, GridBounds, PlacedWord};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Square letter buffer used while generating a crossword.
///
/// Cells are stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of `size × size` empty cells.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the cell at the given coordinate, or `None` outside the grid.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if coord.row >= self.size || coord.col >= self.size {
            return None;
        }
        self.cells.get(coord.row * self.size + coord.col).copied()
    }

    /// Gets the cell at a signed position, or `None` outside the grid.
    ///
    /// Neighbour lookups step one past a word's ends, which may fall
    /// below zero.
    pub fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(Coord::new(row as usize, col as usize))
    }

    /// Returns true if a letter occupies the signed position.
    ///
    /// Positions outside the grid count as empty.
    pub fn is_occupied(&self, row: isize, col: isize) -> bool {
        self.cell_at(row, col).is_some_and(Cell::is_occupied)
    }

    /// Returns true if no cell holds a letter.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| !c.is_occupied())
    }

    /// Iterates over every cell with its coordinate.
    pub fn enumerate(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (Coord::new(i / self.size, i % self.size), *cell))
    }

    /// Writes letters into cells.
    ///
    /// Callers validate the placement first; a letter conflict here means
    /// validation was skipped and is caught in debug builds.
    #[instrument(skip(self, cells, letters), fields(len = cells.len()))]
    pub fn place(&mut self, cells: &[Coord], letters: &[char]) {
        debug_assert_eq!(cells.len(), letters.len(), "one letter per cell");
        for (coord, &letter) in cells.iter().zip(letters) {
            let idx = coord.row * self.size + coord.col;
            debug_assert!(
                matches!(self.cells[idx], Cell::Empty) || self.cells[idx] == Cell::Letter(letter),
                "letter conflict at {coord}"
            );
            self.cells[idx] = Cell::Letter(letter);
        }
    }
}

/// Computes the minimal rectangle covering all placed cells.
///
/// With nothing placed the fixed fallback `{0, 10, 0, 10}` is returned so
/// there is always a drawable area.
#[instrument(skip(placed), fields(count = placed.len()))]
pub fn compute_bounds(placed: &[PlacedWord]) -> GridBounds {
    let mut cells = placed.iter().flat_map(|p| p.cells().iter());

    let Some(first) = cells.next() else {
        return GridBounds::default();
    };

    cells.fold(
        GridBounds {
            min_row: first.row,
            max_row: first.row,
            min_col: first.col,
            max_col: first.col,
        },
        |b, c| GridBounds {
            min_row: b.min_row.min(c.row),
            max_row: b.max_row.max(c.row),
            min_col: b.min_col.min(c.col),
            max_col: b.max_col.max(c.col),
        },
    )
}
