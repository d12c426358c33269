//! Contract-based validation for word placement.
//!
//! Each rule is a precondition on `(grid, candidate)`. A placement is legal
//! only when every rule holds; rules never mutate the grid.

use super::action::{Placement, PlacementError};
use super::grid::Grid;
use super::types::Cell;
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), PlacementError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), PlacementError>;
}

/// A word proposed at a placement.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Letters of the word, front to back.
    pub letters: &'a [char],
    /// Proposed start and orientation.
    pub placement: Placement,
}

impl<'a> Candidate<'a> {
    /// Creates a new candidate.
    pub fn new(letters: &'a [char], placement: Placement) -> Self {
        Self { letters, placement }
    }

    /// Signed positions of every letter, paired with the letter.
    fn positions(&self) -> impl Iterator<Item = (usize, (isize, isize), char)> + '_ {
        self.letters
            .iter()
            .enumerate()
            .map(|(i, &c)| (i, self.placement.offset(i as isize), c))
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: every covered cell lies inside the grid.
pub struct WithinBounds;

impl WithinBounds {
    /// Checks the first and last letter positions.
    #[instrument(skip_all)]
    pub fn check(candidate: &Candidate<'_>, grid: &Grid) -> Result<(), PlacementError> {
        let len = candidate.letters.len() as isize;
        let size = grid.size() as isize;
        let inside = |(r, c): (isize, isize)| (0..size).contains(&r) && (0..size).contains(&c);

        if len == 0
            || !inside(candidate.placement.offset(0))
            || !inside(candidate.placement.offset(len - 1))
        {
            return Err(PlacementError::OutOfBounds(candidate.placement));
        }
        Ok(())
    }
}

/// Precondition: every covered cell is empty or already holds the same letter.
pub struct LettersAgree;

impl LettersAgree {
    /// Fails on the first mismatching letter.
    #[instrument(skip_all)]
    pub fn check(candidate: &Candidate<'_>, grid: &Grid) -> Result<(), PlacementError> {
        for (index, (r, c), expected) in candidate.positions() {
            if let Some(Cell::Letter(found)) = grid.cell_at(r, c)
                && found != expected
            {
                return Err(PlacementError::LetterConflict {
                    index,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Precondition: the word shares at least one cell with a placed word.
///
/// Waived while the grid is still blank, so the seed word can go down.
pub struct CrossesExisting;

impl CrossesExisting {
    /// Looks for a covered cell that already holds the word's letter.
    #[instrument(skip_all)]
    pub fn check(candidate: &Candidate<'_>, grid: &Grid) -> Result<(), PlacementError> {
        if grid.is_blank() {
            return Ok(());
        }

        let crosses = candidate
            .positions()
            .any(|(_, (r, c), letter)| grid.cell_at(r, c) == Some(Cell::Letter(letter)));

        if crosses {
            Ok(())
        } else {
            Err(PlacementError::NoIntersection)
        }
    }
}

/// Precondition: the cells just before the start and just after the end are empty.
///
/// Stops two words on the same line from running together into one.
pub struct EndsClear;

impl EndsClear {
    /// Checks both ends along the placement axis.
    #[instrument(skip_all)]
    pub fn check(candidate: &Candidate<'_>, grid: &Grid) -> Result<(), PlacementError> {
        let len = candidate.letters.len() as isize;
        let (br, bc) = candidate.placement.offset(-1);
        let (ar, ac) = candidate.placement.offset(len);

        if grid.is_occupied(br, bc) || grid.is_occupied(ar, ac) {
            return Err(PlacementError::EndNotClear);
        }
        Ok(())
    }
}

/// Precondition: newly filled cells have no perpendicular neighbours.
///
/// A covered cell that is still empty may not have a letter directly on
/// either side across the placement axis. Cells the word shares with an
/// existing word are exempt.
pub struct NoSideContact;

impl NoSideContact {
    /// Checks both perpendicular neighbours of every newly filled cell.
    #[instrument(skip_all)]
    pub fn check(candidate: &Candidate<'_>, grid: &Grid) -> Result<(), PlacementError> {
        let (dr, dc) = candidate.placement.direction.perpendicular().step();

        for (index, (r, c), _) in candidate.positions() {
            if grid.is_occupied(r, c) {
                continue;
            }
            if grid.is_occupied(r - dr, c - dc) || grid.is_occupied(r + dr, c + dc) {
                return Err(PlacementError::SideContact(index));
            }
        }
        Ok(())
    }
}

/// Composite precondition: a placement is legal if every rule holds.
///
/// Rules run in order and the first failure is reported.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement.
    #[instrument(skip_all, fields(placement = %candidate.placement))]
    pub fn check(candidate: &Candidate<'_>, grid: &Grid) -> Result<(), PlacementError> {
        WithinBounds::check(candidate, grid)?;
        LettersAgree::check(candidate, grid)?;
        CrossesExisting::check(candidate, grid)?;
        EndsClear::check(candidate, grid)?;
        NoSideContact::check(candidate, grid)?;
        Ok(())
    }
}

/// Returns true if `letters` can be written at `placement`.
#[instrument(skip(letters, grid), fields(placement = %placement))]
pub fn can_place(letters: &[char], placement: Placement, grid: &Grid) -> bool {
    match LegalPlacement::check(&Candidate::new(letters, placement), grid) {
        Ok(()) => true,
        Err(reason) => {
            debug!(%reason, "Placement rejected");
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for committing a word to the grid.
///
/// Preconditions: every rule of [`LegalPlacement`].
///
/// Postconditions: cells are monotonic; a letter once written is never
/// cleared or replaced.
pub struct PlacementContract;

impl<'a> Contract<Grid, Candidate<'a>> for PlacementContract {
    fn pre(grid: &Grid, candidate: &Candidate<'a>) -> Result<(), PlacementError> {
        LegalPlacement::check(candidate, grid)
    }

    fn post(before: &Grid, after: &Grid) -> Result<(), PlacementError> {
        let overwritten = before
            .enumerate()
            .filter(|(_, cell)| cell.is_occupied())
            .find(|(coord, cell)| after.get(*coord) != Some(*cell));

        match overwritten {
            Some((coord, _)) => Err(PlacementError::InvariantViolation(format!(
                "cell {coord} changed after placement"
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Direction};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    /// 11×11 grid with "TORRE" across row 5 from column 3.
    fn grid_with_torre() -> Grid {
        let mut grid = Grid::new(11);
        let cells: Vec<Coord> = (3..8).map(|c| Coord::new(5, c)).collect();
        grid.place(&cells, &chars("TORRE"));
        grid
    }

    #[test]
    fn test_first_word_needs_no_intersection() {
        let grid = Grid::new(11);
        assert!(can_place(&chars("TORRE"), Placement::new(5, 3, Direction::Horizontal), &grid));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let grid = Grid::new(11);
        let word = chars("TORRE");
        let c = Candidate::new(&word, Placement::new(5, 7, Direction::Horizontal));
        assert!(matches!(
            LegalPlacement::check(&c, &grid),
            Err(PlacementError::OutOfBounds(_))
        ));
        let c = Candidate::new(&word, Placement::new(-1, 0, Direction::Vertical));
        assert!(matches!(
            LegalPlacement::check(&c, &grid),
            Err(PlacementError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_crossing_on_shared_letter_accepted() {
        let grid = grid_with_torre();
        // GATO down through the T of TORRE
        assert!(can_place(&chars("GATO"), Placement::new(3, 3, Direction::Vertical), &grid));
    }

    #[test]
    fn test_letter_conflict_rejected() {
        let grid = grid_with_torre();
        let word = chars("CASA");
        // CASA[1] = 'A' would land on the O of TORRE
        let c = Candidate::new(&word, Placement::new(4, 4, Direction::Vertical));
        assert_eq!(
            LegalPlacement::check(&c, &grid),
            Err(PlacementError::LetterConflict {
                index: 1,
                expected: 'A',
                found: 'O'
            })
        );
    }

    #[test]
    fn test_word_without_crossing_rejected() {
        let grid = grid_with_torre();
        let word = chars("CASA");
        let c = Candidate::new(&word, Placement::new(0, 0, Direction::Horizontal));
        assert_eq!(LegalPlacement::check(&c, &grid), Err(PlacementError::NoIntersection));
    }

    #[test]
    fn test_run_together_rejected() {
        let grid = grid_with_torre();
        // "EL" across starting on the final E: the cell before it holds R
        let word = chars("EL");
        let c = Candidate::new(&word, Placement::new(5, 7, Direction::Horizontal));
        assert_eq!(LegalPlacement::check(&c, &grid), Err(PlacementError::EndNotClear));
    }

    #[test]
    fn test_side_contact_rejected() {
        let grid = grid_with_torre();
        // OSO down through the O at (5,4); its new S at (6,4) touches the X.
        let mut grid = grid;
        grid.place(&[Coord::new(6, 3)], &['X']);
        let word = chars("OSO");
        let c = Candidate::new(&word, Placement::new(5, 4, Direction::Vertical));
        assert_eq!(LegalPlacement::check(&c, &grid), Err(PlacementError::SideContact(1)));
    }

    #[test]
    fn test_validation_does_not_mutate() {
        let grid = grid_with_torre();
        let before = grid.clone();
        let _ = can_place(&chars("CASA"), Placement::new(4, 4, Direction::Vertical), &grid);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_post_detects_overwrite() {
        let before = grid_with_torre();
        let mut after = Grid::new(11);
        after.place(&[Coord::new(5, 3)], &['T']);
        assert!(PlacementContract::post(&before, &after).is_err());
        assert!(PlacementContract::post(&before, &before.clone()).is_ok());
    }
}
