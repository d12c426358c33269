//! Round-trip invariant: reading a word's cells back yields the word.

use super::super::{Cell, Crossword};
use super::Invariant;

/// Invariant: every placed word can be read back from the grid.
///
/// Concatenating the grid letters along a word's cells reproduces its
/// text, so no placement silently overwrote another.
pub struct LettersRoundTripInvariant;

impl Invariant<Crossword> for LettersRoundTripInvariant {
    fn holds(crossword: &Crossword) -> bool {
        crossword.placed().iter().all(|placed| {
            let read: Option<String> = placed
                .cells()
                .iter()
                .map(|&coord| crossword.grid().get(coord).and_then(Cell::letter))
                .collect();
            read.as_deref() == Some(placed.word().text().as_str())
        })
    }

    fn description() -> &'static str {
        "Grid letters along each placed word spell that word"
    }
}
