//! Connectivity invariant: every word after the seed crosses another.

use super::super::Crossword;
use super::Invariant;

/// Invariant: every non-seed word shares a cell with some other word.
///
/// The seed (first placed word) is exempt.
pub struct ConnectedWordsInvariant;

impl Invariant<Crossword> for ConnectedWordsInvariant {
    fn holds(crossword: &Crossword) -> bool {
        let placed = crossword.placed();

        placed.iter().enumerate().skip(1).all(|(i, word)| {
            placed
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .any(|(_, other)| word.cells().iter().any(|&c| other.covers(c)))
        })
    }

    fn description() -> &'static str {
        "Every word after the seed crosses another placed word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, compute_bounds};
    use crate::types::{Direction, PlacedWord, WordEntry};

    fn crossword_with(placed: Vec<PlacedWord>) -> Crossword {
        let bounds = compute_bounds(&placed);
        Crossword::new(Grid::new(11), placed, bounds, Vec::new())
    }

    #[test]
    fn test_seed_alone_holds() {
        let seed = PlacedWord::new(WordEntry::new("TORRE", ""), 5, 3, Direction::Horizontal, 1);
        assert!(ConnectedWordsInvariant::holds(&crossword_with(vec![seed])));
    }

    #[test]
    fn test_crossing_word_holds() {
        let seed = PlacedWord::new(WordEntry::new("TORRE", ""), 5, 3, Direction::Horizontal, 1);
        let gato = PlacedWord::new(WordEntry::new("GATO", ""), 3, 3, Direction::Vertical, 2);
        assert!(ConnectedWordsInvariant::holds(&crossword_with(vec![seed, gato])));
    }

    #[test]
    fn test_floating_word_violates() {
        let seed = PlacedWord::new(WordEntry::new("TORRE", ""), 5, 3, Direction::Horizontal, 1);
        let casa = PlacedWord::new(WordEntry::new("CASA", ""), 0, 0, Direction::Horizontal, 2);
        assert!(!ConnectedWordsInvariant::holds(&crossword_with(vec![seed, casa])));
    }
}
