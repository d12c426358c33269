//! Alternation invariant: crossing words never share an orientation.

use super::super::Crossword;
use super::Invariant;

/// Invariant: two words sharing a cell have different orientations.
pub struct AlternatingCrossingsInvariant;

impl Invariant<Crossword> for AlternatingCrossingsInvariant {
    fn holds(crossword: &Crossword) -> bool {
        let placed = crossword.placed();

        placed.iter().enumerate().all(|(i, a)| {
            placed[i + 1..].iter().all(|b| {
                a.direction() != b.direction() || !a.cells().iter().any(|&c| b.covers(c))
            })
        })
    }

    fn description() -> &'static str {
        "Crossing words alternate horizontal and vertical"
    }
}
