//! Shared-letter discovery between two words.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A pair of letter indices where two words agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intersection {
    /// Index into the word being placed.
    pub new_index: usize,
    /// Index into the word already on the grid.
    pub placed_index: usize,
}

impl Intersection {
    /// Creates a new intersection.
    pub fn new(new_index: usize, placed_index: usize) -> Self {
        Self {
            new_index,
            placed_index,
        }
    }
}

/// Lists every `(i, j)` with `candidate[i] == placed[j]`.
///
/// Ordered by `i` ascending, then `j` ascending. Repeated letters yield one
/// pair per occurrence; the placement search tries them in this order.
#[instrument(skip(candidate, placed), fields(candidate_len = candidate.len(), placed_len = placed.len()))]
pub fn find_intersections(candidate: &[char], placed: &[char]) -> Vec<Intersection> {
    candidate
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            placed
                .iter()
                .enumerate()
                .filter(move |(_, b)| *b == a)
                .map(move |(j, _)| Intersection::new(i, j))
        })
        .collect()
}
