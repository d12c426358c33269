//! Observable effects emitted by session transitions.

use serde::{Deserialize, Serialize};

/// Something a presentation layer or scorekeeper should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// A word was selected; input starts empty.
    Selected {
        /// Display number of the selected word.
        number: usize,
    },
    /// A letter was written into the selection.
    LetterEntered {
        /// Position inside the word.
        index: usize,
        /// The letter.
        letter: char,
    },
    /// The last letter was removed.
    LetterRemoved {
        /// Position inside the word that is now empty.
        index: usize,
    },
    /// A wrong answer was checked; typed letters were discarded.
    InputCleared,
    /// A word was solved for the first time.
    WordFound {
        /// Display number of the word.
        number: usize,
        /// Score increment to apply.
        points: u32,
    },
    /// The selection was dropped.
    SelectionCleared,
    /// Every placed word has been found.
    PuzzleSolved,
}

impl Effect {
    /// Score increment carried by this effect.
    pub fn points(&self) -> u32 {
        match self {
            Effect::WordFound { points, .. } => *points,
            _ => 0,
        }
    }
}
