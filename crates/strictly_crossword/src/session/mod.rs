//! Player interaction with a generated crossword.

mod command;
mod effect;
mod state;

pub use command::{Command, normalize_letter};
pub use effect::Effect;
pub use state::{PuzzleSession, Selection, SessionPhase, Transition};
