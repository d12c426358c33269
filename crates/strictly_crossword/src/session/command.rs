//! Player commands accepted by a puzzle session.
//!
//! Commands are domain events, not side effects. Presentation layers
//! translate clicks and key presses into commands and feed them to
//! [`PuzzleSession::apply`](super::PuzzleSession::apply).

use crate::types::Coord;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A single player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Select the placed word with this display number.
    Select(usize),
    /// Select a word through one of its cells, cycling on crossings.
    SelectAt(Coord),
    /// Type a letter into the selected word.
    Letter(char),
    /// Remove the last typed letter.
    Backspace,
    /// Compare the typed letters with the answer.
    Check,
    /// Drop the selection and any partial input.
    Clear,
}

impl Command {
    /// Maps a key name to a command.
    ///
    /// Recognises `Backspace`, `Enter`, `Escape` and single letters
    /// (including accented vowels and `Ñ`). Anything else is `None`.
    #[instrument]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Backspace" => Some(Command::Backspace),
            "Enter" => Some(Command::Check),
            "Escape" => Some(Command::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => normalize_letter(c).map(Command::Letter),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Select(number) => write!(f, "select {number}"),
            Command::SelectAt(coord) => write!(f, "select at {coord}"),
            Command::Letter(c) => write!(f, "letter {c}"),
            Command::Backspace => write!(f, "backspace"),
            Command::Check => write!(f, "check"),
            Command::Clear => write!(f, "clear"),
        }
    }
}

/// Uppercases an alphabetic character.
///
/// Returns `None` for anything that is not a single uppercase letter after
/// conversion.
pub fn normalize_letter(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u.is_alphabetic() => Some(u),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_letters() {
        assert_eq!(Command::from_key("a"), Some(Command::Letter('A')));
        assert_eq!(Command::from_key("ñ"), Some(Command::Letter('Ñ')));
        assert_eq!(Command::from_key("É"), Some(Command::Letter('É')));
    }

    #[test]
    fn test_from_key_controls() {
        assert_eq!(Command::from_key("Backspace"), Some(Command::Backspace));
        assert_eq!(Command::from_key("Enter"), Some(Command::Check));
        assert_eq!(Command::from_key("Escape"), Some(Command::Clear));
    }

    #[test]
    fn test_from_key_rejects_other_input() {
        assert_eq!(Command::from_key("1"), None);
        assert_eq!(Command::from_key("Tab"), None);
        assert_eq!(Command::from_key(""), None);
    }

    #[test]
    fn test_normalize_sharp_s_is_rejected() {
        // 'ß' uppercases to "SS"
        assert_eq!(normalize_letter('ß'), None);
    }
}
