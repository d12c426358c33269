//! First-class invariants for generated crosswords.
//!
//! Invariants are logical properties every generation run must satisfy.
//! They are checked after generation in debug builds and can be tested
//! independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_crossings;
pub mod connected_words;
pub mod letters_round_trip;

pub use alternating_crossings::AlternatingCrossingsInvariant;
pub use connected_words::ConnectedWordsInvariant;
pub use letters_round_trip::LettersRoundTripInvariant;

/// All crossword invariants as a composable set.
pub type CrosswordInvariants = (
    LettersRoundTripInvariant,
    ConnectedWordsInvariant,
    AlternatingCrossingsInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Generator, WordEntry};

    fn words(list: &[&str]) -> Vec<WordEntry> {
        list.iter().map(|w| WordEntry::new(w, "")).collect()
    }

    #[test]
    fn test_invariant_set_holds_for_generated_crossword() {
        let crossword = Generator::default()
            .generate(&words(&["QUEIMADA", "GALEGO", "LINGUA", "GAITA", "HORREO", "CURSOS"]))
            .expect("generation succeeds");
        assert!(CrosswordInvariants::check_all(&crossword).is_ok());
    }

    #[test]
    fn test_two_invariants_as_set() {
        let crossword = Generator::default()
            .generate(&words(&["TORRE", "GATO"]))
            .expect("generation succeeds");

        type TwoInvariants = (LettersRoundTripInvariant, ConnectedWordsInvariant);
        assert!(TwoInvariants::check_all(&crossword).is_ok());
    }
}
