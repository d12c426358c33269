//! Puzzle session state machine.
//!
//! A session owns its placed words, the current selection and the found
//! set. Every transition consumes the session and hands back the next one
//! together with the effects it produced. Invalid commands are no-ops that
//! return the session unchanged and no effects.

use super::command::{Command, normalize_letter};
use super::effect::Effect;
use crate::crossword::Crossword;
use crate::scoring::{POINTS_PER_LETTER, word_points};
use crate::types::{Coord, PlacedWord};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum SessionPhase {
    /// No word selected.
    Idle,
    /// A word is selected and accepts input.
    Selected,
}

/// The word currently being answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Selection {
    /// Display number of the selected word.
    number: usize,
    /// Cells of the selected word, front to back.
    cells: Vec<Coord>,
    /// Expected letters.
    #[getter(skip)]
    answer: Vec<char>,
    /// Letters typed so far.
    input: Vec<char>,
}

impl Selection {
    fn new(word: &PlacedWord) -> Self {
        Self {
            number: *word.number(),
            cells: word.cells().clone(),
            answer: word.word().letters(),
            input: Vec::new(),
        }
    }

    /// Typed letters as a string.
    pub fn input_text(&self) -> String {
        self.input.iter().collect()
    }

    /// Cell the next letter goes into, if the word is not full.
    pub fn cursor(&self) -> Option<Coord> {
        self.cells.get(self.input.len()).copied()
    }

    fn is_full(&self) -> bool {
        self.input.len() >= self.cells.len()
    }
}

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Session after the command.
    pub session: PuzzleSession,
    /// Observable effects, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(session: PuzzleSession) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }

    /// Sum of the points carried by the effects.
    pub fn points(&self) -> u32 {
        self.effects.iter().map(Effect::points).sum()
    }
}

/// Player-facing state for one crossword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSession {
    words: Vec<PlacedWord>,
    selection: Option<Selection>,
    found: BTreeSet<usize>,
    active: bool,
    points_per_letter: u32,
}

impl PuzzleSession {
    /// Starts a session over the placed words of a crossword.
    #[instrument(skip(crossword), fields(words = crossword.placed().len()))]
    pub fn new(crossword: &Crossword) -> Self {
        Self::from_words(crossword.placed().clone())
    }

    /// Starts a session over an explicit list of placed words.
    pub fn from_words(words: Vec<PlacedWord>) -> Self {
        Self {
            words,
            selection: None,
            found: BTreeSet::new(),
            active: true,
            points_per_letter: POINTS_PER_LETTER,
        }
    }

    /// Overrides the per-letter score.
    pub fn with_points_per_letter(mut self, points_per_letter: u32) -> Self {
        self.points_per_letter = points_per_letter;
        self
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Placed words in this session.
    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    /// Current selection, if any.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        match self.selection {
            Some(_) => SessionPhase::Selected,
            None => SessionPhase::Idle,
        }
    }

    /// Numbers of the found words.
    pub fn found(&self) -> &BTreeSet<usize> {
        &self.found
    }

    /// Returns true if the word with this number has been found.
    pub fn is_found(&self, number: usize) -> bool {
        self.found.contains(&number)
    }

    /// Returns true once every placed word has been found.
    pub fn is_solved(&self) -> bool {
        !self.words.is_empty() && self.words.iter().all(|w| self.found.contains(w.number()))
    }

    /// Returns false after [`terminate`](Self::terminate).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Letter shown in a cell: typed input first, then found words.
    pub fn letter_at(&self, coord: Coord) -> Option<char> {
        if let Some(selection) = &self.selection
            && let Some(i) = selection.cells.iter().position(|c| *c == coord)
            && let Some(letter) = selection.input.get(i)
        {
            return Some(*letter);
        }
        self.words
            .iter()
            .filter(|w| self.found.contains(w.number()))
            .find_map(|w| {
                w.cells()
                    .iter()
                    .position(|c| *c == coord)
                    .and_then(|i| w.word().letters().get(i).copied())
            })
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Marks the session inactive. Later commands are ignored.
    #[instrument(skip(self))]
    pub fn terminate(&mut self) {
        if self.active {
            info!(found = self.found.len(), "Session terminated");
        }
        self.active = false;
        self.selection = None;
    }

    /// Dispatches a command to its transition.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn apply(self, command: Command) -> Transition {
        if !self.active {
            debug!("Session inactive, ignoring command");
            return Transition::unchanged(self);
        }

        let transition = match command {
            Command::Select(number) => self.select(number),
            Command::SelectAt(coord) => self.select_at(coord),
            Command::Letter(c) => self.input_letter(c),
            Command::Backspace => self.backspace(),
            Command::Check => self.check(),
            Command::Clear => self.clear(),
        };
        transition.session.debug_check();
        transition
    }

    /// Selects a word by display number, discarding any prior input.
    pub fn select(mut self, number: usize) -> Transition {
        let Some(word) = self.words.iter().find(|w| *w.number() == number) else {
            debug!(number, "No such word");
            return Transition::unchanged(self);
        };
        self.selection = Some(Selection::new(word));
        Transition {
            session: self,
            effects: vec![Effect::Selected { number }],
        }
    }

    /// Selects through a cell.
    ///
    /// On a crossing cell, repeated selection advances through the words
    /// covering it, wrapping around.
    pub fn select_at(self, coord: Coord) -> Transition {
        let covering: Vec<usize> = self
            .words
            .iter()
            .filter(|w| w.covers(coord))
            .map(|w| *w.number())
            .collect();
        if covering.is_empty() {
            return Transition::unchanged(self);
        }

        let next = self
            .selection
            .as_ref()
            .and_then(|s| covering.iter().position(|n| *n == s.number))
            .map_or(0, |i| (i + 1) % covering.len());
        self.select(covering[next])
    }

    /// Types a letter. Filling the last cell checks the word.
    pub fn input_letter(mut self, letter: char) -> Transition {
        let Some(letter) = normalize_letter(letter) else {
            return Transition::unchanged(self);
        };
        let Some(selection) = self.selection.as_mut() else {
            return Transition::unchanged(self);
        };
        if selection.is_full() {
            return Transition::unchanged(self);
        }

        let index = selection.input.len();
        selection.input.push(letter);
        let full = selection.is_full();

        let mut effects = vec![Effect::LetterEntered { index, letter }];
        if full {
            let checked = self.check();
            effects.extend(checked.effects);
            return Transition {
                session: checked.session,
                effects,
            };
        }
        Transition {
            session: self,
            effects,
        }
    }

    /// Removes the last typed letter.
    pub fn backspace(mut self) -> Transition {
        let Some(selection) = self.selection.as_mut() else {
            return Transition::unchanged(self);
        };
        if selection.input.pop().is_none() {
            return Transition::unchanged(self);
        }
        let index = selection.input.len();
        Transition {
            session: self,
            effects: vec![Effect::LetterRemoved { index }],
        }
    }

    /// Compares the typed letters with the answer.
    ///
    /// A match records the word, drops the selection and awards points the
    /// first time the word is found. A mismatch clears the input only.
    pub fn check(mut self) -> Transition {
        let Some(selection) = self.selection.as_mut() else {
            return Transition::unchanged(self);
        };

        if selection.input != selection.answer {
            debug!(input = %selection.input_text(), "Wrong answer");
            selection.input.clear();
            return Transition {
                session: self,
                effects: vec![Effect::InputCleared],
            };
        }

        let number = selection.number;
        let len = selection.answer.len();
        self.selection = None;

        let mut effects = Vec::new();
        if self.found.insert(number) {
            let points = word_points(len, self.points_per_letter);
            info!(number, points, "Word found");
            effects.push(Effect::WordFound { number, points });
        }
        effects.push(Effect::SelectionCleared);
        if effects.len() > 1 && self.is_solved() {
            info!("Puzzle solved");
            effects.push(Effect::PuzzleSolved);
        }

        Transition {
            session: self,
            effects,
        }
    }

    /// Drops the selection and partial input.
    pub fn clear(mut self) -> Transition {
        if self.selection.take().is_none() {
            return Transition::unchanged(self);
        }
        Transition {
            session: self,
            effects: vec![Effect::SelectionCleared],
        }
    }

    fn debug_check(&self) {
        debug_assert!(
            self.selection
                .as_ref()
                .is_none_or(|s| s.input.len() <= s.cells.len()),
            "input longer than the selected word"
        );
        debug_assert!(
            self.found
                .iter()
                .all(|n| self.words.iter().any(|w| w.number() == n)),
            "found set names a word outside the session"
        );
    }
}
