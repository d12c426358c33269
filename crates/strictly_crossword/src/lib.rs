//! Strictly Crossword - crossword generation and puzzle sessions
//!
//! Pure, synchronous logic with no I/O: a placement engine that builds a
//! crossword from a word list, and a session state machine that tracks a
//! player solving it.
//!
//! # Architecture
//!
//! - **Engine**: longest-first placement with crossing-only growth
//! - **Contracts**: placement preconditions checked before every write
//! - **Invariants**: whole-crossword properties checked after generation
//! - **Session**: command/transition state machine emitting effects
//!
//! # Example
//!
//! ```
//! use strictly_crossword::{Command, Generator, PuzzleSession, WordEntry};
//!
//! let words = vec![
//!     WordEntry::new("TORRE", "Tall building"),
//!     WordEntry::new("GATO", "Feline"),
//! ];
//! let crossword = Generator::default().generate(&words).unwrap();
//! let session = PuzzleSession::new(&crossword);
//! let transition = session.apply(Command::Select(1));
//! assert!(transition.session.selection().is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod crossword;
mod engine;
mod grid;
mod intersection;
pub mod invariants;
mod scoring;
mod session;
mod types;

// Crate-level exports - Domain types
pub use types::{Cell, Coord, Direction, GridBounds, PlacedWord, WordEntry, word_cells};

// Crate-level exports - Grid
pub use grid::{Grid, compute_bounds};

// Crate-level exports - Placement
pub use action::{GenerateError, Placement, PlacementError};
pub use contracts::{
    Candidate, Contract, CrossesExisting, EndsClear, LegalPlacement, LettersAgree,
    NoSideContact, PlacementContract, WithinBounds, can_place,
};
pub use intersection::{Intersection, find_intersections};

// Crate-level exports - Generation
pub use crossword::Crossword;
pub use engine::{
    Generator, GeneratorConfig, MAX_INTERSECTION_ATTEMPTS, MAX_PLACED_WORDS, WORKING_GRID_SIZE,
};

// Crate-level exports - Session
pub use scoring::{POINTS_PER_LETTER, TIME_BONUS_PER_SECOND, time_bonus, word_points};
pub use session::{
    Command, Effect, PuzzleSession, Selection, SessionPhase, Transition, normalize_letter,
};
