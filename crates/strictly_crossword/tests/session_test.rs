//! Tests for the puzzle session state machine.

use strictly_crossword::{
    Command, Coord, Crossword, Effect, Generator, PuzzleSession, SessionPhase, WordEntry,
};

fn crossword() -> Crossword {
    let words: Vec<WordEntry> = ["GATO", "CASA", "TORRE"]
        .iter()
        .map(|w| WordEntry::new(w, format!("Clue for {w}")))
        .collect();
    Generator::default()
        .generate(&words)
        .expect("Generation failed")
}

/// Feeds commands in order, collecting every effect.
fn play(session: PuzzleSession, commands: &[Command]) -> (PuzzleSession, Vec<Effect>) {
    commands
        .iter()
        .fold((session, Vec::new()), |(session, mut effects), command| {
            let transition = session.apply(*command);
            effects.extend(transition.effects);
            (transition.session, effects)
        })
}

fn letters(word: &str) -> Vec<Command> {
    word.chars().map(Command::Letter).collect()
}

#[test]
fn test_new_session_is_idle_and_active() {
    let session = PuzzleSession::new(&crossword());
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.is_active());
    assert!(!session.is_solved());
    assert_eq!(session.words().len(), 3);
}

#[test]
fn test_typing_the_answer_finds_the_word() {
    let session = PuzzleSession::new(&crossword());
    let mut commands = vec![Command::Select(1)];
    commands.extend(letters("torre"));
    let (session, effects) = play(session, &commands);

    assert_eq!(session.phase(), SessionPhase::Idle);
    assert!(session.is_found(1));
    assert_eq!(
        effects
            .iter()
            .filter(|e| matches!(e, Effect::WordFound { .. }))
            .count(),
        1
    );
    assert_eq!(effects.iter().map(Effect::points).sum::<u32>(), 50);
}

#[test]
fn test_found_set_is_idempotent() {
    let session = PuzzleSession::new(&crossword());
    let mut commands = vec![Command::Select(2)];
    commands.extend(letters("GATO"));
    commands.push(Command::Select(2));
    commands.extend(letters("GATO"));
    let (session, effects) = play(session, &commands);

    assert_eq!(session.found().len(), 1);
    assert_eq!(effects.iter().map(Effect::points).sum::<u32>(), 40);
}

#[test]
fn test_mismatch_keeps_selection() {
    let session = PuzzleSession::new(&crossword());
    let mut commands = vec![Command::Select(3)];
    commands.extend(letters("CASO"));
    let (session, effects) = play(session, &commands);

    assert_eq!(effects.last(), Some(&Effect::InputCleared));
    assert_eq!(session.phase(), SessionPhase::Selected);
    assert_eq!(*session.selection().unwrap().number(), 3);
    assert!(session.found().is_empty());
}

#[test]
fn test_manual_check_with_partial_input_clears_it() {
    let session = PuzzleSession::new(&crossword());
    let (session, effects) = play(
        session,
        &[
            Command::Select(1),
            Command::Letter('T'),
            Command::Letter('O'),
            Command::Check,
        ],
    );
    assert_eq!(effects.last(), Some(&Effect::InputCleared));
    assert!(session.selection().unwrap().input().is_empty());
}

#[test]
fn test_invalid_commands_are_ignored() {
    let session = PuzzleSession::new(&crossword());
    let (after, effects) = play(
        session.clone(),
        &[
            Command::Letter('A'),
            Command::Backspace,
            Command::Check,
            Command::Clear,
            Command::Select(42),
            Command::SelectAt(Coord::new(0, 0)),
        ],
    );
    assert!(effects.is_empty());
    assert_eq!(after, session);
}

#[test]
fn test_non_letters_are_ignored() {
    let session = PuzzleSession::new(&crossword());
    let (session, effects) = play(
        session,
        &[Command::Select(1), Command::Letter('4'), Command::Letter(' ')],
    );
    assert_eq!(effects, vec![Effect::Selected { number: 1 }]);
    assert!(session.selection().unwrap().input().is_empty());
}

#[test]
fn test_cycle_select_on_crossing_cell() {
    // (11, 10) is shared by GATO (2) and CASA (3)
    let session = PuzzleSession::new(&crossword());
    let cell = Coord::new(11, 10);
    let (session, effects) = play(
        session,
        &[
            Command::SelectAt(cell),
            Command::SelectAt(cell),
            Command::SelectAt(cell),
        ],
    );
    assert_eq!(
        effects,
        vec![
            Effect::Selected { number: 2 },
            Effect::Selected { number: 3 },
            Effect::Selected { number: 2 },
        ]
    );
    assert_eq!(*session.selection().unwrap().number(), 2);
}

#[test]
fn test_select_at_single_word_cell() {
    let session = PuzzleSession::new(&crossword());
    let t = session.apply(Command::SelectAt(Coord::new(12, 14)));
    assert_eq!(t.effects, vec![Effect::Selected { number: 1 }]);
}

#[test]
fn test_solving_all_words_solves_the_puzzle() {
    let session = PuzzleSession::new(&crossword());
    let mut commands = Vec::new();
    for (number, word) in [(1, "TORRE"), (2, "GATO"), (3, "CASA")] {
        commands.push(Command::Select(number));
        commands.extend(letters(word));
    }
    let (session, effects) = play(session, &commands);

    assert!(session.is_solved());
    assert_eq!(effects.last(), Some(&Effect::PuzzleSolved));
    assert_eq!(
        effects.iter().filter(|e| **e == Effect::PuzzleSolved).count(),
        1
    );
    assert_eq!(effects.iter().map(Effect::points).sum::<u32>(), 130);
}

#[test]
fn test_terminate_stops_play() {
    let mut session = PuzzleSession::new(&crossword());
    session = session.apply(Command::Select(1)).session;
    session.terminate();

    assert!(!session.is_active());
    assert_eq!(session.phase(), SessionPhase::Idle);
    let (session, effects) = play(session, &letters("TORRE"));
    assert!(effects.is_empty());
    assert!(session.found().is_empty());
}

#[test]
fn test_custom_points_per_letter() {
    let session = PuzzleSession::new(&crossword()).with_points_per_letter(3);
    let mut commands = vec![Command::Select(2)];
    commands.extend(letters("GATO"));
    let (_, effects) = play(session, &commands);
    assert!(effects.contains(&Effect::WordFound {
        number: 2,
        points: 12
    }));
}

#[test]
fn test_effects_serialize_for_presentation() {
    let value = serde_json::to_value(Effect::WordFound {
        number: 2,
        points: 40,
    })
    .expect("Serialize failed");
    assert_eq!(
        value,
        serde_json::json!({ "WordFound": { "number": 2, "points": 40 } })
    );

    let session = PuzzleSession::new(&crossword())
        .apply(Command::Select(1))
        .session;
    let snapshot = serde_json::to_value(session.selection()).expect("Serialize failed");
    assert_eq!(snapshot["number"], 1);
    assert_eq!(snapshot["input"], serde_json::json!([]));
}
