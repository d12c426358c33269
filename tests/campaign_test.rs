//! Tests for the level campaign.

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_crossword::{Command, Effect, WordEntry};
use strictly_puzzles::{
    Campaign, GameConfig, LevelStatus, ScoreSink, SessionSummary, SubmissionError, WordPool,
};

const TWO_LEVELS: &str = r#"
    [[levels]]
    id = 1
    words = 3
    time_secs = 100
    theme = "One"

    [[levels]]
    id = 2
    words = 3
    time_secs = 50
    theme = "Two"
"#;

fn campaign() -> Campaign {
    let config = GameConfig::from_toml(TWO_LEVELS).expect("Config failed");
    let pool = WordPool::new(
        ["GATO", "CASA", "TORRE"]
            .iter()
            .map(|w| WordEntry::new(w, format!("Clue for {w}"))),
    );
    Campaign::new(config, pool, StdRng::seed_from_u64(1)).expect("Campaign failed")
}

/// Types every answer of the current level.
fn solve(campaign: &mut Campaign) -> Vec<Effect> {
    let answers: Vec<(usize, String)> = campaign
        .crossword()
        .placed()
        .iter()
        .map(|w| (*w.number(), w.word().text().clone()))
        .collect();

    let mut effects = Vec::new();
    for (number, text) in answers {
        effects.extend(campaign.apply(Command::Select(number)));
        for c in text.chars() {
            effects.extend(campaign.apply(Command::Letter(c)));
        }
    }
    effects
}

#[test]
fn test_first_level_starts_with_its_own_time() {
    let campaign = campaign();
    assert_eq!(*campaign.level().id(), 1);
    assert_eq!(campaign.time_remaining(), 100);
    assert_eq!(campaign.status(), LevelStatus::InProgress);
    assert_eq!(campaign.crossword().placed().len(), 3);
}

#[test]
fn test_completing_a_level_adds_time_bonus() {
    let mut campaign = campaign();
    campaign.tick(40);
    let effects = solve(&mut campaign);

    assert!(effects.contains(&Effect::PuzzleSolved));
    assert_eq!(campaign.status(), LevelStatus::Completed);
    // 13 letters at 10 points plus 60 seconds at 5 points
    assert_eq!(campaign.level_score(), 130 + 300);
    assert_eq!(campaign.total_score(), 430);
    assert_eq!(campaign.completed_levels(), &[1]);
}

#[test]
fn test_next_level_carries_time_over() {
    let mut campaign = campaign();
    campaign.tick(40);
    solve(&mut campaign);

    assert!(campaign.next_level().expect("Next level failed"));
    assert_eq!(*campaign.level().id(), 2);
    assert_eq!(campaign.time_remaining(), 60 + 50);
    assert_eq!(campaign.level_score(), 0);
    assert_eq!(campaign.total_score(), 430);

    solve(&mut campaign);
    assert!(campaign.is_finished());
    assert_eq!(campaign.completed_levels(), &[1, 2]);
    assert_eq!(campaign.total_score(), 430 + 130 + 110 * 5);
    assert!(!campaign.next_level().expect("Next level failed"));
}

#[test]
fn test_next_level_requires_completion() {
    let mut campaign = campaign();
    assert!(!campaign.next_level().expect("Next level failed"));
    assert_eq!(*campaign.level().id(), 1);
}

#[test]
fn test_running_out_of_time_fails_the_level() {
    let mut campaign = campaign();
    assert_eq!(campaign.tick(99), LevelStatus::InProgress);
    assert_eq!(campaign.tick(5), LevelStatus::Failed);
    assert_eq!(campaign.time_remaining(), 0);
    assert!(!campaign.session().is_active());

    assert!(campaign.apply(Command::Select(1)).is_empty());
    assert_eq!(campaign.level_score(), 0);
}

#[test]
fn test_restart_level_keeps_bank_and_resets_level_score() {
    let mut campaign = campaign();
    campaign.apply(Command::Select(2));
    for c in "GATO".chars() {
        campaign.apply(Command::Letter(c));
    }
    assert_eq!(campaign.level_score(), 40);
    campaign.tick(100);

    campaign.restart_level().expect("Restart failed");
    assert_eq!(campaign.status(), LevelStatus::InProgress);
    assert_eq!(campaign.level_score(), 0);
    assert_eq!(campaign.time_remaining(), 100);
    assert!(campaign.session().found().is_empty());
}

#[test]
fn test_restart_game_clears_everything() {
    let mut campaign = campaign();
    solve(&mut campaign);
    campaign.next_level().expect("Next level failed");

    campaign.restart_game().expect("Restart failed");
    assert_eq!(*campaign.level().id(), 1);
    assert_eq!(campaign.total_score(), 0);
    assert!(campaign.completed_levels().is_empty());
    assert_eq!(campaign.time_remaining(), 100);
}

#[test]
fn test_summary_reports_highest_completed_level() {
    let mut campaign = campaign();
    let summary = campaign.summary("Uxía");
    assert_eq!(*summary.level(), 1);
    assert_eq!(*summary.score(), 0);
    assert_eq!(*summary.total_count(), 3);

    solve(&mut campaign);
    campaign.next_level().expect("Next level failed");
    let summary = campaign.summary("Uxía");
    assert_eq!(summary.name(), "Uxía");
    assert_eq!(*summary.level(), 1);
    assert_eq!(summary.completed_levels(), &vec![1]);
    assert_eq!(*summary.score(), campaign.total_score());
    assert_eq!(*summary.found_count(), 0);
}

#[derive(Default)]
struct RecordingSink {
    received: RefCell<Vec<SessionSummary>>,
}

impl ScoreSink for RecordingSink {
    type Error = SubmissionError;

    fn submit(&self, summary: &SessionSummary) -> Result<(), Self::Error> {
        self.received.borrow_mut().push(summary.clone());
        Ok(())
    }
}

struct RejectingSink;

impl ScoreSink for RejectingSink {
    type Error = SubmissionError;

    fn submit(&self, _summary: &SessionSummary) -> Result<(), Self::Error> {
        Err(SubmissionError::new("offline"))
    }
}

#[test]
fn test_submit_forwards_summary() {
    let campaign = campaign();
    let sink = RecordingSink::default();
    assert!(campaign.submit(&sink, "Brais"));
    assert_eq!(sink.received.borrow()[0].name(), "Brais");
}

#[test]
fn test_failed_submission_does_not_disturb_play() {
    let mut campaign = campaign();
    assert!(!campaign.submit(&RejectingSink, "Brais"));
    assert_eq!(campaign.status(), LevelStatus::InProgress);
    assert!(!campaign.apply(Command::Select(1)).is_empty());
}

#[test]
fn test_huge_config_values_saturate() {
    let config = GameConfig::from_toml(
        r#"
        points_per_letter = 4294967295
        time_bonus_per_second = 4294967295

        [[levels]]
        id = 1
        words = 3
        time_secs = 4294967295
        theme = "One"

        [[levels]]
        id = 2
        words = 3
        time_secs = 4294967295
        theme = "Two"
        "#,
    )
    .expect("Config failed");
    let pool = WordPool::new(
        ["GATO", "CASA", "TORRE"]
            .iter()
            .map(|w| WordEntry::new(w, format!("Clue for {w}"))),
    );
    let mut campaign =
        Campaign::new(config, pool, StdRng::seed_from_u64(1)).expect("Campaign failed");

    solve(&mut campaign);
    assert_eq!(campaign.total_score(), u32::MAX);
    assert!(campaign.next_level().expect("Next level failed"));
    assert_eq!(campaign.time_remaining(), u32::MAX);
}
