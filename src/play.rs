//! Line-driven terminal play.
//!
//! Each input line is translated into session commands. Wall time between
//! lines feeds the campaign clock.

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Result;
use strictly_crossword::{Command, Coord, Crossword, Direction, Effect, PuzzleSession};
use tracing::{debug, info, instrument};

use crate::{Campaign, LevelStatus, ScoreSink};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayInput {
    /// Commands to apply in order.
    Commands(Vec<Command>),
    /// Leave the game.
    Quit,
    /// Replay the current level.
    RestartLevel,
    /// Start over from the first level.
    RestartGame,
    /// Nothing usable on the line.
    Invalid(String),
}

/// Parses a line of player input.
///
/// - `q` quits, `r` restarts the level, `n` starts a new game
/// - `<number>` selects that word
/// - `<row> <col>` selects through a cell (1-based, as displayed)
/// - `-` backspace, `!` check, `.` clear
/// - anything else is typed letter by letter
///
/// Display coordinates are translated with `origin`, the top-left cell of
/// the displayed area.
#[instrument]
pub fn parse_line(line: &str, origin: Coord) -> PlayInput {
    let line = line.trim();
    match line {
        "" => return PlayInput::Invalid(String::new()),
        "q" | "Q" => return PlayInput::Quit,
        "r" | "R" => return PlayInput::RestartLevel,
        "n" | "N" => return PlayInput::RestartGame,
        "-" => return PlayInput::Commands(vec![Command::Backspace]),
        "!" => return PlayInput::Commands(vec![Command::Check]),
        "." => return PlayInput::Commands(vec![Command::Clear]),
        _ => {}
    }

    let numbers: Vec<Option<usize>> = line.split_whitespace().map(|p| p.parse().ok()).collect();
    match numbers[..] {
        [Some(number)] => return PlayInput::Commands(vec![Command::Select(number)]),
        [Some(row), Some(col)] if row > 0 && col > 0 => {
            let coord = origin
                .row
                .checked_add(row - 1)
                .zip(origin.col.checked_add(col - 1));
            return match coord {
                Some((row, col)) => {
                    PlayInput::Commands(vec![Command::SelectAt(Coord::new(row, col))])
                }
                None => PlayInput::Invalid(line.to_string()),
            };
        }
        _ => {}
    }

    let commands: Option<Vec<Command>> = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Command::from_key(c.encode_utf8(&mut [0; 4])))
        .collect();
    match commands {
        Some(commands) => PlayInput::Commands(commands),
        None => PlayInput::Invalid(line.to_string()),
    }
}

/// Draws the puzzle as the player sees it.
///
/// `#` marks unused cells, `_` empty cells, and `*` the next cell to type
/// into. Rows and columns are numbered from 1.
#[instrument(skip(crossword, session))]
pub fn render_board(crossword: &Crossword, session: &PuzzleSession) -> String {
    let bounds = crossword.bounds();
    let cursor = session.selection().and_then(|s| s.cursor());

    let header: String = (1..=bounds.width()).map(|c| format!("{:>3}", c)).collect();
    let mut lines = vec![format!("   {}", header)];

    for (r, row) in (bounds.min_row..=bounds.max_row).enumerate() {
        let cells: String = (bounds.min_col..=bounds.max_col)
            .map(|col| {
                let coord = Coord::new(row, col);
                let glyph = if crossword.words_at(coord).is_empty() {
                    '#'
                } else if let Some(letter) = session.letter_at(coord) {
                    letter
                } else if cursor == Some(coord) {
                    '*'
                } else {
                    '_'
                };
                format!("{:>3}", glyph)
            })
            .collect();
        lines.push(format!("{:>3}{}", r + 1, cells));
    }
    lines.join("\n")
}

/// Lists the clues by direction, marking found words.
#[instrument(skip(crossword, session))]
pub fn render_clues(crossword: &Crossword, session: &PuzzleSession) -> String {
    let mut lines = Vec::new();
    for (direction, title) in [
        (Direction::Horizontal, "Across"),
        (Direction::Vertical, "Down"),
    ] {
        lines.push(format!("{}:", title));
        for word in crossword.clues(direction) {
            let mark = if session.is_found(*word.number()) {
                "✓"
            } else {
                " "
            };
            lines.push(format!(
                " {} {:>2}. {} ({})",
                mark,
                word.number(),
                word.word().clue(),
                word.word().len()
            ));
        }
    }
    lines.join("\n")
}

/// How a play loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every level completed.
    Finished,
    /// The player quit.
    Quit,
}

/// Drives a campaign from line input.
pub struct PlayLoop<'a, W: Write> {
    campaign: &'a mut Campaign,
    output: W,
    last_input: Instant,
    carry_ms: u128,
}

impl<'a, W: Write> PlayLoop<'a, W> {
    /// Creates a loop writing to `output`.
    pub fn new(campaign: &'a mut Campaign, output: W) -> Self {
        Self {
            campaign,
            output,
            last_input: Instant::now(),
            carry_ms: 0,
        }
    }

    /// Reads lines until the game ends or input runs out.
    ///
    /// When `name` is given the final summary goes to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or if a crossword cannot be generated.
    #[instrument(skip(self, input, sink))]
    pub fn run<R: BufRead, S: ScoreSink>(
        &mut self,
        input: R,
        sink: Option<&S>,
        name: Option<&str>,
    ) -> Result<PlayOutcome> {
        self.show_level()?;
        let mut outcome = PlayOutcome::Quit;

        for line in input.lines() {
            let line = line?;
            self.advance_clock();

            if self.campaign.status() == LevelStatus::Failed {
                match parse_line(&line, self.origin()) {
                    PlayInput::RestartLevel => self.restart(false)?,
                    PlayInput::RestartGame => self.restart(true)?,
                    PlayInput::Quit => break,
                    _ => writeln!(self.output, "Time is up: [r]estart level, [n]ew game, [q]uit")?,
                }
                continue;
            }

            match parse_line(&line, self.origin()) {
                PlayInput::Quit => break,
                PlayInput::RestartLevel => self.restart(false)?,
                PlayInput::RestartGame => self.restart(true)?,
                PlayInput::Invalid(text) => {
                    debug!(%text, "Unrecognised input");
                    writeln!(self.output, "?")?;
                }
                PlayInput::Commands(commands) => {
                    for command in commands {
                        let effects = self.campaign.apply(command);
                        self.report(&effects)?;
                    }
                    match self.campaign.status() {
                        LevelStatus::Completed if self.campaign.has_next_level() => {
                            self.campaign.next_level()?;
                            self.show_level()?;
                        }
                        LevelStatus::Completed => {
                            outcome = PlayOutcome::Finished;
                            break;
                        }
                        _ => self.show_board()?,
                    }
                }
            }
        }

        writeln!(
            self.output,
            "Final score: {} (levels completed: {:?})",
            self.campaign.total_score(),
            self.campaign.completed_levels()
        )?;
        if let (Some(sink), Some(name)) = (sink, name) {
            let saved = self.campaign.submit(sink, name);
            writeln!(self.output, "{}", if saved { "Score saved" } else { "Score not saved" })?;
        }
        info!(?outcome, score = self.campaign.total_score(), "Play ended");
        Ok(outcome)
    }

    fn origin(&self) -> Coord {
        let bounds = self.campaign.crossword().bounds();
        Coord::new(bounds.min_row, bounds.min_col)
    }

    fn advance_clock(&mut self) {
        let elapsed = self.carry_ms + self.last_input.elapsed().as_millis();
        self.last_input = Instant::now();
        let seconds = u32::try_from(elapsed / 1000).unwrap_or(u32::MAX);
        self.carry_ms = elapsed % 1000;
        if self.campaign.tick(seconds) == LevelStatus::Failed {
            debug!("Clock ran out");
        }
    }

    fn restart(&mut self, whole_game: bool) -> Result<()> {
        if whole_game {
            self.campaign.restart_game()?;
        } else {
            self.campaign.restart_level()?;
        }
        self.show_level()
    }

    fn report(&mut self, effects: &[Effect]) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::WordFound { number, points } => {
                    writeln!(self.output, "Word {} found! +{}", number, points)?
                }
                Effect::InputCleared => writeln!(self.output, "Not quite, try again")?,
                Effect::PuzzleSolved => writeln!(
                    self.output,
                    "Level {} complete! Level score {}, total {}",
                    self.campaign.level().id(),
                    self.campaign.level_score(),
                    self.campaign.total_score()
                )?,
                _ => {}
            }
        }
        Ok(())
    }

    fn show_level(&mut self) -> Result<()> {
        let level = self.campaign.level();
        writeln!(
            self.output,
            "\n== Level {} ({}) - {} s ==",
            level.id(),
            level.theme(),
            self.campaign.time_remaining()
        )?;
        writeln!(
            self.output,
            "{}",
            render_clues(self.campaign.crossword(), self.campaign.session())
        )?;
        self.show_board()
    }

    fn show_board(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "{}\nScore {} | Time {} s",
            render_board(self.campaign.crossword(), self.campaign.session()),
            self
                .campaign
                .total_score()
                .saturating_add(self.campaign.level_score()),
            self.campaign.time_remaining()
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Coord = Coord { row: 10, col: 7 };

    #[test]
    fn test_parse_controls() {
        assert_eq!(parse_line("q", ORIGIN), PlayInput::Quit);
        assert_eq!(
            parse_line(" - ", ORIGIN),
            PlayInput::Commands(vec![Command::Backspace])
        );
        assert_eq!(
            parse_line("!", ORIGIN),
            PlayInput::Commands(vec![Command::Check])
        );
        assert_eq!(
            parse_line(".", ORIGIN),
            PlayInput::Commands(vec![Command::Clear])
        );
    }

    #[test]
    fn test_parse_select() {
        assert_eq!(
            parse_line("3", ORIGIN),
            PlayInput::Commands(vec![Command::Select(3)])
        );
        assert_eq!(
            parse_line("2 4", ORIGIN),
            PlayInput::Commands(vec![Command::SelectAt(Coord::new(11, 10))])
        );
    }

    #[test]
    fn test_parse_letters() {
        assert_eq!(
            parse_line("ga to", ORIGIN),
            PlayInput::Commands(vec![
                Command::Letter('G'),
                Command::Letter('A'),
                Command::Letter('T'),
                Command::Letter('O'),
            ])
        );
    }

    #[test]
    fn test_parse_rejects_mixed_input() {
        assert!(matches!(parse_line("ga7o", ORIGIN), PlayInput::Invalid(_)));
        assert!(matches!(parse_line("0 3", ORIGIN), PlayInput::Invalid(_)));
        assert!(matches!(parse_line("", ORIGIN), PlayInput::Invalid(_)));
    }

    #[test]
    fn test_parse_rejects_cells_past_usize() {
        let line = format!("{} 1", usize::MAX);
        assert_eq!(parse_line(&line, ORIGIN), PlayInput::Invalid(line.clone()));
        let line = format!("1 {}", usize::MAX);
        assert_eq!(parse_line(&line, ORIGIN), PlayInput::Invalid(line.clone()));
    }
}
