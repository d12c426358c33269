//! Score values for solved words and leftover time.

use tracing::instrument;

/// Points awarded per letter of a solved word.
pub const POINTS_PER_LETTER: u32 = 10;

/// Points awarded per second left when a level is completed.
pub const TIME_BONUS_PER_SECOND: u32 = 5;

/// Points for solving a word of `len` letters.
#[instrument]
pub fn word_points(len: usize, points_per_letter: u32) -> u32 {
    u32::try_from(len)
        .unwrap_or(u32::MAX)
        .saturating_mul(points_per_letter)
}

/// Bonus for finishing a level with `remaining_secs` left on the clock.
#[instrument]
pub fn time_bonus(remaining_secs: u32, bonus_per_second: u32) -> u32 {
    remaining_secs.saturating_mul(bonus_per_second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_points() {
        assert_eq!(word_points(5, POINTS_PER_LETTER), 50);
    }

    #[test]
    fn test_time_bonus() {
        assert_eq!(time_bonus(42, TIME_BONUS_PER_SECOND), 210);
        assert_eq!(time_bonus(0, TIME_BONUS_PER_SECOND), 0);
    }

    #[test]
    fn test_large_rates_saturate() {
        assert_eq!(word_points(13, u32::MAX), u32::MAX);
        assert_eq!(time_bonus(u32::MAX, 2), u32::MAX);
    }
}
