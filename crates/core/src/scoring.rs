//! Scoring module - points and star rating for a completed level
//!
//! Points are a flat completion award plus a time bonus and a move-efficiency
//! bonus. Stars depend only on the fraction of the time limit left:
//!
//! | Stars | Time remaining |
//! |-------|----------------|
//! | 3 | more than 7/10 of the limit |
//! | 2 | more than 4/10 of the limit |
//! | 1 | anything else |

use crate::types::{
    BASE_COMPLETION_POINTS, MOVE_BONUS_PER_MOVE, THREE_STAR_TENTHS, TIME_BONUS_PER_SECOND,
    TWO_STAR_TENTHS,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Flat completion award.
    pub base: u32,
    /// `round(time_remaining * 10)`.
    pub time_bonus: u32,
    /// Points for moves saved against the move target.
    pub move_bonus: u32,
    pub points: u32,
    pub stars: u8,
}

/// Time bonus for the seconds left on the clock. Negative or non-finite
/// remainders earn nothing.
pub fn time_bonus(time_remaining: f64) -> u32 {
    if !time_remaining.is_finite() || time_remaining <= 0.0 {
        return 0;
    }
    (time_remaining * TIME_BONUS_PER_SECOND as f64).round() as u32
}

/// Bonus for finishing in fewer moves than `move_target`.
pub fn move_bonus(moves: u32, move_target: u32) -> u32 {
    move_target
        .saturating_sub(moves)
        .saturating_mul(MOVE_BONUS_PER_MOVE)
}

/// Star rating relative to the level's time limit (strict comparisons).
///
/// # Examples
///
/// ```
/// use tile_swap_core::scoring::stars_for;
///
/// assert_eq!(stars_for(43.0, 60.0), 3);
/// assert_eq!(stars_for(42.0, 60.0), 2);
/// assert_eq!(stars_for(24.0, 60.0), 1);
/// ```
pub fn stars_for(time_remaining: f64, time_limit: f64) -> u8 {
    // Compare in tenths so 42 of 60 is exactly not above 7/10.
    let remaining = time_remaining * 10.0;
    if remaining > time_limit * THREE_STAR_TENTHS as f64 {
        3
    } else if remaining > time_limit * TWO_STAR_TENTHS as f64 {
        2
    } else {
        1
    }
}

/// Calculate the full score for a completed level.
///
/// # Examples
///
/// ```
/// use tile_swap_core::scoring::score;
///
/// let result = score(42.0, 60.0, 8, 10);
/// assert_eq!(result.points, 530);
/// assert_eq!(result.stars, 2);
/// ```
pub fn score(time_remaining: f64, time_limit: f64, moves: u32, move_target: u32) -> ScoreResult {
    let base = BASE_COMPLETION_POINTS;
    let time_bonus = time_bonus(time_remaining);
    let move_bonus = move_bonus(moves, move_target);

    ScoreResult {
        base,
        time_bonus,
        move_bonus,
        points: base.saturating_add(time_bonus).saturating_add(move_bonus),
        stars: stars_for(time_remaining, time_limit),
    }
}
