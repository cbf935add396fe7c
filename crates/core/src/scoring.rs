//! Scoring module - line clear payout, level progression, and gravity speed
//!
//! - Payout is `LINE_SCORES[min(lines, 4)] * level`.
//! - Level is `lines_cleared / 10 + 1`.
//! - Gravity interval is `max(100, 1000 - (level - 1) * 50)` milliseconds.

use crate::types::{
    BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS,
};

/// Points for clearing `lines` rows in a single lock at `level`
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    let idx = lines.min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level reached after clearing `total_lines` rows in the current game
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (1-based)
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(speedup).max(MIN_DROP_MS)
}
