//! Scoring module - line clear points, level and drop interval
//!
//! - A clear of N rows at once is worth `LINE_SCORES[N] * level`.
//! - `level = score / 2000 + 1`.
//! - `drop_interval = max(100, 1000 - (level - 1) * 100)` milliseconds.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, LEVEL_SCORE_STEP, LINE_SCORES,
};

/// Points for clearing `lines` rows in one lock at `level` (1-based).
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    let idx = lines.min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level reached with `score` points.
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_SCORE_STEP + 1
}

/// Milliseconds between automatic downward steps at `level`.
pub fn drop_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(DROP_INTERVAL_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(reduction)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Score/level/interval after one clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub points: u32,
    pub score: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

/// Apply a clear of `lines` rows to the current `score` at `level`.
pub fn apply_clear(score: u32, level: u32, lines: usize) -> ScoreUpdate {
    let points = line_clear_score(lines, level);
    let score = score.saturating_add(points);
    let level = level_for_score(score);
    ScoreUpdate {
        points,
        score,
        level,
        drop_interval_ms: drop_interval_ms(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_at_level_one() {
        assert_eq!(line_clear_score(0, 1), 0);
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(2, 1), 300);
        assert_eq!(line_clear_score(3, 1), 500);
        assert_eq!(line_clear_score(4, 1), 800);
    }

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(line_clear_score(4, 3), 2400);
        assert_eq!(line_clear_score(1, 5), 500);
    }

    #[test]
    fn test_level_for_score() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(1999), 1);
        assert_eq!(level_for_score(2000), 2);
        assert_eq!(level_for_score(4100), 3);
    }

    #[test]
    fn test_drop_interval_floor() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 900);
        assert_eq!(drop_interval_ms(10), 100);
        assert_eq!(drop_interval_ms(11), 100);
        assert_eq!(drop_interval_ms(u32::MAX), 100);
    }

    #[test]
    fn test_apply_clear_crosses_level() {
        let update = apply_clear(1900, 1, 1);
        assert_eq!(update.points, 100);
        assert_eq!(update.score, 2000);
        assert_eq!(update.level, 2);
        assert_eq!(update.drop_interval_ms, 900);
    }
}
