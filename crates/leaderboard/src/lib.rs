//! Best-score persistence.
//!
//! One entry per player per game. A new score overwrites the stored one only
//! when it is at least as high, and only known game ids are accepted.
//!
//! ```
//! use blockfall_leaderboard::{Leaderboard, MemoryLeaderboard, SaveOutcome};
//!
//! let mut board = MemoryLeaderboard::new();
//! assert_eq!(board.save_best_score("tetris", "ana", 1200).unwrap(), SaveOutcome::Created);
//! assert_eq!(board.save_best_score("tetris", "ana", 900).unwrap(), SaveOutcome::Kept);
//! assert_eq!(board.best_score("tetris", "ana"), Some(1200));
//! assert_eq!(board.save_best_score("chess", "ana", 10).unwrap(), SaveOutcome::Rejected);
//! ```

pub mod file;
pub mod table;

pub use file::JsonFileLeaderboard;
pub use table::{ScoreEntry, ScoreTable};

use anyhow::Result;

/// Game ids the leaderboard accepts scores for.
pub const GAME_IDS: [&str; 5] = ["runrun", "tetris", "noahnohah", "fps", "breakout"];

/// Default number of entries returned by [`Leaderboard::top_scores`].
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Display name used when none is configured.
pub const DEFAULT_PLAYER: &str = "Player";

pub fn is_known_game(game_id: &str) -> bool {
    GAME_IDS.contains(&game_id)
}

/// What happened to a submitted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Unknown game id; nothing stored.
    Rejected,
    /// First score for this player.
    Created,
    /// The stored score was replaced.
    Updated,
    /// The stored score is higher and was kept.
    Kept,
}

impl SaveOutcome {
    /// Whether the submission reached the store at all.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected)
    }

    pub fn changed(&self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}

/// A best-score store.
pub trait Leaderboard {
    fn save_best_score(&mut self, game_id: &str, player: &str, score: u32) -> Result<SaveOutcome>;

    fn best_score(&self, game_id: &str, player: &str) -> Option<u32>;

    /// Entries for `game_id`, highest first.
    fn top_scores(&self, game_id: &str, limit: usize) -> Vec<ScoreEntry>;

    /// Highest score anyone has for `game_id`.
    fn record(&self, game_id: &str) -> Option<u32> {
        self.top_scores(game_id, 1).first().map(|e| e.best_score)
    }
}

/// In-memory store; scores last for the session only.
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    table: ScoreTable,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Leaderboard for MemoryLeaderboard {
    fn save_best_score(&mut self, game_id: &str, player: &str, score: u32) -> Result<SaveOutcome> {
        Ok(self.table.submit(game_id, player, score, table::unix_now()))
    }

    fn best_score(&self, game_id: &str, player: &str) -> Option<u32> {
        self.table.best_score(game_id, player)
    }

    fn top_scores(&self, game_id: &str, limit: usize) -> Vec<ScoreEntry> {
        self.table.top_scores(game_id, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_report_acceptance_and_change() {
        let mut board = MemoryLeaderboard::new();

        let outcome = board.save_best_score("tetris", "ari", 300).unwrap();
        assert_eq!(outcome, SaveOutcome::Created);
        assert!(outcome.is_accepted() && outcome.changed());

        let outcome = board.save_best_score("tetris", "ari", 100).unwrap();
        assert_eq!(outcome, SaveOutcome::Kept);
        assert!(outcome.is_accepted());
        assert!(!outcome.changed());

        let outcome = board.save_best_score("tetris", "ari", 300).unwrap();
        assert_eq!(outcome, SaveOutcome::Updated);
        assert!(outcome.changed());

        let outcome = board.save_best_score("pinball", "ari", 900).unwrap();
        assert_eq!(outcome, SaveOutcome::Rejected);
        assert!(!outcome.is_accepted());
        assert!(!outcome.changed());
        assert_eq!(board.record("tetris"), Some(300));
    }
}
