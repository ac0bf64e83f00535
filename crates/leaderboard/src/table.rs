//! Serializable score table shared by the store implementations.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{is_known_game, SaveOutcome, DEFAULT_PLAYER};

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub display_name: String,
    pub best_score: u32,
    /// Unix timestamp (seconds) of the last update
    pub updated_at: u64,
}

/// Scores grouped by game id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    #[serde(default)]
    pub games: BTreeMap<String, Vec<ScoreEntry>>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `score` for `player`, keeping the higher of old and new.
    ///
    /// Ties overwrite, which refreshes `updated_at`.
    pub fn submit(&mut self, game_id: &str, player: &str, score: u32, now: u64) -> SaveOutcome {
        if !is_known_game(game_id) {
            return SaveOutcome::Rejected;
        }
        let player = normalize_player(player);
        let entries = self.games.entry(game_id.to_string()).or_default();

        match entries.iter_mut().find(|e| e.display_name == player) {
            Some(entry) if score >= entry.best_score => {
                entry.best_score = score;
                entry.updated_at = now;
                SaveOutcome::Updated
            }
            Some(_) => SaveOutcome::Kept,
            None => {
                entries.push(ScoreEntry {
                    display_name: player.to_string(),
                    best_score: score,
                    updated_at: now,
                });
                SaveOutcome::Created
            }
        }
    }

    pub fn best_score(&self, game_id: &str, player: &str) -> Option<u32> {
        let player = normalize_player(player);
        self.games
            .get(game_id)?
            .iter()
            .find(|e| e.display_name == player)
            .map(|e| e.best_score)
    }

    /// Highest first; equal scores keep the earlier update first.
    pub fn top_scores(&self, game_id: &str, limit: usize) -> Vec<ScoreEntry> {
        let mut entries = self.games.get(game_id).cloned().unwrap_or_default();
        entries.sort_by(|a, b| {
            b.best_score
                .cmp(&a.best_score)
                .then(a.updated_at.cmp(&b.updated_at))
        });
        entries.truncate(limit);
        entries
    }

    /// Number of stored entries across all games.
    pub fn len(&self) -> usize {
        self.games.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn normalize_player(player: &str) -> &str {
    let trimmed = player.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER
    } else {
        trimmed
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_known_games_are_accepted() {
        let mut table = ScoreTable::new();
        assert_eq!(table.submit("tetris", "a", 10, 1), SaveOutcome::Created);
        assert_eq!(table.submit("breakout", "a", 10, 1), SaveOutcome::Created);
        assert_eq!(table.submit("pong", "a", 10, 1), SaveOutcome::Rejected);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_overwrite_only_when_not_lower() {
        let mut table = ScoreTable::new();
        table.submit("tetris", "a", 500, 1);
        assert_eq!(table.submit("tetris", "a", 499, 2), SaveOutcome::Kept);
        assert_eq!(table.best_score("tetris", "a"), Some(500));
        assert_eq!(table.submit("tetris", "a", 500, 3), SaveOutcome::Updated);
        assert_eq!(table.top_scores("tetris", 1)[0].updated_at, 3);
        assert_eq!(table.submit("tetris", "a", 800, 4), SaveOutcome::Updated);
        assert_eq!(table.best_score("tetris", "a"), Some(800));
    }

    #[test]
    fn test_top_scores_sorted_and_limited() {
        let mut table = ScoreTable::new();
        table.submit("tetris", "a", 300, 1);
        table.submit("tetris", "b", 900, 2);
        table.submit("tetris", "c", 600, 3);
        table.submit("tetris", "d", 900, 4);
        let top: Vec<_> = table
            .top_scores("tetris", 3)
            .into_iter()
            .map(|e| (e.display_name, e.best_score))
            .collect();
        assert_eq!(
            top,
            vec![("b".to_string(), 900), ("d".to_string(), 900), ("c".to_string(), 600)]
        );
        assert!(table.top_scores("fps", 10).is_empty());
    }

    #[test]
    fn test_blank_player_uses_default_name() {
        let mut table = ScoreTable::new();
        table.submit("tetris", "  ", 100, 1);
        assert_eq!(table.best_score("tetris", DEFAULT_PLAYER), Some(100));
        assert_eq!(table.best_score("tetris", ""), Some(100));
    }

    #[test]
    fn test_json_shape() {
        let mut table = ScoreTable::new();
        table.submit("tetris", "a", 100, 7);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["games"]["tetris"][0]["bestScore"], 100);
        assert_eq!(json["games"]["tetris"][0]["displayName"], "a");
        let back: ScoreTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }
}
