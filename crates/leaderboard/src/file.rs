//! JSON file store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::table::{unix_now, ScoreEntry, ScoreTable};
use crate::{Leaderboard, SaveOutcome};

/// Leaderboard persisted as one JSON document.
///
/// The whole table is rewritten on every change, through a temporary file
/// renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileLeaderboard {
    path: PathBuf,
    table: ScoreTable,
}

impl JsonFileLeaderboard {
    /// Load `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str::<ScoreTable>(&json)
                .with_context(|| format!("parse leaderboard {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No leaderboard at {}, starting fresh", path.display());
                ScoreTable::new()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read leaderboard {}", path.display()))
            }
        };
        log::info!("Loaded {} leaderboard entries from {}", table.len(), path.display());
        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.table).context("serialize leaderboard")?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("create leaderboard dir {}", dir.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace leaderboard {}", self.path.display()))?;
        log::info!("Leaderboard saved ({} entries)", self.table.len());
        Ok(())
    }
}

impl Leaderboard for JsonFileLeaderboard {
    fn save_best_score(&mut self, game_id: &str, player: &str, score: u32) -> Result<SaveOutcome> {
        let outcome = self.table.submit(game_id, player, score, unix_now());
        if outcome.changed() {
            self.persist()?;
        } else if outcome.is_accepted() {
            log::debug!("Stored {game_id} score for {player} is higher than {score}");
        } else {
            log::warn!("Ignoring score for unknown game id {game_id:?}");
        }
        Ok(outcome)
    }

    fn best_score(&self, game_id: &str, player: &str) -> Option<u32> {
        self.table.best_score(game_id, player)
    }

    fn top_scores(&self, game_id: &str, limit: usize) -> Vec<ScoreEntry> {
        self.table.top_scores(game_id, limit)
    }
}
