//! Runner configuration read from `BLOCKFALL_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::leaderboard::DEFAULT_PLAYER;
use crate::term::Language;

/// Synthetic key-up delay used when the terminal cannot report releases.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

pub const DEFAULT_SCORES_PATH: &str = "blockfall-scores.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub language: Language,
    pub scores_path: PathBuf,
    pub player: String,
    /// `None` picks a value from terminal capabilities; `Some(0)` disables.
    pub key_release_timeout_ms: Option<u32>,
    pub leaderboard_disabled: bool,
    pub log_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            language: Language::Ko,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            player: DEFAULT_PLAYER.to_string(),
            key_release_timeout_ms: None,
            leaderboard_disabled: false,
            log_enabled: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("BLOCKFALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(time_seed);

        let language = get("BLOCKFALL_LANG")
            .and_then(|s| Language::from_str(&s))
            .unwrap_or_default();

        let scores_path = get("BLOCKFALL_SCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCORES_PATH));

        let player = get("BLOCKFALL_PLAYER").unwrap_or_else(|| DEFAULT_PLAYER.to_string());

        let key_release_timeout_ms =
            get("BLOCKFALL_KEY_RELEASE_TIMEOUT_MS").and_then(|s| s.parse().ok());

        let leaderboard_disabled = get("BLOCKFALL_LEADERBOARD_DISABLED")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let log_enabled = get("BLOCKFALL_LOG").is_some();

        Self {
            seed,
            language,
            scores_path,
            player,
            key_release_timeout_ms,
            leaderboard_disabled,
            log_enabled,
        }
    }

    /// Key-release timeout to hand the autorepeat controller.
    ///
    /// Terminals that report key releases need none unless one was configured.
    pub fn key_release_timeout(&self, release_events_supported: bool) -> Option<u32> {
        match self.key_release_timeout_ms {
            Some(0) => None,
            Some(ms) => Some(ms),
            None if release_events_supported => None,
            None => Some(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }
}

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}
