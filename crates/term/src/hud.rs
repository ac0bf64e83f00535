//! Hud: the score panel state, folded from engine events.

use crate::core::{EngineEvent, UiSink};
use crate::i18n::{I18n, Language};

#[derive(Debug, Clone)]
pub struct Hud {
    i18n: I18n,
    score: u32,
    level: u32,
    lines: u32,
    best_score: u32,
    paused: bool,
    final_score: Option<u32>,
    new_record: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Hud {
    pub fn new(language: Language) -> Self {
        Self {
            i18n: I18n::new(language),
            score: 0,
            level: 1,
            lines: 0,
            best_score: 0,
            paused: false,
            final_score: None,
            new_record: false,
        }
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Best score shown in the panel; a running game that beats the stored
    /// record displays its own score.
    pub fn best_score(&self) -> u32 {
        self.best_score.max(self.score)
    }

    /// Seed the stored record, typically from the leaderboard.
    pub fn set_best_score(&mut self, best: u32) {
        self.best_score = best;
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Whether the finished game beat the stored record.
    pub fn new_record(&self) -> bool {
        self.new_record
    }
}

impl UiSink for Hud {
    fn on_event(&mut self, event: &EngineEvent) {
        match *event {
            EngineEvent::ScoreChanged { score, level } => {
                self.score = score;
                self.level = level;
            }
            EngineEvent::LinesCleared { count } => {
                self.lines = self.lines.saturating_add(count);
            }
            EngineEvent::PieceLocked { .. } => {}
            EngineEvent::PauseChanged { paused } => self.paused = paused,
            EngineEvent::GameOver { final_score } => {
                self.final_score = Some(final_score);
                self.new_record = final_score > self.best_score;
                self.best_score = self.best_score.max(final_score);
                self.paused = false;
            }
            EngineEvent::Reset => {
                self.score = 0;
                self.level = 1;
                self.lines = 0;
                self.paused = false;
                self.final_score = None;
                self.new_record = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_folds_score_and_lines() {
        let mut hud = Hud::new(Language::En);
        hud.on_event(&EngineEvent::PieceLocked { kind: PieceKind::I });
        hud.on_event(&EngineEvent::LinesCleared { count: 4 });
        hud.on_event(&EngineEvent::ScoreChanged { score: 800, level: 1 });
        hud.on_event(&EngineEvent::LinesCleared { count: 1 });
        hud.on_event(&EngineEvent::ScoreChanged { score: 900, level: 1 });
        assert_eq!(hud.score(), 900);
        assert_eq!(hud.lines(), 5);
        assert_eq!(hud.level(), 1);
    }

    #[test]
    fn test_game_over_tracks_record() {
        let mut hud = Hud::new(Language::Ko);
        hud.set_best_score(1000);
        hud.on_event(&EngineEvent::ScoreChanged { score: 1200, level: 1 });
        assert_eq!(hud.best_score(), 1200);
        hud.on_event(&EngineEvent::GameOver { final_score: 1200 });
        assert_eq!(hud.final_score(), Some(1200));
        assert!(hud.new_record());

        hud.on_event(&EngineEvent::Reset);
        hud.on_event(&EngineEvent::ScoreChanged { score: 0, level: 1 });
        assert_eq!(hud.final_score(), None);
        assert_eq!(hud.best_score(), 1200);
        hud.on_event(&EngineEvent::GameOver { final_score: 300 });
        assert!(!hud.new_record());
    }

    #[test]
    fn test_pause_flag_follows_events() {
        let mut hud = Hud::default();
        hud.on_event(&EngineEvent::PauseChanged { paused: true });
        assert!(hud.paused());
        hud.on_event(&EngineEvent::PauseChanged { paused: false });
        assert!(!hud.paused());
    }
}
