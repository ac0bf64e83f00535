//! HUD string tables.
//!
//! Lookup falls back to English, then to the key itself, so a missing entry
//! shows up on screen instead of disappearing.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl Language {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" => Some(Self::Ko),
            "en" | "english" => Some(Self::En),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }
}

const KO: &[(&str, &str)] = &[
    ("common.restart", "재시작"),
    ("common.pause", "일시정지"),
    ("common.resume", "재개하기"),
    ("common.quit", "종료"),
    ("common.controls", "조작방법"),
    ("tetris.next", "다음 블록들"),
    ("tetris.bestScore", "최고 점수"),
    ("tetris.currentScore", "현재 점수"),
    ("tetris.level", "레벨"),
    ("tetris.dropSpeed", "낙하 속도"),
    ("tetris.dropSpeedValue", "{ms}ms"),
    ("tetris.controls.leftRightDown", "방향키 : 이동 / 하강"),
    ("tetris.controls.rotate", "W / ↑ : 회전"),
    ("tetris.controls.hardDrop", "Space : 즉시 하강"),
    ("tetris.controls.pause", "P : 일시정지"),
    ("tetris.controls.restartQuit", "R : 재시작  Q : 종료"),
    ("tetris.paused", "일시정지"),
    ("tetris.gameOver", "게임 종료"),
    ("tetris.finalScore", "최종 점수"),
    ("tetris.bestRecord", "최고 기록"),
    ("tetris.newRecord", "새 기록!"),
    ("tetris.retry", "다시 시작 (R)"),
];

const EN: &[(&str, &str)] = &[
    ("common.restart", "Restart"),
    ("common.pause", "Pause"),
    ("common.resume", "Resume"),
    ("common.quit", "Quit"),
    ("common.controls", "Controls"),
    ("tetris.next", "Next Blocks"),
    ("tetris.bestScore", "Best Score"),
    ("tetris.currentScore", "Score"),
    ("tetris.level", "Level"),
    ("tetris.dropSpeed", "Drop Speed"),
    ("tetris.dropSpeedValue", "{ms}ms"),
    ("tetris.controls.leftRightDown", "Arrows: Move / Soft Drop"),
    ("tetris.controls.rotate", "W / ↑: Rotate"),
    ("tetris.controls.hardDrop", "Space: Hard Drop"),
    ("tetris.controls.pause", "P: Pause"),
    ("tetris.controls.restartQuit", "R: Restart  Q: Quit"),
    ("tetris.paused", "PAUSED"),
    ("tetris.gameOver", "Game Over"),
    ("tetris.finalScore", "Final Score"),
    ("tetris.bestRecord", "Best Record"),
    ("tetris.newRecord", "New Record!"),
    ("tetris.retry", "Play Again (R)"),
];

/// Translation tables for one active language.
#[derive(Debug, Clone)]
pub struct I18n {
    language: Language,
    ko: HashMap<&'static str, &'static str>,
    en: HashMap<&'static str, &'static str>,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ko: KO.iter().copied().collect(),
            en: EN.iter().copied().collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Look up `key` in the active language.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let table = match self.language {
            Language::Ko => &self.ko,
            Language::En => &self.en,
        };
        table
            .get(key)
            .or_else(|| self.en.get(key))
            .copied()
            .unwrap_or(key)
    }

    /// Look up `key` and substitute `{name}` placeholders.
    pub fn format(&self, key: &str, vars: &[(&str, &str)]) -> String {
        format_template(self.t(key), vars)
    }
}

/// Replace every `{name}` in `template` with its value from `vars`.
///
/// Unknown placeholders are left as written.
pub fn format_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match vars.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
