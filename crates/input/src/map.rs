//! Key mapping from terminal events to logical input keys.

use crate::types::InputKey;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A logical key going down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Down(InputKey),
    Up(InputKey),
}

/// Map a physical key to a logical one. Unrecognized keys map to `None`.
pub fn map_key(code: KeyCode) -> Option<InputKey> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputKey::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputKey::Right)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputKey::Down)
        }

        // Rotation
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputKey::Rotate)
        }

        // Actions
        KeyCode::Char(' ') => Some(InputKey::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputKey::Pause),

        _ => None,
    }
}

/// Map a full key event, including its press/release kind.
///
/// Host repeat events count as presses; the engine's latches and hold state
/// make them harmless.
pub fn map_event(key: KeyEvent) -> Option<KeyTransition> {
    let logical = map_key(key.code)?;
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => Some(KeyTransition::Down(logical)),
        KeyEventKind::Release => Some(KeyTransition::Up(logical)),
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key restarts the game.
pub fn is_restart(key: KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}
