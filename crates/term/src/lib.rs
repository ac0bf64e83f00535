//! Terminal front end.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer which is then diffed against the previous frame and flushed
//! through `crossterm`. No widget toolkit is involved.
//!
//! - [`GameView`] is pure and unit-testable (snapshot + [`Hud`] -> framebuffer)
//! - [`TerminalRenderer`] owns the terminal I/O
//! - [`TerminalScreen`] combines both and acts as the engine's render and UI sink
//! - [`i18n`] holds the HUD strings (Korean and English)

pub mod fb;
pub mod game_view;
pub mod hud;
pub mod i18n;
pub mod renderer;
pub mod screen;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use hud::Hud;
pub use i18n::{format_template, I18n, Language};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screen::TerminalScreen;
