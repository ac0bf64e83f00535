//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the engine's logical [`InputKey`]s. The
//! engine owns the autorepeat logic; this crate only decides which physical
//! keys mean what and whether an event is a press or a release.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_event, map_key, should_quit, is_restart, KeyTransition};
