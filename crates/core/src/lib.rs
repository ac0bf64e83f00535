//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the puzzle rules and state machine. It has no
//! dependencies on rendering, terminals, or persistence:
//!
//! - **Deterministic**: the same seed and the same frame deltas replay the same game
//! - **Testable**: timing is driven by elapsed milliseconds, never by a real clock
//! - **Portable**: any host that can deliver key events and frame callbacks can run it
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with row-full checks, piece locking and row clearing
//! - [`piece`]: shape templates, collision queries and the three-position rotation kick
//! - [`rng`]: seeded uniform piece generation with the anti-streak rule, 5-entry preview
//! - [`autorepeat`]: delayed autorepeat for held keys, latches for one-shot keys
//! - [`scoring`]: line clear points, level and drop interval
//! - [`effects`]: cosmetic line flash and hard-drop trail
//! - [`engine`]: [`PuzzleEngine`], which ties everything together
//! - [`events`], [`snapshot`]: what the engine hands to UI and render collaborators
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineStatus, PuzzleEngine};
//! use blockfall_types::InputKey;
//!
//! let mut game = PuzzleEngine::new(12345);
//!
//! game.key_down(InputKey::Right);
//! game.frame(16);
//! game.key_up(InputKey::Right);
//!
//! game.key_down(InputKey::HardDrop);
//! assert_eq!(game.board().occupied_count(), 4);
//! assert_eq!(game.status(), EngineStatus::Running);
//! ```

pub mod autorepeat;
pub mod board;
pub mod effects;
pub mod engine;
pub mod events;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use autorepeat::AutorepeatController;
pub use board::Board;
pub use effects::{DropTrail, Effects, LineFlash};
pub use engine::{EngineStatus, PuzzleEngine};
pub use events::{EngineEvent, RenderSink, UiSink};
pub use piece::{Piece, Shape};
pub use rng::{NextQueue, PieceGenerator, SimpleRng};
pub use scoring::{apply_clear, drop_interval_ms, level_for_score, line_clear_score, ScoreUpdate};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
