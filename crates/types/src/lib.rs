//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the puzzle.
//! All types are plain data with no external dependencies, so they can be used
//! from the engine, the terminal frontend and the tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Pieces may sit partially above the board (negative rows) while falling.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Automatic drop interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest automatic drop interval |
//! | `DAS_MS` | 170 | Initial delay before a held left/right repeats |
//! | `ARR_MS` | 50 | Repeat rate for held left/right/down |
//! | `SOFT_DROP_DAS_MS` | 50 | Initial delay for held down (same as the repeat rate) |
//! | `LINE_FLASH_MS` | 150 | Cosmetic flash on cleared rows |
//! | `DROP_TRAIL_MS` | 150 | Cosmetic trail after a hard drop |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, InputKey, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//! assert_eq!(PieceKind::from_tag(parsed.tag()), Some(PieceKind::T));
//!
//! assert_eq!(InputKey::from_str("hardDrop"), Some(InputKey::HardDrop));
//! assert_eq!(Command::MoveLeft.as_str(), "moveLeft");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of upcoming piece kinds kept in the preview queue
pub const NEXT_QUEUE_LEN: usize = 5;

/// Longest run of identical piece kinds the generator may deal in a row
pub const MAX_STREAK: u8 = 2;

/// Automatic drop interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Drop interval reduction per level above 1
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Fastest automatic drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Points needed per level step (`level = score / 2000 + 1`)
pub const LEVEL_SCORE_STEP: u32 = 2000;

/// Initial delay before a held horizontal key starts repeating.
pub const DAS_MS: u32 = 170;

/// Repeat rate for held movement keys.
pub const ARR_MS: u32 = 50;

/// Held soft drop has no distinct initial delay; it reuses the repeat rate.
pub const SOFT_DROP_DAS_MS: u32 = ARR_MS;

/// Duration of the cosmetic flash over cleared rows.
pub const LINE_FLASH_MS: u32 = 150;

/// Duration of the cosmetic trail drawn after a hard drop.
pub const DROP_TRAIL_MS: u32 = 150;

/// Line clear scoring table, indexed by rows cleared in one lock.
///
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Points are multiplied by the current level (1-based).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Leaderboard identifier of the falling-block puzzle.
pub const GAME_ID: &str = "tetris";


/// The seven canonical piece kinds
///
/// Each kind has a fixed color and a fixed base rotation matrix:
/// - **I**: Cyan, 4x4 template
/// - **O**: Yellow, 2x2 template
/// - **T**: Purple, 3x3 template
/// - **S**: Green, 3x3 template
/// - **Z**: Red, 3x3 template
/// - **J**: Blue, 3x3 template
/// - **L**: Orange, 3x3 template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order (`IOTSZJL`).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Compact non-zero tag (1..=7) used in `u8` board grids; 0 means empty.
    pub fn tag(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Display color as `[r, g, b]`.
    pub fn color(&self) -> [u8; 3] {
        match self {
            PieceKind::I => [0, 240, 240],
            PieceKind::O => [240, 240, 0],
            PieceKind::T => [160, 0, 240],
            PieceKind::S => [0, 240, 0],
            PieceKind::Z => [240, 0, 0],
            PieceKind::J => [0, 0, 240],
            PieceKind::L => [240, 160, 0],
        }
    }
}

/// Logical keys delivered by the input source.
///
/// The engine does not care about physical key codes; frontends map their
/// events onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    Left,
    Right,
    Down,
    Rotate,
    HardDrop,
    Pause,
}

impl InputKey {
    /// Parse from a camelCase or lowercase name.
    ///
    /// ```
    /// use blockfall_types::InputKey;
    ///
    /// assert_eq!(InputKey::from_str("left"), Some(InputKey::Left));
    /// assert_eq!(InputKey::from_str("HARDDROP"), Some(InputKey::HardDrop));
    /// assert_eq!(InputKey::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(InputKey::Left),
            "right" => Some(InputKey::Right),
            "down" => Some(InputKey::Down),
            "rotate" => Some(InputKey::Rotate),
            "harddrop" => Some(InputKey::HardDrop),
            "pause" => Some(InputKey::Pause),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKey::Left => "left",
            InputKey::Right => "right",
            InputKey::Down => "down",
            InputKey::Rotate => "rotate",
            InputKey::HardDrop => "hardDrop",
            InputKey::Pause => "pause",
        }
    }
}

/// Discrete commands the autorepeat controller requests from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot descend
    SoftDrop,
    /// Rotate piece 90° clockwise with the three-position kick
    Rotate,
    /// Drop piece to its lowest legal row and lock it
    HardDrop,
    /// Toggle between running and paused
    TogglePause,
}

impl Command {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            "harddrop" => Some(Command::HardDrop),
            "togglepause" => Some(Command::TogglePause),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
