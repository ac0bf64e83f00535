use crate::effects::{DropTrail, LineFlash};
use crate::engine::EngineStatus;
use crate::piece::{Piece, Shape};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, NEXT_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            shape: *value.shape(),
            x: value.x(),
            y: value.y(),
        }
    }
}

impl ActiveSnapshot {
    /// Board coordinates of the filled cells, shifted down by `dy`.
    pub fn cells_at(&self, dy: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(sx, sy)| (self.x + sx, self.y + sy + dy))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells as tags (0 = empty, see `PieceKind::tag`).
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on.
    pub ghost_y: Option<i8>,
    pub next_queue: [PieceKind; NEXT_QUEUE_LEN],
    pub flash: Option<LineFlash>,
    pub trail: Option<DropTrail>,
    pub status: EngineStatus,
    pub score: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.next_queue = [PieceKind::I; NEXT_QUEUE_LEN];
        self.flash = None;
        self.trail = None;
        self.status = EngineStatus::Running;
        self.score = 0;
        self.level = 1;
        self.drop_interval_ms = 0;
    }

    pub fn playable(&self) -> bool {
        self.status == EngineStatus::Running
    }

    pub fn paused(&self) -> bool {
        self.status == EngineStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == EngineStatus::GameOver
    }

    /// Whether row `y` is currently flashing.
    pub fn is_flashing(&self, y: usize) -> bool {
        self.flash.as_ref().is_some_and(|f| f.rows.contains(&y))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next_queue: [PieceKind::I; NEXT_QUEUE_LEN],
            flash: None,
            trail: None,
            status: EngineStatus::Running,
            score: 0,
            level: 1,
            drop_interval_ms: 0,
        };
        s.clear();
        s
    }
}
