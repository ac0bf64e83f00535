//! Puzzle engine - owns the board, the falling piece and the preview queue
//!
//! States: `Running`, `Paused`, `GameOver`.
//!
//! - `Running <-> Paused` through [`PuzzleEngine::toggle_pause`] (ignored once over).
//! - `Running -> GameOver` when a freshly spawned piece already collides.
//! - [`PuzzleEngine::reset`] returns to `Running` from any state.
//!
//! Each host frame calls [`PuzzleEngine::frame`] with the wall-clock delta. The
//! frame decays cosmetic effects, then (only while running) lets the autorepeat
//! controller issue movement commands and advances the automatic drop counter.
//!
//! Locking writes the piece into the board, removes full rows immediately,
//! scores the clear, starts the cosmetic flash and spawns the next piece, all in
//! the same call. The flash never delays the board mutation or the spawn.

use crate::autorepeat::AutorepeatController;
use crate::board::Board;
use crate::effects::Effects;
use crate::events::{EngineEvent, UiSink};
use crate::piece::Piece;
use crate::rng::NextQueue;
use crate::scoring::{apply_clear, drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, InputKey, PieceKind, NEXT_QUEUE_LEN};

/// Events a single frame can queue: lock, clear, score and game over, plus a
/// reset or pause from the same frame's input.
const EVENT_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineStatus {
    Running,
    Paused,
    GameOver,
}

impl EngineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineStatus::Running => "running",
            EngineStatus::Paused => "paused",
            EngineStatus::GameOver => "gameOver",
        }
    }
}

/// Complete puzzle state
#[derive(Debug, Clone)]
pub struct PuzzleEngine {
    board: Board,
    current: Piece,
    queue: NextQueue,
    controller: AutorepeatController,
    effects: Effects,
    status: EngineStatus,
    score: u32,
    level: u32,
    drop_interval_ms: u32,
    /// Milliseconds accumulated toward the next automatic step.
    drop_counter_ms: u32,
    /// Pending events for the UI sink.
    events: Vec<EngineEvent>,
}

impl PuzzleEngine {
    /// Create a running game with the given RNG seed and spawn the first piece.
    pub fn new(seed: u32) -> Self {
        Self::with_controller(seed, AutorepeatController::new())
    }

    pub fn with_controller(seed: u32, controller: AutorepeatController) -> Self {
        Self::build(seed, Board::new(), controller)
    }

    /// Start on a prepared board (scripted setups and tests).
    pub fn with_board(seed: u32, board: Board) -> Self {
        Self::build(seed, board, AutorepeatController::new())
    }

    fn build(seed: u32, board: Board, controller: AutorepeatController) -> Self {
        let mut queue = NextQueue::new(seed);
        let first = queue.pop();
        let mut engine = Self {
            board,
            current: Piece::new(first),
            queue,
            controller,
            effects: Effects::new(),
            status: EngineStatus::Running,
            score: 0,
            level: 1,
            drop_interval_ms: drop_interval_ms(1),
            drop_counter_ms: 0,
            events: Vec::with_capacity(EVENT_CAPACITY),
        };
        engine.check_spawn();
        engine
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn paused(&self) -> bool {
        self.status == EngineStatus::Paused
    }

    pub fn game_over(&self) -> bool {
        self.status == EngineStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next_queue(&self) -> &[PieceKind; NEXT_QUEUE_LEN] {
        self.queue.peek()
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn controller(&self) -> &AutorepeatController {
        &self.controller
    }

    /// Replace the falling piece (scripted setups and tests).
    pub fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }

    /// Reinitialise board, score, queue, input latches and effects, then spawn.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = 1;
        self.drop_interval_ms = drop_interval_ms(1);
        self.drop_counter_ms = 0;
        self.status = EngineStatus::Running;
        self.queue.refill();
        self.controller.reset();
        self.effects.clear();

        log::info!("game reset");
        self.events.push(EngineEvent::Reset);
        self.events.push(EngineEvent::ScoreChanged {
            score: self.score,
            level: self.level,
        });

        self.spawn_piece();
    }

    /// Forward a key-down from the input source.
    pub fn key_down(&mut self, key: InputKey) {
        if let Some(command) = self.controller.press(key) {
            self.apply(command);
        }
    }

    /// Forward a key-up from the input source.
    pub fn key_up(&mut self, key: InputKey) {
        self.controller.release(key);
    }

    /// Advance one host frame by `elapsed_ms` of wall-clock time.
    pub fn frame(&mut self, elapsed_ms: u32) {
        self.effects.decay(elapsed_ms);

        if self.status != EngineStatus::Running {
            // Latches must still time out, or pause could never be released.
            self.controller.expire_idle(elapsed_ms);
            return;
        }

        for command in self.controller.update(elapsed_ms) {
            self.apply(command);
        }

        if self.status != EngineStatus::Running {
            return;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms {
            self.move_down();
        }
    }

    /// Execute one command. Returns whether it changed anything.
    ///
    /// Gameplay commands are ignored unless running; pause is accepted until
    /// the game is over.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.move_down(),
            Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, dx: i8) -> bool {
        if self.status != EngineStatus::Running {
            return false;
        }
        let moved = self.current.try_shift(&self.board, dx, 0);
        if !moved {
            log::trace!("shift {} rejected at x={}", dx, self.current.x());
        }
        moved
    }

    pub fn rotate(&mut self) -> bool {
        if self.status != EngineStatus::Running {
            return false;
        }
        let rotated = self.current.rotate(&self.board);
        if !rotated {
            log::trace!("rotation of {:?} rejected", self.current.kind());
        }
        rotated
    }

    /// Step the piece down one row, locking it if it cannot descend.
    ///
    /// Resets the automatic drop counter either way; the autorepeat timers are
    /// a separate clock and are not touched.
    pub fn move_down(&mut self) -> bool {
        if self.status != EngineStatus::Running {
            return false;
        }
        if !self.current.try_shift(&self.board, 0, 1) {
            self.lock_piece();
        }
        self.drop_counter_ms = 0;
        true
    }

    /// Drop to the lowest legal row and lock in one step.
    pub fn hard_drop(&mut self) -> bool {
        if self.status != EngineStatus::Running {
            return false;
        }
        let y_start = self.current.y();
        let distance = self.current.drop_distance(&self.board);
        self.current.try_shift(&self.board, 0, distance);

        self.effects.start_trail(
            self.current.x(),
            self.current.shape().size(),
            y_start,
            self.current.y(),
        );

        self.lock_piece();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        let paused = match self.status {
            EngineStatus::Running => true,
            EngineStatus::Paused => false,
            EngineStatus::GameOver => return false,
        };
        self.status = if paused {
            EngineStatus::Paused
        } else {
            EngineStatus::Running
        };
        log::debug!("pause toggled: paused={}", paused);
        self.events.push(EngineEvent::PauseChanged { paused });
        true
    }

    /// Write the current piece into the board, clear rows, score, and spawn.
    fn lock_piece(&mut self) {
        let kind = self.current.kind();
        self.board.lock_piece(&self.current);
        self.events.push(EngineEvent::PieceLocked { kind });

        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            self.effects.start_flash(&cleared);

            let update = apply_clear(self.score, self.level, cleared.len());
            if update.level != self.level {
                log::info!("level up: {} -> {}", self.level, update.level);
            }
            self.score = update.score;
            self.level = update.level;
            self.drop_interval_ms = update.drop_interval_ms;

            log::debug!(
                "cleared {} rows {:?} for {} points (score={})",
                cleared.len(),
                cleared.as_slice(),
                update.points,
                self.score
            );
            self.events.push(EngineEvent::LinesCleared {
                count: cleared.len() as u32,
            });
            self.events.push(EngineEvent::ScoreChanged {
                score: self.score,
                level: self.level,
            });
        }

        self.spawn_piece();
    }

    /// Take the next kind from the queue and make it the falling piece.
    fn spawn_piece(&mut self) {
        let kind = self.queue.pop();
        self.current = Piece::new(kind);
        log::debug!("spawned {:?}", kind);
        self.check_spawn();
    }

    fn check_spawn(&mut self) {
        if self.current.collides(&self.board, 0, 0, None) {
            self.status = EngineStatus::GameOver;
            log::info!("game over: final score {}", self.score);
            self.events.push(EngineEvent::GameOver {
                final_score: self.score,
            });
        }
    }

    /// Row the current piece would land on.
    pub fn ghost_y(&self) -> i8 {
        self.current.y() + self.current.drop_distance(&self.board)
    }

    /// Take all pending events.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forward all pending events to `sink`.
    pub fn drain_events_into(&mut self, sink: &mut impl UiSink) {
        for event in self.events.drain(..) {
            sink.on_event(&event);
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = Some(ActiveSnapshot::from(self.current));
        out.ghost_y = if self.status == EngineStatus::GameOver {
            None
        } else {
            Some(self.ghost_y())
        };
        out.next_queue = *self.queue.peek();
        out.flash = self.effects.flash().cloned();
        out.trail = self.effects.trail().copied();
        out.status = self.status;
        out.score = self.score;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
