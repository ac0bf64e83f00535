//! Engine events and the collaborator seams that consume them.
//!
//! The engine never updates UI text itself. It queues [`EngineEvent`]s that the
//! host drains once per frame with
//! [`PuzzleEngine::take_events`](crate::PuzzleEngine::take_events) and forwards
//! to a [`UiSink`]. Rendering reads a [`GameSnapshot`] through a [`RenderSink`].

use crate::snapshot::GameSnapshot;
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Score or level changed after a line clear.
    ScoreChanged { score: u32, level: u32 },
    /// A lock completed `count` rows.
    LinesCleared { count: u32 },
    /// The active piece was written into the board.
    PieceLocked { kind: PieceKind },
    PauseChanged { paused: bool },
    /// A freshly spawned piece had no legal position.
    GameOver { final_score: u32 },
    /// Board, score and queue were reinitialised.
    Reset,
}

/// Consumes score/level/game-over changes.
pub trait UiSink {
    fn on_event(&mut self, event: &EngineEvent);
}

/// Consumes one read-only snapshot per frame.
pub trait RenderSink {
    type Error;

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<(), Self::Error>;
}

impl UiSink for Vec<EngineEvent> {
    fn on_event(&mut self, event: &EngineEvent) {
        self.push(*event);
    }
}
