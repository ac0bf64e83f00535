//! Cosmetic effects: the flash over cleared rows and the hard-drop trail.
//!
//! Effects are presentation-only. They decay with frame time even while the
//! game is paused, never gate gameplay, and are dropped on reset.

use arrayvec::ArrayVec;

use crate::board::MAX_CLEARED_ROWS;
use crate::types::{DROP_TRAIL_MS, LINE_FLASH_MS};

/// Rows that were just cleared, highlighted for a short time.
///
/// Row indices refer to the board before the clear, bottom to top.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineFlash {
    pub rows: ArrayVec<usize, MAX_CLEARED_ROWS>,
    pub remaining_ms: u32,
}

/// Vertical streak left behind by a hard drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropTrail {
    /// Anchor column of the dropped piece.
    pub x: i8,
    /// Width of the dropped piece's shape matrix.
    pub width: u8,
    pub y_start: i8,
    pub y_end: i8,
    pub remaining_ms: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    flash: Option<LineFlash>,
    trail: Option<DropTrail>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_flash(&mut self, rows: &[usize]) {
        self.flash = Some(LineFlash {
            rows: rows.iter().copied().take(MAX_CLEARED_ROWS).collect(),
            remaining_ms: LINE_FLASH_MS,
        });
    }

    pub fn start_trail(&mut self, x: i8, width: u8, y_start: i8, y_end: i8) {
        self.trail = Some(DropTrail {
            x,
            width,
            y_start,
            y_end,
            remaining_ms: DROP_TRAIL_MS,
        });
    }

    /// Count down both timers, removing an effect once it runs out.
    pub fn decay(&mut self, elapsed_ms: u32) {
        if let Some(flash) = self.flash.as_mut() {
            flash.remaining_ms = flash.remaining_ms.saturating_sub(elapsed_ms);
            if flash.remaining_ms == 0 {
                self.flash = None;
            }
        }
        if let Some(trail) = self.trail.as_mut() {
            trail.remaining_ms = trail.remaining_ms.saturating_sub(elapsed_ms);
            if trail.remaining_ms == 0 {
                self.trail = None;
            }
        }
    }

    pub fn flash(&self) -> Option<&LineFlash> {
        self.flash.as_ref()
    }

    pub fn trail(&self) -> Option<&DropTrail> {
        self.trail.as_ref()
    }

    pub fn clear(&mut self) {
        self.flash = None;
        self.trail = None;
    }
}
