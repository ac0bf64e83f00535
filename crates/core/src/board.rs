//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that was locked there. Uses a flat array for cache locality and so the
//! whole grid can be replaced by value on reset.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Most rows a single clear pass can remove.
///
/// A lock completes at most 4 rows, but a board handed to the engine may
/// already hold more full rows than that.
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, scanned bottom to top.
    pub fn full_rows(&self) -> ArrayVec<usize, MAX_CLEARED_ROWS> {
        let mut rows = ArrayVec::new();
        for y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(y) {
                rows.push(y);
            }
        }
        rows
    }

    /// Remove row `y` and shift every row above it down by one.
    /// The top row becomes empty.
    fn remove_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells.copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Write every filled cell of `piece` into the board.
    ///
    /// Cells above the visible board (negative rows) are dropped silently.
    /// This is the only path that adds cells to the board.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(piece.kind()));
            }
        }
    }

    /// Remove the given rows (pre-removal indices), inserting empty rows at the top.
    ///
    /// Remaining rows keep their relative order. Out-of-range and duplicate
    /// indices are ignored. Returns the number of rows removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut removed = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&read_y) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        for cell in &mut self.cells[0..write_y * width] {
            *cell = None;
        }

        removed
    }

    /// Clear all full rows with a single bottom-to-top compacting pass.
    ///
    /// Whenever a full row is found it is removed, an empty row is inserted at the
    /// top, and the same index is examined again since everything above moved down.
    /// Returns the pre-clear indices of the removed rows, bottom to top.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, MAX_CLEARED_ROWS> {
        let mut cleared = ArrayVec::new();
        let mut y = BOARD_HEIGHT as usize;
        // Rows removed so far; rows above `y` now sit this far below their
        // pre-clear index.
        let mut shift = 0usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                cleared.push(row - shift);
                self.remove_row(row);
                shift += 1;
                // Re-examine the same index.
                continue;
            }
            y -= 1;
        }

        cleared
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board as tags (0 = empty, 1..=7 = piece kind).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[y * width + x].map(|k| k.tag()).unwrap_or(0);
            }
        }
    }

    /// Create a board from rows of text, top row first.
    ///
    /// `.` or space is empty; a piece letter fills the cell with that kind and
    /// any other character fills it with `I`. Missing rows at the top are empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, line) in rows.iter().enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in line.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I)),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
