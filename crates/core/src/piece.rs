//! Piece module - shape templates, collision and rotation for the falling piece
//!
//! Every kind has a square NxN template (N = 2 for O, 4 for I, 3 otherwise).
//! A [`Piece`] owns a value copy of its template, so rotating one piece can
//! never corrupt the template or any other piece.
//!
//! Rotation is clockwise only and uses a fixed three-position kick:
//! the rotated shape is tried at the current column, then one column right,
//! then one column left. If all three collide the piece is left untouched.

use crate::board::Board;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Largest template side length.
pub const MAX_SHAPE_SIZE: usize = 4;

/// An NxN binary matrix stored in a fixed 4x4 array.
///
/// Only the top-left `size x size` region is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from row bitmaps (bit `size-1-x` is column `x`).
    const fn from_bits(size: u8, bits: [u8; MAX_SHAPE_SIZE]) -> Self {
        let mut rows = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < size as usize {
            let mut x = 0;
            while x < size as usize {
                rows[y][x] = (bits[y] >> (size as usize - 1 - x)) & 1 == 1;
                x += 1;
            }
            y += 1;
        }
        Self { size, rows }
    }

    /// Canonical spawn template for a kind.
    pub fn template(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => I_TEMPLATE,
            PieceKind::O => O_TEMPLATE,
            PieceKind::T => T_TEMPLATE,
            PieceKind::S => S_TEMPLATE,
            PieceKind::Z => Z_TEMPLATE,
            PieceKind::J => J_TEMPLATE,
            PieceKind::L => L_TEMPLATE,
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at column `x`, row `y` of the matrix is filled.
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size as usize && y < self.size as usize && self.rows[y][x]
    }

    /// Offsets `(dx, dy)` of the filled cells, row by row.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.rows[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// The shape rotated 90° clockwise (transpose, then reverse each row).
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut rows = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in self.rows.iter().enumerate().take(n) {
            for (x, &filled) in row.iter().enumerate().take(n) {
                rows[x][n - 1 - y] = filled;
            }
        }
        Self {
            size: self.size,
            rows,
        }
    }
}

const I_TEMPLATE: Shape = Shape::from_bits(4, [0b0000, 0b1111, 0b0000, 0b0000]);
const O_TEMPLATE: Shape = Shape::from_bits(2, [0b11, 0b11, 0, 0]);
const T_TEMPLATE: Shape = Shape::from_bits(3, [0b010, 0b111, 0b000, 0]);
const S_TEMPLATE: Shape = Shape::from_bits(3, [0b011, 0b110, 0b000, 0]);
const Z_TEMPLATE: Shape = Shape::from_bits(3, [0b110, 0b011, 0b000, 0]);
const J_TEMPLATE: Shape = Shape::from_bits(3, [0b100, 0b111, 0b000, 0]);
const L_TEMPLATE: Shape = Shape::from_bits(3, [0b001, 0b111, 0b000, 0]);

/// Column offsets tried, in order, when rotating.
const ROTATION_KICKS: [i8; 3] = [0, 1, -1];

/// Active falling piece.
///
/// `(x, y)` is the top-left anchor of the shape matrix in board coordinates;
/// `y` may be negative while the piece is partially above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    x: i8,
    y: i8,
}

impl Piece {
    /// Create a piece at its spawn position.
    ///
    /// Horizontally centered on the board; row 0, except `I` which spawns one row
    /// higher so its filled row lands on row 0.
    pub fn new(kind: PieceKind) -> Self {
        let shape = Shape::template(kind);
        let x = (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8;
        let y = if kind == PieceKind::I { -1 } else { 0 };
        Self { kind, shape, x, y }
    }

    /// Create a piece with an explicit shape and anchor.
    pub fn with_shape(kind: PieceKind, shape: Shape, x: i8, y: i8) -> Self {
        Self { kind, shape, x, y }
    }

    /// Spawn-oriented piece at an explicit anchor.
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self::with_shape(kind, Shape::template(kind), x, y)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    /// Board coordinates of the filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether the piece, offset by `(dx, dy)` and optionally with a different
    /// shape, would overlap a wall, the floor or a locked cell.
    ///
    /// Rows above the board never collide on occupancy. No side effects.
    pub fn collides(&self, board: &Board, dx: i8, dy: i8, shape: Option<&Shape>) -> bool {
        let shape = shape.unwrap_or(&self.shape);
        shape.filled().any(|(sx, sy)| {
            let x = self.x + sx + dx;
            let y = self.y + sy + dy;
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return true;
            }
            y >= 0 && board.is_occupied(x, y)
        })
    }

    /// Move by `(dx, dy)` unless the destination collides.
    ///
    /// Returns false (and leaves the piece unchanged) on collision.
    pub fn try_shift(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        if self.collides(board, dx, dy, None) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Rotate clockwise with the three-position kick.
    ///
    /// Returns false if every candidate collides; shape and anchor are then
    /// exactly as before the call.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let rotated = self.shape.rotated_cw();
        for &kick in ROTATION_KICKS.iter() {
            if !self.collides(board, kick, 0, Some(&rotated)) {
                self.shape = rotated;
                self.x += kick;
                return true;
            }
        }
        false
    }

    /// Number of rows the piece can fall before it rests.
    pub fn drop_distance(&self, board: &Board) -> i8 {
        let mut distance = 0;
        while !self.collides(board, 0, distance + 1, None) {
            distance += 1;
        }
        distance
    }
}
