//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }

    /// Mix towards `other` by `num / den`.
    pub fn blend(self, other: Rgb, num: u16, den: u16) -> Rgb {
        if den == 0 {
            return self;
        }
        let num = num.min(den);
        let mix = |a: u8, b: u8| -> u8 {
            let a = a as u16;
            let b = b as u16;
            ((a * (den - num) + b * num) / den) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

/// Placeholder stored in the column covered by the right half of a wide glyph.
/// The renderer prints nothing for it.
pub const WIDE_CONTINUATION: char = '\0';

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Terminal column width of `ch`.
///
/// Only the ranges the HUD actually prints are recognized as wide (Hangul and
/// CJK); everything else counts as one column.
pub fn char_width(ch: char) -> u16 {
    match ch as u32 {
        0x1100..=0x115F | 0x2E80..=0x303E | 0x3041..=0x33FF | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}

/// Terminal column width of `s`.
pub fn str_width(s: &str) -> u16 {
    s.chars().map(char_width).sum()
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` starting at column `x`, returning the column after the text.
    ///
    /// Wide glyphs take two columns; a wide glyph that would be cut by the
    /// right edge is dropped.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            let w = char_width(ch);
            if cx.saturating_add(w) > self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            if w == 2 {
                self.put_char(cx + 1, y, WIDE_CONTINUATION, style);
            }
            cx += w;
        }
        cx
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        self.put_u32_padded(x, y, value, 0, style)
    }

    /// Write a decimal number left-padded with zeros to `min_digits`.
    pub fn put_u32_padded(
        &mut self,
        x: u16,
        y: u16,
        mut value: u32,
        min_digits: usize,
        style: CellStyle,
    ) -> u16 {
        let mut digits = [b'0'; 10];
        let mut len = 0;
        loop {
            digits[len] = b'0' + (value % 10) as u8;
            len += 1;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        let len_padded = len.max(min_digits.min(digits.len()));
        let mut cx = x;
        for i in (0..len_padded).rev() {
            self.put_char(cx, y, digits[i] as char, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Collect one row as a string, skipping wide-glyph continuations.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .filter(|&ch| ch != WIDE_CONTINUATION)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_u32_writes_digits_and_padding() {
        let mut fb = FrameBuffer::new(8, 1);
        let style = CellStyle::default();
        let end = fb.put_u32_padded(0, 0, 420, 6, style);
        assert_eq!(end, 6);
        assert_eq!(fb.row_text(0), "000420  ");

        let end = fb.put_u32(0, 0, 0, style);
        assert_eq!(end, 1);
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('0'));
    }

    #[test]
    fn wide_glyphs_take_two_columns() {
        let mut fb = FrameBuffer::new(6, 1);
        let style = CellStyle::default();
        let end = fb.put_str(0, 0, "레벨", style);
        assert_eq!(end, 4);
        assert_eq!(fb.get(1, 0).map(|c| c.ch), Some(WIDE_CONTINUATION));
        assert_eq!(fb.row_text(0), "레벨  ");
        assert_eq!(str_width("낙하 speed"), 10);
    }

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut fb = FrameBuffer::new(3, 1);
        let style = CellStyle::default();
        assert_eq!(fb.put_str(0, 0, "점수", style), 2);
        assert_eq!(fb.row_text(0), "점 ");
        assert_eq!(fb.put_str(1, 0, "abcd", style), 3);
    }

    #[test]
    fn blend_is_clamped() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.blend(b, 1, 2), Rgb::new(100, 50, 25));
        assert_eq!(a.blend(b, 5, 2), b);
        assert_eq!(a.blend(b, 1, 0), a);
    }
}
