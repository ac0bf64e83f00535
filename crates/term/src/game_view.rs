//! GameView: maps a `GameSnapshot` plus HUD state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{str_width, CellStyle, FrameBuffer, Rgb};
use crate::hud::Hud;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, DROP_TRAIL_MS, LINE_FLASH_MS};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const FLASH: Rgb = Rgb::new(255, 255, 255);
const PANEL_MIN_W: u16 = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the puzzle board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left corner of the board frame.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// Allocation-free apart from overlay formatting; callers reuse one
    /// framebuffer across frames.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let panel_w = viewport.width.saturating_sub(frame_w + 2);
        let total_w = if panel_w >= PANEL_MIN_W {
            frame_w + 2 + panel_w.min(24)
        } else {
            frame_w
        };
        let origin = Origin {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
        };

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: PLAY_BG,
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(origin.x + 1, origin.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, origin.x, origin.y, frame_w, frame_h, border);

        // Locked cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_tag(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_piece_cell(fb, origin, x, y, kind),
                    None => self.draw_empty_cell(fb, origin, x, y),
                }
            }
        }

        self.draw_trail(fb, origin, snap);
        self.draw_flash(fb, origin, snap);

        // Ghost piece.
        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost_style = CellStyle {
                fg: Rgb::new(140, 140, 140),
                bg: PLAY_BG,
                bold: false,
                dim: true,
            };
            for (x, y) in active.cells_at(ghost_y - active.y) {
                if let Some((x, y)) = on_board(x, y) {
                    self.fill_cell_rect(fb, origin, x, y, '░', ghost_style);
                }
            }
        }

        // Active piece.
        if let Some(active) = snap.active {
            for (x, y) in active.cells_at(0) {
                if let Some((x, y)) = on_board(x, y) {
                    self.draw_piece_cell(fb, origin, x, y, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, hud, viewport, origin, frame_w, frame_h);

        if snap.paused() {
            self.draw_overlay(fb, origin, frame_w, frame_h, &[hud.i18n().t("tetris.paused")]);
        } else if snap.game_over() {
            let i18n = hud.i18n();
            let final_score = hud.final_score().unwrap_or(snap.score);
            let score_line = format!("{} {}", i18n.t("tetris.finalScore"), final_score);
            let best_line = format!("{} {}", i18n.t("tetris.bestRecord"), hud.best_score());
            let mut lines = vec![i18n.t("tetris.gameOver"), score_line.as_str(), best_line.as_str()];
            if hud.new_record() {
                lines.push(i18n.t("tetris.newRecord"));
            }
            lines.push(i18n.t("tetris.retry"));
            self.draw_overlay(fb, origin, frame_w, frame_h, &lines);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: u16, y: u16) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: PLAY_BG,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, origin, x, y, '·', style);
    }

    fn draw_piece_cell(&self, fb: &mut FrameBuffer, origin: Origin, x: u16, y: u16, kind: PieceKind) {
        self.fill_cell_rect(fb, origin, x, y, '█', piece_style(kind, PLAY_BG));
    }

    /// Hard-drop streak over the columns the piece fell through.
    fn draw_trail(&self, fb: &mut FrameBuffer, origin: Origin, snap: &GameSnapshot) {
        let Some(trail) = snap.trail else {
            return;
        };
        let fade = PLAY_BG.blend(Rgb::new(170, 170, 190), trail.remaining_ms as u16, DROP_TRAIL_MS as u16);
        let style = CellStyle {
            fg: fade,
            bg: PLAY_BG,
            bold: false,
            dim: true,
        };
        for y in trail.y_start..trail.y_end {
            for dx in 0..trail.width as i8 {
                let Some((x, y)) = on_board(trail.x + dx, y) else {
                    continue;
                };
                if snap.board[y as usize][x as usize] == 0 {
                    self.fill_cell_rect(fb, origin, x, y, '│', style);
                }
            }
        }
    }

    /// White band over the rows that were just cleared.
    fn draw_flash(&self, fb: &mut FrameBuffer, origin: Origin, snap: &GameSnapshot) {
        let Some(flash) = snap.flash.as_ref() else {
            return;
        };
        let color = PLAY_BG.blend(FLASH, flash.remaining_ms as u16, LINE_FLASH_MS as u16);
        let style = CellStyle {
            fg: color,
            bg: color,
            bold: false,
            dim: false,
        };
        for &row in &flash.rows {
            if row >= BOARD_HEIGHT as usize {
                continue;
            }
            for x in 0..BOARD_WIDTH as u16 {
                self.fill_cell_rect(fb, origin, x, row as u16, ' ', style);
            }
        }
    }

    fn fill_cell_rect(&self, fb: &mut FrameBuffer, origin: Origin, cell_x: u16, cell_y: u16, ch: char, style: CellStyle) {
        let px = origin.x + 1 + cell_x * self.cell_w;
        let py = origin.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &Hud,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
        frame_h: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }
        let bottom = origin.y.saturating_add(frame_h).min(viewport.height);
        let i18n = hud.i18n();

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = origin.y;
        fb.put_str(panel_x, y, i18n.t("tetris.currentScore"), label);
        fb.put_u32_padded(panel_x, y + 1, snap.score, 6, value);
        y += 3;

        fb.put_str(panel_x, y, i18n.t("tetris.bestScore"), label);
        fb.put_u32_padded(panel_x, y + 1, hud.best_score().max(snap.score), 6, value);
        y += 3;

        fb.put_str(panel_x, y, i18n.t("tetris.level"), label);
        fb.put_u32(panel_x, y + 1, snap.level, value);
        y += 3;

        fb.put_str(panel_x, y, i18n.t("tetris.dropSpeed"), label);
        let ms = snap.drop_interval_ms.to_string();
        fb.put_str(panel_x, y + 1, &i18n.format("tetris.dropSpeedValue", &[("ms", &ms)]), value);
        y += 3;

        fb.put_str(panel_x, y, i18n.t("tetris.next"), label);
        y += 1;
        for kind in snap.next_queue.iter() {
            if y + 2 > bottom {
                break;
            }
            self.draw_preview(fb, panel_x, y, *kind);
            y += 3;
        }

        let help = [
            "tetris.controls.leftRightDown",
            "tetris.controls.rotate",
            "tetris.controls.hardDrop",
            "tetris.controls.pause",
            "tetris.controls.restartQuit",
        ];
        let dim = CellStyle { dim: true, ..value };
        if y + help.len() as u16 <= bottom {
            let mut hy = bottom - help.len() as u16;
            for key in help {
                fb.put_str(panel_x, hy, i18n.t(key), dim);
                hy += 1;
            }
        }
    }

    /// Draw a spawn-orientation piece in two rows, one column per cell pair.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let shape = Shape::template(kind);
        let style = piece_style(kind, Rgb::new(0, 0, 0));
        // Every template keeps its cells inside rows 0-1; I sits on row 1.
        let top = if kind == PieceKind::I { 1 } else { 0 };
        for (dx, dy) in shape.filled() {
            let row = (dy - top) as u16;
            if row > 1 {
                continue;
            }
            fb.fill_rect(x + (dx as u16) * 2, y + row, 2, 1, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, origin: Origin, frame_w: u16, frame_h: u16, lines: &[&str]) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let first_y = origin.y + (frame_h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let text_w = str_width(line);
            let x = origin.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, first_y + i as u16, line, style);
        }
    }
}

fn piece_style(kind: PieceKind, bg: Rgb) -> CellStyle {
    CellStyle {
        fg: Rgb::from_array(kind.color()),
        bg,
        bold: true,
        dim: false,
    }
}

fn on_board(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineEvent, PuzzleEngine, UiSink};
    use crate::i18n::Language;
    use crate::types::InputKey;

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height()).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn renders_panel_labels_in_selected_language() {
        let engine = PuzzleEngine::new(7);
        let view = GameView::default();
        let fb = view.render(&engine.snapshot(), &Hud::new(Language::En), Viewport::new(60, 24));
        let text = screen_text(&fb);
        assert!(text.contains("Score"));
        assert!(text.contains("000000"));
        assert!(text.contains("Drop Speed"));
        assert!(text.contains("1000ms"));

        let fb = view.render(&engine.snapshot(), &Hud::new(Language::Ko), Viewport::new(60, 24));
        assert!(screen_text(&fb).contains("현재 점수"));
    }

    #[test]
    fn locked_cells_use_piece_color() {
        let mut engine = PuzzleEngine::new(3);
        let kind = engine.current().kind();
        engine.key_down(InputKey::HardDrop);
        let snap = engine.snapshot();

        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, &Hud::default(), Viewport::new(22, 22));
        let expected = Rgb::from_array(kind.color());
        let bottom_row = BOARD_HEIGHT as u16;
        let painted = (1..21)
            .filter_map(|x| fb.get(x, bottom_row))
            .filter(|c| c.ch == '█' && c.style.fg == expected)
            .count();
        assert!(painted > 0);
    }

    #[test]
    fn paused_overlay_is_drawn() {
        let mut engine = PuzzleEngine::new(1);
        let mut hud = Hud::new(Language::En);
        engine.key_down(InputKey::Pause);
        engine.drain_events_into(&mut hud);
        let fb = GameView::default().render(&engine.snapshot(), &hud, Viewport::new(60, 24));
        assert!(screen_text(&fb).contains("PAUSED"));
    }

    #[test]
    fn game_over_overlay_shows_final_score() {
        let mut snap = PuzzleEngine::new(1).snapshot();
        snap.status = crate::core::EngineStatus::GameOver;
        snap.score = 4200;
        let mut hud = Hud::new(Language::En);
        hud.on_event(&EngineEvent::GameOver { final_score: 4200 });
        let text = screen_text(&GameView::default().render(&snap, &hud, Viewport::new(60, 24)));
        assert!(text.contains("Game Over"));
        assert!(text.contains("Final Score 4200"));
        assert!(text.contains("New Record!"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = PuzzleEngine::new(1).snapshot();
        let fb = GameView::default().render(&snap, &Hud::default(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
