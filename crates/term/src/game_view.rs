//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the bordered 8x16 well (each board cell is
//! `cell_w` x `cell_h` terminal cells), then a side panel with score, level,
//! lines, mode, and the next-piece preview. State overlays are centered on the
//! well.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Color, EngineState, GameMode, BOARD_HEIGHT, BOARD_WIDTH};

const RED: Rgb = Rgb::from_hex(0xff4444);
const BLUE: Rgb = Rgb::from_hex(0x4444ff);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const BORDER: Style = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
const GRID_DOT: Style = Style::new(Rgb::new(90, 90, 100), WELL_BG);
const LABEL: Style = Style::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
const VALUE: Style = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
const OVERLAY: Style = Style::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();

/// Side panel needs at least this many columns to be drawn
const MIN_PANEL_W: u16 = 10;
/// Cell size upper bound; keeps frame arithmetic within u16
const MAX_CELL: u16 = 64;

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

pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => RED,
        Color::Blue => BLUE,
    }
}

/// Top-left of the well frame inside the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL),
            cell_h: cell_h.clamp(1, MAX_CELL),
        }
    }

    /// Render a snapshot into a new framebuffer of the viewport's size.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let panel_room = MIN_PANEL_W + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w + panel_room) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_well(fb, frame, snap);
        self.draw_side_panel(fb, frame, snap, viewport);

        match snap.state {
            EngineState::Idle => self.draw_overlay(
                fb,
                frame,
                &["TRIFALL", "", "H  human game", "A  AI game", "Q  quit"],
            ),
            EngineState::Paused => {
                self.draw_overlay(fb, frame, &["PAUSED", "", "P  resume", "Esc  abandon"])
            }
            EngineState::GameOver => {
                self.draw_overlay(fb, frame, &["GAME OVER", "", "R  reset", "H/A  new game"])
            }
            EngineState::Playing => {}
        }
    }

    fn draw_well(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        draw_border(fb, frame);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell {
                    Some(color) => self.draw_box(fb, frame, x, y, *color),
                    None => self.fill_cell(fb, frame, x, y, '·', GRID_DOT),
                }
            }
        }

        // The falling piece may have boxes above the visible rows.
        if let Some(piece) = snap.current {
            for (pos, color) in piece.cells() {
                if pos.x < 0 || pos.y < 0 {
                    continue;
                }
                let (x, y) = (pos.x as u16, pos.y as u16);
                if x < BOARD_WIDTH as u16 && y < BOARD_HEIGHT as u16 {
                    self.draw_box(fb, frame, x, y, color);
                }
            }
        }
    }

    fn draw_box(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: Color) {
        let style = Style::new(color_rgb(color), WELL_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: Style) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        viewport: Viewport,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(MIN_PANEL_W) > viewport.width {
            return;
        }

        let mut y = frame.y;
        for (label, value) in [
            ("SCORE", snap.stats.score),
            ("LEVEL", snap.stats.level),
            ("LINES", snap.stats.lines_cleared),
        ] {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_u32(panel_x, y + 1, value, VALUE);
            y += 3;
        }

        fb.put_str(panel_x, y, "MODE", LABEL);
        let mode = match snap.mode {
            GameMode::Human => "HUMAN",
            GameMode::Ai => "AI",
        };
        fb.put_str(panel_x, y + 1, mode, VALUE);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", LABEL);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y + 1, &next);
        }
    }

    /// Draw `piece` relative to its own origin at a fixed screen position
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece) {
        for b in piece.boxes.iter() {
            let (Ok(bx), Ok(by)) = (u16::try_from(b.offset.x), u16::try_from(b.offset.y)) else {
                continue;
            };
            let style = Style::new(color_rgb(b.color), SCREEN_BG).bold();
            fb.fill_rect(
                x + bx * self.cell_w,
                y + by * self.cell_h,
                self.cell_w,
                self.cell_h,
                '█',
                style,
            );
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let top = frame.y + frame.h / 2 - (lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let len = line.chars().count() as u16;
            let x = frame.x + frame.w.saturating_sub(len) / 2;
            fb.put_str(x, top + i as u16, line, OVERLAY);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, f: Frame) {
    let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);
    fb.put_char(f.x, f.y, '┌', BORDER);
    fb.put_char(right, f.y, '┐', BORDER);
    fb.put_char(f.x, bottom, '└', BORDER);
    fb.put_char(right, bottom, '┘', BORDER);
    for x in f.x + 1..right {
        fb.put_char(x, f.y, '─', BORDER);
        fb.put_char(x, bottom, '─', BORDER);
    }
    for y in f.y + 1..bottom {
        fb.put_char(f.x, y, '│', BORDER);
        fb.put_char(right, y, '│', BORDER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PieceId, PieceGenerator};
    use crate::types::{Position, ShapeKind};

    fn playing_snapshot() -> GameSnapshot {
        let mut generator = PieceGenerator::new(5);
        GameSnapshot {
            current: Some(generator.create_random()),
            next: Some(generator.create_random()),
            state: EngineState::Playing,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn test_locked_cells_use_color() {
        let mut snap = playing_snapshot();
        snap.current = None;
        snap.board[15][0] = Some(Color::Red);
        snap.board[15][7] = Some(Color::Blue);

        let view = GameView::default();
        let fb = view.render(&snap, Viewport::new(40, 20));
        let (bx, by) = fb.find_text("┌").unwrap();

        let left = fb.get(bx + 1, by + 16).unwrap();
        assert_eq!(left.ch, '█');
        assert_eq!(left.style.fg, RED);

        let right = fb.get(bx + 1 + 14, by + 16).unwrap();
        assert_eq!(right.style.fg, BLUE);

        let empty = fb.get(bx + 3, by + 16).unwrap();
        assert_eq!(empty.ch, '·');
    }

    #[test]
    fn test_current_piece_drawn_at_position() {
        let mut snap = playing_snapshot();
        let piece = Piece::from_template(
            PieceId::Serial(1),
            ShapeKind::Straight,
            &[(0, 0), (1, 0), (2, 0)],
            [Color::Blue, Color::Red, Color::Blue],
            Position::new(2, 4),
        );
        snap.current = Some(piece);

        let fb = GameView::default().render(&snap, Viewport::new(40, 20));
        let (bx, by) = fb.find_text("┌").unwrap();
        let at = |cx: u16| fb.get(bx + 1 + cx * 2, by + 1 + 4).unwrap().style.fg;
        assert_eq!(at(2), BLUE);
        assert_eq!(at(3), RED);
        assert_eq!(at(4), BLUE);
    }

    #[test]
    fn test_side_panel_shows_stats_and_mode() {
        let mut snap = playing_snapshot();
        snap.stats.score = 1200;
        snap.stats.level = 3;
        snap.stats.lines_cleared = 24;
        snap.mode = GameMode::Ai;

        let fb = GameView::default().render(&snap, Viewport::new(40, 20));
        assert!(fb.find_text("SCORE").is_some());
        assert!(fb.find_text("1200").is_some());
        assert!(fb.find_text("24").is_some());
        let (mx, my) = fb.find_text("MODE").unwrap();
        assert!(fb.row_text(my + 1).contains("AI"));
        assert!(fb.find_text("NEXT").is_some());
        assert!(mx > 18);
    }

    #[test]
    fn test_overlays_follow_state() {
        let view = GameView::default();
        let vp = Viewport::new(40, 20);
        let mut snap = playing_snapshot();

        assert!(view.render(&snap, vp).find_text("PAUSED").is_none());

        snap.state = EngineState::Paused;
        let fb = view.render(&snap, vp);
        assert!(fb.find_text("PAUSED").is_some());
        assert!(fb.find_text("Esc  abandon").is_some());

        snap.state = EngineState::GameOver;
        assert!(view.render(&snap, vp).find_text("GAME OVER").is_some());

        snap.state = EngineState::Idle;
        let fb = view.render(&snap, vp);
        assert!(fb.find_text("human game").is_some());
        assert!(fb.find_text("AI game").is_some());
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = playing_snapshot();
        for (w, h) in [(0, 0), (1, 1), (5, 3), (18, 18)] {
            let fb = GameView::default().render(&snap, Viewport::new(w, h));
            assert_eq!(fb.width(), w);
            assert_eq!(fb.height(), h);
        }
    }

    #[test]
    fn test_huge_cell_size_is_clamped() {
        let snap = playing_snapshot();
        let view = GameView::new(u16::MAX, u16::MAX);
        let fb = view.render(&snap, Viewport::new(80, 24));
        assert_eq!(fb.width(), 80);

        let w = BOARD_WIDTH as u16 * MAX_CELL + 2;
        let fb = view.render(&snap, Viewport::new(w, 40));
        assert_eq!(fb.get(0, 0).map(|g| g.ch), Some('┌'));
        assert_eq!(fb.get(w - 1, 0).map(|g| g.ch), Some('┐'));
    }

    #[test]
    fn test_render_is_pure() {
        let snap = playing_snapshot();
        let view = GameView::default();
        let vp = Viewport::new(40, 20);
        assert_eq!(view.render(&snap, vp), view.render(&snap, vp));
    }
}
