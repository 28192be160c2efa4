//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Settled tiles are drawn from the snapshot's cells; tiles that are sliding
//! are drawn on top at their interpolated positions, so a move reads as a
//! slide rather than a jump.

use crate::core::{GameSnapshot, Layout, MotionView};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{tile_value, Outcome, Position};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const SLOT_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    /// Gap between tiles (columns, rows).
    gap: (u16, u16),
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 fits a five digit label with a column of padding either side.
        Self {
            tile_w: 7,
            tile_h: 3,
            gap: (1, 0),
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_gap(mut self, cols: u16, rows: u16) -> Self {
        self.gap = (cols, rows);
        self
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Board frame size (border included) for a `grid_w` x `grid_h` grid
    pub fn frame_size(&self, grid_w: u8, grid_h: u8) -> (u16, u16) {
        let (bw, bh) = self.layout_at(0, 0).board_size(grid_w, grid_h);
        (bw as u16 + 2, bh as u16 + 2)
    }

    fn layout_at(&self, x: u16, y: u16) -> Layout {
        Layout::fixed(
            (x as u32, y as u32),
            (self.tile_w as u32, self.tile_h as u32),
            (self.gap.0 as u32, self.gap.1 as u32),
        )
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Allocation-free once the framebuffer has reached the viewport size.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        if snap.width == 0 || snap.height == 0 {
            return;
        }

        let (frame_w, frame_h) = self.frame_size(snap.width, snap.height);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let board = CellStyle::new(BOARD_BG, BOARD_BG);
        fb.fill_rect(start_x, start_y, frame_w, frame_h, ' ', board);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        let layout = self.layout_at(start_x + 1, start_y + 1);

        // Settled tiles and empty slots.
        for y in 0..snap.height {
            for x in 0..snap.width {
                let (px, py) = layout.cell_origin(Position::new(x, y));
                self.draw_tile(fb, px as u16, py as u16, snap.cell(x, y), snap.win_exponent);
            }
        }

        // Sliding tiles on top.
        for m in &snap.motions {
            self.draw_motion(fb, &layout, m, snap.win_exponent);
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.finished {
            let text = match snap.outcome {
                Outcome::Won => "YOU WIN!",
                _ => "GAME OVER",
            };
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::new(Rgb::new(119, 110, 101), BOARD_BG);

        fb.put_char(x, y, '╭', style);
        fb.put_char(x + w - 1, y, '╮', style);
        fb.put_char(x, y + h - 1, '╰', style);
        fb.put_char(x + w - 1, y + h - 1, '╯', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_motion(&self, fb: &mut FrameBuffer, layout: &Layout, m: &MotionView, win_exponent: u8) {
        let (fx, fy) = layout.motion_origin(m);
        self.draw_tile(
            fb,
            fx.round().max(0.0) as u16,
            fy.round().max(0.0) as u16,
            m.value,
            win_exponent,
        );
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, px: u16, py: u16, exponent: u8, win_exponent: u8) {
        if exponent == 0 {
            let slot = CellStyle::new(SLOT_BG, SLOT_BG);
            fb.fill_rect(px, py, self.tile_w, self.tile_h, ' ', slot);
            return;
        }

        let bg = tile_color(exponent);
        fb.fill_rect(px, py, self.tile_w, self.tile_h, ' ', CellStyle::new(bg, bg));

        let mut label = CellStyle::new(text_color(exponent), bg).bold();
        if exponent >= win_exponent {
            label.fg = LIGHT_TEXT;
        }
        fb.put_u32_centered(px, py + self.tile_h / 2, self.tile_w, tile_value(exponent), label);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = CellStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GOAL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, tile_value(snap.win_exponent), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        fb.put_char(panel_x, y, '#', value);
        fb.put_u32(panel_x + 1, y, snap.episode_id + 1, value);
        y = y.saturating_add(2);

        for line in ["arrows/wasd", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str_centered(start_x, mid_y, frame_w, text, style);
        let hint = CellStyle { dim: true, ..style };
        fb.put_str_centered(start_x, mid_y.saturating_add(1), frame_w, "press r", hint);
    }
}

/// Classic tile palette, by exponent
pub fn tile_color(exponent: u8) -> Rgb {
    match exponent {
        0 => SLOT_BG,
        1 => Rgb::new(238, 228, 218),
        2 => Rgb::new(237, 224, 200),
        3 => Rgb::new(242, 177, 121),
        4 => Rgb::new(245, 149, 99),
        5 => Rgb::new(246, 124, 95),
        6 => Rgb::new(246, 94, 59),
        7 => Rgb::new(237, 207, 114),
        8 => Rgb::new(237, 204, 97),
        9 => Rgb::new(237, 200, 80),
        10 => Rgb::new(237, 197, 63),
        11 => Rgb::new(237, 194, 46),
        _ => Rgb::new(60, 58, 50),
    }
}

/// Dark labels on the pale 2 and 4 tiles, light labels from 8 up
pub fn text_color(exponent: u8) -> Rgb {
    if exponent >= 3 {
        LIGHT_TEXT
    } else {
        DARK_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_distinguishes_small_tiles() {
        assert_ne!(tile_color(1), tile_color(2));
        assert_eq!(text_color(2), DARK_TEXT);
        assert_eq!(text_color(3), LIGHT_TEXT);
        assert_eq!(tile_color(14), tile_color(15));
    }

    #[test]
    fn test_frame_size_default_4x4() {
        // 4 tiles of 7 cols + 3 gaps + border = 33; 4 tiles of 3 rows + border = 14.
        assert_eq!(GameView::default().frame_size(4, 4), (33, 14));
    }
}
