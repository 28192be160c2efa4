//! Layout module - cell space to render space
//!
//! Maps grid positions (and fractional positions of sliding tiles) onto a
//! renderer's coordinate system. Units are whatever the renderer uses: pixels
//! for a window, character cells for a terminal.
//!
//! Geometry of a `W`-column board inside a `width`-unit surface:
//!
//! ```text
//! | margin | tile | gap | tile | gap | ... | tile | margin |
//! tile = (width - 2 * margin - gap * (W - 1)) / W
//! ```

use crate::motion::MotionView;
use crate::types::Position;

/// Default outer margin in render units
pub const FIELD_MARGIN: u32 = 20;

/// Default gap between tiles in render units
pub const TILE_MARGIN: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left corner of tile (0, 0)
    pub origin: (u32, u32),
    /// Tile width and height
    pub tile: (u32, u32),
    /// Gap between neighbouring tiles (x, y)
    pub gap: (u32, u32),
}

impl Layout {
    /// Square tiles fitted into a `width_px` x `height_px` surface with the
    /// default margins.
    pub fn new(width_px: u32, height_px: u32, grid_width: u8, grid_height: u8) -> Self {
        Self::fit(
            width_px,
            height_px,
            grid_width,
            grid_height,
            FIELD_MARGIN,
            TILE_MARGIN,
        )
    }

    /// Square tiles sized by the tighter of the two axes.
    pub fn fit(
        width: u32,
        height: u32,
        grid_width: u8,
        grid_height: u8,
        margin: u32,
        gap: u32,
    ) -> Self {
        assert!(grid_width > 0 && grid_height > 0, "grid must be at least 1x1");
        let along = |extent: u32, cells: u8| {
            extent
                .saturating_sub(2 * margin)
                .saturating_sub(gap * (cells as u32 - 1))
                / cells as u32
        };
        let size = along(width, grid_width).min(along(height, grid_height));
        Self {
            origin: (margin, margin),
            tile: (size, size),
            gap: (gap, gap),
        }
    }

    /// Explicit geometry (non-square tiles, e.g. terminal character cells)
    pub fn fixed(origin: (u32, u32), tile: (u32, u32), gap: (u32, u32)) -> Self {
        Self { origin, tile, gap }
    }

    pub fn tile_size(&self) -> (u32, u32) {
        self.tile
    }

    /// Distance between the origins of neighbouring tiles
    pub fn pitch(&self) -> (u32, u32) {
        (self.tile.0 + self.gap.0, self.tile.1 + self.gap.1)
    }

    /// Extent covered by a `grid_width` x `grid_height` board, margins excluded
    pub fn board_size(&self, grid_width: u8, grid_height: u8) -> (u32, u32) {
        let (px, py) = self.pitch();
        (
            (px * grid_width as u32).saturating_sub(self.gap.0),
            (py * grid_height as u32).saturating_sub(self.gap.1),
        )
    }

    /// Top-left corner of the tile at `pos`
    pub fn cell_origin(&self, pos: Position) -> (u32, u32) {
        let (px, py) = self.pitch();
        (
            self.origin.0 + pos.x as u32 * px,
            self.origin.1 + pos.y as u32 * py,
        )
    }

    /// Top-left corner for a fractional cell-space point
    pub fn point(&self, x: f32, y: f32) -> (f32, f32) {
        let (px, py) = self.pitch();
        (
            self.origin.0 as f32 + x * px as f32,
            self.origin.1 as f32 + y * py as f32,
        )
    }

    /// Top-left corner of a sliding tile at its current progress
    pub fn motion_origin(&self, motion: &MotionView) -> (f32, f32) {
        let (x, y) = motion.position();
        self.point(x, y)
    }
}
