//! Move resolution - slide and merge
//!
//! Resolution is a pure function of the pre-move grid and a direction. It
//! works on a scratch copy of the grid and never touches the caller's grid:
//! the engine commits the scratch result only when the slide animation ends.
//!
//! # Scan order
//!
//! Tiles closest to the destination wall are processed first, so each tile
//! sees the settled position of the tile ahead of it in its line:
//!
//! | Direction | Outer loop | Inner loop |
//! |-----------|------------|------------|
//! | Left  | x = 1 .. W-1 | y ascending |
//! | Right | x = W-2 .. 0 | y ascending |
//! | Up    | y = 1 .. H-1 | x ascending |
//! | Down  | y = H-2 .. 0 | x ascending |
//!
//! # Per tile
//!
//! Walk from the source along the direction until the edge or the first
//! occupied scratch cell. An equal, not-yet-merged tile there absorbs the
//! mover (exponent + 1, locked for the rest of the move). Anything else stops
//! the mover one cell short. A [`Motion`] is recorded whenever the tile
//! changes cell.

use crate::grid::Grid;
use crate::motion::Motion;
use crate::types::{tile_value, Direction, Position, MAX_EXPONENT};

/// Result of resolving one move against a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Scratch grid after the move (no spawn yet)
    pub grid: Grid,
    /// Tile slides in processing order
    pub motions: Vec<Motion>,
    pub merges: u32,
    /// Sum of the values produced by merges
    pub score: u32,
    /// Highest exponent produced by a merge (0 if none)
    pub max_merged: u8,
    /// Cells produced by a merge during this move
    locked: Vec<bool>,
}

impl Resolution {
    /// Empty resolution sized for a `width` x `height` grid
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            grid: Grid::new(width, height),
            motions: Vec::with_capacity(width as usize * height as usize),
            merges: 0,
            score: 0,
            max_merged: 0,
            locked: vec![false; width as usize * height as usize],
        }
    }

    /// True when at least one tile changed cell
    pub fn changed(&self) -> bool {
        !self.motions.is_empty()
    }

    fn begin(&mut self, source: &Grid) {
        if self.grid.width() != source.width() || self.grid.height() != source.height() {
            *self = Self::new(source.width(), source.height());
        }
        self.grid.copy_from(source);
        self.motions.clear();
        self.merges = 0;
        self.score = 0;
        self.max_merged = 0;
        self.locked.fill(false);
    }

    #[inline]
    fn offset(&self, pos: Position) -> usize {
        pos.y as usize * self.grid.width() as usize + pos.x as usize
    }

    fn slide(&mut self, src: Position, dir: Direction) {
        let value = self.grid.at(src);
        if value == 0 {
            return;
        }

        let mut cur = src;
        let mut merged = false;
        loop {
            let next = cur.step(dir);
            let Some(occupant) = self.grid.get(next) else {
                break;
            };
            if occupant == 0 {
                cur = next;
                continue;
            }
            if occupant == value && value < MAX_EXPONENT && !self.locked[self.offset(next)] {
                cur = next;
                merged = true;
            }
            break;
        }

        if cur == src {
            return;
        }

        self.grid.set(src, 0);
        if merged {
            let produced = value + 1;
            self.grid.set(cur, produced);
            let idx = self.offset(cur);
            self.locked[idx] = true;
            self.merges += 1;
            self.score += tile_value(produced);
            self.max_merged = self.max_merged.max(produced);
        } else {
            self.grid.set(cur, value);
        }

        self.motions.push(Motion {
            from: src,
            to: cur,
            value,
        });
    }
}

/// Resolve a move, allocating a fresh [`Resolution`].
///
/// ```
/// use tui_2048_core::{resolve, Grid};
/// use tui_2048_types::Direction;
///
/// // values [2, 2, 4, 0] are exponents [1, 1, 2, 0]
/// let grid = Grid::from_rows(&[[1u8, 1, 2, 0]]);
/// let res = resolve(&grid, Direction::Left);
/// assert_eq!(res.grid.row(0), &[2, 2, 0, 0]);
/// assert_eq!(res.merges, 1);
/// ```
pub fn resolve(grid: &Grid, dir: Direction) -> Resolution {
    let mut out = Resolution::new(grid.width(), grid.height());
    resolve_into(grid, dir, &mut out);
    out
}

/// Resolve a move into an existing [`Resolution`], reusing its buffers.
pub fn resolve_into(grid: &Grid, dir: Direction, out: &mut Resolution) {
    out.begin(grid);
    let w = grid.width();
    let h = grid.height();

    match dir {
        Direction::Left => {
            for x in 1..w {
                for y in 0..h {
                    out.slide(Position::new(x, y), dir);
                }
            }
        }
        Direction::Right => {
            for x in (0..w - 1).rev() {
                for y in 0..h {
                    out.slide(Position::new(x, y), dir);
                }
            }
        }
        Direction::Up => {
            for y in 1..h {
                for x in 0..w {
                    out.slide(Position::new(x, y), dir);
                }
            }
        }
        Direction::Down => {
            for y in (0..h - 1).rev() {
                for x in 0..w {
                    out.slide(Position::new(x, y), dir);
                }
            }
        }
    }
}

/// True if moving in `dir` would change the grid.
///
/// A move changes the grid exactly when some tile has an empty cell or an
/// equal tile directly ahead of it.
pub fn can_move(grid: &Grid, dir: Direction) -> bool {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Position::new(x, y);
            let value = grid.at(pos);
            if value == 0 {
                continue;
            }
            match grid.get(pos.step(dir)) {
                Some(0) => return true,
                Some(ahead) if ahead == value && value < MAX_EXPONENT => return true,
                _ => {}
            }
        }
    }
    false
}
