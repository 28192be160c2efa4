//! Grid module - the tile field
//!
//! The grid is a W×H field of exponent-encoded cells (0 = empty, k = tile 2^k).
//! Dimensions are chosen at construction; storage is a single flat buffer.
//! Coordinates: (x, y) where x is the column (left to right) and y the row
//! (top to bottom).

use crate::types::{Position, MAX_EXPONENT};

/// The tile field, row-major flat storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<u8>,
}

impl Grid {
    /// Create an empty grid
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u8, height: u8) -> Self {
        assert!(width > 0 && height > 0, "grid must be at least 1x1");
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Build a grid from rows of exponents (top row first).
    ///
    /// Panics on ragged rows or exponents above [`MAX_EXPONENT`].
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        assert!(!rows.is_empty(), "grid needs at least one row");
        let width = rows[0].as_ref().len();
        assert!(width > 0 && width <= u8::MAX as usize, "bad row width {width}");
        assert!(rows.len() <= u8::MAX as usize, "too many rows");

        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), width, "ragged grid rows");
            for &v in row {
                assert!(v <= MAX_EXPONENT, "exponent {v} out of range");
                cells.push(v);
            }
        }

        Self {
            width: width as u8,
            height: rows.len() as u8,
            cells,
        }
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some(pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// True when no tile is on the grid
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Exponent at `pos`, or None if out of bounds
    pub fn get(&self, pos: Position) -> Option<u8> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Exponent at `pos`. Panics when out of bounds.
    #[inline]
    pub fn at(&self, pos: Position) -> u8 {
        match self.index(pos) {
            Some(i) => self.cells[i],
            None => panic!("position {:?} outside {}x{} grid", pos, self.width, self.height),
        }
    }

    /// Write `value` at `pos`. Panics when out of bounds or the exponent is invalid.
    pub fn set(&mut self, pos: Position, value: u8) {
        assert!(value <= MAX_EXPONENT, "exponent {value} out of range");
        match self.index(pos) {
            Some(i) => self.cells[i] = value,
            None => panic!("position {:?} outside {}x{} grid", pos, self.width, self.height),
        }
    }

    /// Row-major view of the cells
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// One row of the grid
    pub fn row(&self, y: u8) -> &[u8] {
        assert!(y < self.height, "row {y} out of range");
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(move |(i, _)| Position::new((i % w) as u8, (i / w) as u8))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Number of occupied cells
    pub fn tile_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Largest exponent on the grid (0 when empty)
    pub fn max_exponent(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of displayed tile values
    pub fn value_sum(&self) -> u64 {
        self.cells
            .iter()
            .filter(|&&v| v != 0)
            .map(|&v| 1u64 << v)
            .sum()
    }

    /// True when any two 4-neighbours hold the same non-zero exponent
    pub fn has_equal_neighbours(&self) -> bool {
        let w = self.width as usize;
        let h = self.height as usize;
        for y in 0..h {
            for x in 0..w {
                let v = self.cells[y * w + x];
                if v == 0 {
                    continue;
                }
                if x + 1 < w && self.cells[y * w + x + 1] == v {
                    return true;
                }
                if y + 1 < h && self.cells[(y + 1) * w + x] == v {
                    return true;
                }
            }
        }
        false
    }

    /// Full with no possible merge: no move in any direction changes the grid
    pub fn is_terminal(&self) -> bool {
        self.is_full() && !self.has_equal_neighbours()
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Overwrite this grid with `other`, reusing the allocation
    pub fn copy_from(&mut self, other: &Grid) {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "grid dimensions differ"
        );
        self.cells.copy_from_slice(&other.cells);
    }

    /// Rows as vectors, top row first
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height).map(|y| self.row(y).to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.index(Position::new(0, 0)), Some(0));
        assert_eq!(grid.index(Position::new(3, 0)), Some(3));
        assert_eq!(grid.index(Position::new(0, 1)), Some(4));
        assert_eq!(grid.index(Position::new(3, 2)), Some(11));
        assert_eq!(grid.index(Position::new(4, 0)), None);
        assert_eq!(grid.index(Position::new(0, 3)), None);
    }

    #[test]
    fn test_grid_set_and_get() {
        let mut grid = Grid::new(4, 4);
        grid.set(Position::new(2, 1), 3);

        assert_eq!(grid.get(Position::new(2, 1)), Some(3));
        assert_eq!(grid.cells()[4 + 2], 3);
        assert_eq!(grid.get(Position::new(9, 9)), None);
        assert_eq!(grid.tile_count(), 1);
        assert_eq!(grid.empty_count(), 15);
    }

    #[test]
    #[should_panic]
    fn test_grid_set_out_of_bounds_panics() {
        let mut grid = Grid::new(4, 4);
        grid.set(Position::new(4, 0), 1);
    }

    #[test]
    #[should_panic]
    fn test_grid_rejects_oversized_exponent() {
        let mut grid = Grid::new(4, 4);
        grid.set(Position::new(0, 0), MAX_EXPONENT + 1);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let grid = Grid::from_rows(&[[1u8, 0], [0, 2]]);
        let empty: Vec<_> = grid.empty_cells().collect();
        assert_eq!(empty, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn test_terminal_detection() {
        let stuck = Grid::from_rows(&[[1u8, 2, 1, 2], [2, 1, 2, 1], [1, 2, 1, 2], [2, 1, 2, 1]]);
        assert!(stuck.is_full());
        assert!(!stuck.has_equal_neighbours());
        assert!(stuck.is_terminal());

        let vertical_pair =
            Grid::from_rows(&[[1u8, 2, 1, 2], [2, 1, 2, 1], [1, 2, 1, 2], [1, 3, 4, 5]]);
        assert!(vertical_pair.is_full());
        assert!(!vertical_pair.is_terminal());

        let with_gap = Grid::from_rows(&[[1u8, 2], [3, 0]]);
        assert!(!with_gap.is_terminal());
    }

    #[test]
    fn test_rows_roundtrip() {
        let rows: Vec<Vec<u8>> = vec![vec![0, 1, 2], vec![3, 0, 0]];
        let grid = Grid::from_rows(&rows);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.to_rows(), rows);
        assert_eq!(grid.value_sum(), 2 + 4 + 8);
        assert_eq!(grid.max_exponent(), 3);
    }
}
