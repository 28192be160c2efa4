use crate::motion::MotionView;
use crate::types::{Outcome, DEFAULT_WIN_EXPONENT};

/// Plain-data copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major exponents of the displayed grid
    pub cells: Vec<u8>,
    /// FNV-1a over the dimensions and cells
    pub board_hash: u64,
    pub motions: Vec<MotionView>,
    pub animating: bool,
    pub progress: f32,
    pub outcome: Outcome,
    /// Round over and held until restart
    pub finished: bool,
    pub win_exponent: u8,
    pub episode_id: u32,
    pub seed: u32,
    pub score: u32,
    pub moves: u32,
}

impl GameSnapshot {
    /// FNV-1a 64-bit over `width`, `height` and the cell bytes
    pub fn hash_cells(width: u8, height: u8, cells: &[u8]) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in [width, height].iter().chain(cells.iter()) {
            h ^= *b as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        }
        h
    }

    /// Exponent at (x, y), 0 when out of range
    pub fn cell(&self, x: u8, y: u8) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.board_hash = Self::hash_cells(0, 0, &[]);
        self.motions.clear();
        self.animating = false;
        self.progress = 0.0;
        self.outcome = Outcome::None;
        self.finished = false;
        self.win_exponent = DEFAULT_WIN_EXPONENT;
        self.episode_id = 0;
        self.seed = 0;
        self.score = 0;
        self.moves = 0;
    }

    /// True while moves are accepted
    pub fn playable(&self) -> bool {
        !self.animating && !self.finished
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            board_hash: 0,
            motions: Vec::new(),
            animating: false,
            progress: 0.0,
            outcome: Outcome::None,
            finished: false,
            win_exponent: DEFAULT_WIN_EXPONENT,
            episode_id: 0,
            seed: 0,
            score: 0,
            moves: 0,
        };
        s.clear();
        s
    }
}
