//! Grid engine - the move/merge/spawn state machine
//!
//! This module ties together the grid, move resolution, the spawn RNG and the
//! slide animation clock.
//!
//! # Lifecycle
//!
//! ```text
//!            request_move (tiles moved)            tick (elapsed >= duration)
//!   Idle ───────────────────────────────▶ Animating ─────────────────────────▶ Idle + spawn
//!    ▲                                         │
//!    │ reset                                   │ winning move, EndPolicy::Hold
//!    └──────────────── Finished(outcome) ◀─────┘
//! ```
//!
//! Two grids are kept while a move animates: the displayed grid (pre-move, with
//! the moving tiles' source cells cleared) and the resolved scratch grid, which
//! replaces the displayed grid when the animation completes.

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::grid::Grid;
use crate::motion::{Animation, Motion, MotionView};
use crate::resolve::{can_move, resolve_into, Resolution};
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Engine construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub grid_width: u8,
    pub grid_height: u8,
    /// Exponent of the winning tile (11 = 2048)
    pub win_exponent: u8,
    pub animation_ms: u32,
    pub seed: u32,
    pub end_policy: EndPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            win_exponent: DEFAULT_WIN_EXPONENT,
            animation_ms: DEFAULT_ANIMATION_MS,
            seed: 1,
            end_policy: EndPolicy::AutoReset,
        }
    }
}

/// Coarse engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Accepting moves
    Idle,
    /// A move is sliding; moves are ignored
    Animating,
    /// Round over and held on screen until [`GridEngine::reset`]
    Finished(Outcome),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GridEngine {
    config: EngineConfig,
    /// Displayed grid; authoritative whenever no move is animating
    grid: Grid,
    /// Resolved result of the animating move
    pending: Resolution,
    animation: Animation,
    rng: SimpleRng,
    state: EngineState,
    /// Outcome of the last round end (or None)
    outcome: Outcome,
    /// Outcome to enter once the current animation finalizes
    held_outcome: Outcome,
    last_spawn: Option<Position>,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    score: u32,
    moves: u32,
}

impl GridEngine {
    /// Create an engine and spawn the first tile.
    ///
    /// Panics on a zero-sized grid or a win exponent outside `MIN_WIN_EXPONENT..=MAX_EXPONENT`.
    pub fn new(config: EngineConfig) -> Self {
        assert!(
            config.grid_width > 0 && config.grid_height > 0,
            "grid must be at least 1x1"
        );
        assert!(
            (MIN_WIN_EXPONENT..=MAX_EXPONENT).contains(&config.win_exponent),
            "win exponent {} out of range",
            config.win_exponent
        );

        let mut engine = Self {
            config,
            grid: Grid::new(config.grid_width, config.grid_height),
            pending: Resolution::new(config.grid_width, config.grid_height),
            animation: Animation::new(config.animation_ms),
            rng: SimpleRng::new(config.seed),
            state: EngineState::Idle,
            outcome: Outcome::None,
            held_outcome: Outcome::None,
            last_spawn: None,
            episode_id: 0,
            score: 0,
            moves: 0,
        };
        engine.spawn();
        engine
    }

    /// Engine with default dimensions and the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(EngineConfig {
            seed,
            ..EngineConfig::default()
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> u8 {
        self.grid.width()
    }

    pub fn height(&self) -> u8 {
        self.grid.height()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_animating(&self) -> bool {
        self.state == EngineState::Animating
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Seed the engine was constructed with
    pub fn seed(&self) -> u32 {
        self.config.seed
    }

    /// Where the most recent tile spawned
    pub fn last_spawn(&self) -> Option<Position> {
        self.last_spawn
    }

    /// Raw motion records of the animating move (empty when idle)
    pub fn motion_records(&self) -> &[Motion] {
        if self.is_animating() {
            self.pending.motions.as_slice()
        } else {
            &[]
        }
    }

    /// In-flight motions paired with the current animation fraction
    pub fn motions(&self) -> impl Iterator<Item = MotionView> + '_ {
        let progress = self.progress();
        self.motion_records()
            .iter()
            .map(move |&m| MotionView::new(m, progress))
    }

    /// Animation fraction in [0, 1] (0 when idle)
    pub fn progress(&self) -> f32 {
        self.animation.progress()
    }

    /// True if a move in `dir` would change the grid right now
    pub fn can_move(&self, dir: Direction) -> bool {
        self.state == EngineState::Idle && can_move(&self.grid, dir)
    }

    /// Directions that would change the grid right now
    pub fn available_moves(&self) -> ArrayVec<Direction, 4> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.can_move(dir))
            .collect()
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: GameAction) -> Outcome {
        match action {
            GameAction::Move(dir) => self.request_move(dir),
            GameAction::Restart => {
                self.reset();
                Outcome::None
            }
        }
    }

    /// Resolve a move.
    ///
    /// Ignored while animating. Returns the round outcome this move produced;
    /// under [`EndPolicy::AutoReset`] a `Won`/`Lost` result means the grid has
    /// already been reset.
    pub fn request_move(&mut self, dir: Direction) -> Outcome {
        match self.state {
            EngineState::Animating => return Outcome::None,
            EngineState::Finished(outcome) => return outcome,
            EngineState::Idle => {}
        }

        resolve_into(&self.grid, dir, &mut self.pending);

        if self.pending.max_merged >= self.config.win_exponent {
            info!(
                "win tile {} reached after {} moves (score {})",
                tile_value(self.pending.max_merged),
                self.moves + 1,
                self.score + self.pending.score
            );
            match self.config.end_policy {
                EndPolicy::AutoReset => {
                    self.restart();
                    self.outcome = Outcome::Won;
                    return Outcome::Won;
                }
                EndPolicy::Hold => self.held_outcome = Outcome::Won,
            }
        } else if self.pending.grid.is_terminal() {
            info!(
                "no moves left after {} moves (score {})",
                self.moves, self.score
            );
            self.pending.motions.clear();
            match self.config.end_policy {
                EndPolicy::AutoReset => self.restart(),
                EndPolicy::Hold => self.state = EngineState::Finished(Outcome::Lost),
            }
            self.outcome = Outcome::Lost;
            return Outcome::Lost;
        }

        if !self.pending.changed() {
            return Outcome::None;
        }

        debug!(
            "move {}: {} motions, {} merges",
            dir.as_str(),
            self.pending.motions.len(),
            self.pending.merges
        );

        for m in &self.pending.motions {
            self.grid.set(m.from, 0);
        }
        self.score += self.pending.score;
        self.moves += 1;
        self.animation.start();
        self.state = EngineState::Animating;

        self.held_outcome
    }

    /// Advance the animation clock.
    ///
    /// Returns true when this call finished the animation (grid committed,
    /// tile spawned). A no-op unless animating.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.state != EngineState::Animating {
            return false;
        }
        if !self.animation.advance(elapsed_ms) {
            return false;
        }
        self.finalize();
        true
    }

    fn finalize(&mut self) {
        self.grid.copy_from(&self.pending.grid);
        self.pending.motions.clear();
        self.animation.stop();

        if self.held_outcome.is_over() {
            self.outcome = std::mem::take(&mut self.held_outcome);
            self.state = EngineState::Finished(self.outcome);
            return;
        }

        self.state = EngineState::Idle;
        self.spawn();

        if self.config.end_policy == EndPolicy::Hold && self.grid.is_terminal() {
            info!("grid locked up after {} moves (score {})", self.moves, self.score);
            self.outcome = Outcome::Lost;
            self.state = EngineState::Finished(Outcome::Lost);
        }
    }

    /// Spawn one tile on a uniformly chosen empty cell.
    ///
    /// A full grid is reset first (which itself spawns). Ignored while a move
    /// is animating. Returns the cell that received the tile.
    pub fn spawn(&mut self) -> Option<Position> {
        if self.is_animating() {
            return None;
        }

        let empty = self.grid.empty_count();
        if empty == 0 {
            self.reset();
            return self.last_spawn;
        }

        let pos = self.grid.empty_cells().nth(self.rng.pick(empty))?;
        let exponent = self.rng.spawn_exponent();
        self.grid.set(pos, exponent);
        self.last_spawn = Some(pos);
        Some(pos)
    }

    /// Start a new round: clear the grid and spawn one tile.
    pub fn reset(&mut self) {
        self.restart();
        self.outcome = Outcome::None;
    }

    fn restart(&mut self) {
        info!(
            "episode {} ends with score {} after {} moves",
            self.episode_id, self.score, self.moves
        );
        self.grid.clear();
        self.pending.motions.clear();
        self.animation.stop();
        self.state = EngineState::Idle;
        self.held_outcome = Outcome::None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.score = 0;
        self.moves = 0;
        self.spawn();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.board_hash = GameSnapshot::hash_cells(out.width, out.height, &out.cells);
        out.motions.clear();
        out.motions.extend(self.motions());
        out.animating = self.is_animating();
        out.progress = self.progress();
        out.outcome = self.outcome;
        out.finished = matches!(self.state, EngineState::Finished(_));
        out.win_exponent = self.config.win_exponent;
        out.episode_id = self.episode_id;
        out.seed = self.config.seed;
        out.score = self.score;
        out.moves = self.moves;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Replace the grid (tests and benchmarks).
    ///
    /// Cancels any running animation. Panics if the dimensions differ.
    pub fn load_grid(&mut self, grid: Grid) {
        assert_eq!(
            (grid.width(), grid.height()),
            (self.grid.width(), self.grid.height()),
            "grid dimensions differ from engine"
        );
        self.grid = grid;
        self.pending.motions.clear();
        self.animation.stop();
        self.held_outcome = Outcome::None;
        self.state = EngineState::Idle;
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
