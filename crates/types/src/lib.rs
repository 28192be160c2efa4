//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, configuration).
//!
//! # Tile Encoding
//!
//! Cells store an exponent rather than the displayed value:
//!
//! | Stored | Displayed |
//! |--------|-----------|
//! | 0 | empty |
//! | 1 | 2 |
//! | 2 | 4 |
//! | k | 2^k |
//! | 11 | 2048 (default win tile) |
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_WIDTH` | 4 | Columns |
//! | `DEFAULT_GRID_HEIGHT` | 4 | Rows |
//! | `DEFAULT_WIN_EXPONENT` | 11 | 2^11 = 2048 |
//! | `MIN_WIN_EXPONENT` | 3 | Lowest goal, 2^3 = 8 |
//! | `DEFAULT_ANIMATION_MS` | 100 | Slide duration per move |
//! | `TICK_MS` | 16 | Presenter frame interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, Position, tile_value};
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir.delta(), (-1, 0));
//!
//! let action = GameAction::from_str("moveUp").unwrap();
//! assert_eq!(action, GameAction::Move(Direction::Up));
//!
//! assert_eq!(Position::new(1, 2).step(Direction::Down), Position::new(1, 3));
//! assert_eq!(tile_value(11), 2048);
//! ```

/// Default grid width in cells
pub const DEFAULT_GRID_WIDTH: u8 = 4;

/// Default grid height in cells
pub const DEFAULT_GRID_HEIGHT: u8 = 4;

/// Default exponent of the winning tile (2^11 = 2048)
pub const DEFAULT_WIN_EXPONENT: u8 = 11;

/// Smallest accepted win exponent; spawns place exponent 1 or 2 directly,
/// so a lower goal would be reached (or overshot) without a merge
pub const MIN_WIN_EXPONENT: u8 = 3;

/// Largest exponent a cell can hold (2^15 = 32768)
pub const MAX_EXPONENT: u8 = 15;

/// Default slide animation duration in milliseconds
pub const DEFAULT_ANIMATION_MS: u32 = 100;

/// Presenter frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Spawn odds: a "2" (exponent 1) is drawn when `roll < SPAWN_TWO_IN_TEN` out of 10
pub const SPAWN_TWO_IN_TEN: u32 = 9;

/// Displayed value of an exponent-encoded tile (0 for empty).
///
/// ```
/// use tui_2048_types::tile_value;
///
/// assert_eq!(tile_value(0), 0);
/// assert_eq!(tile_value(1), 2);
/// assert_eq!(tile_value(10), 1024);
/// ```
#[inline]
pub fn tile_value(exponent: u8) -> u32 {
    if exponent == 0 {
        0
    } else {
        1u32 << exponent
    }
}

/// Cardinal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a stable order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(dx, dy)`; y grows downwards
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Parse from string (case-insensitive)
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("r"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Cell coordinate on the grid (x = column, y = row, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Neighbouring position one step in `dir`.
    ///
    /// Callers are responsible for bounds; stepping off the top or left edge
    /// wraps and will be rejected by the grid.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x.wrapping_add_signed(dx),
            y: self.y.wrapping_add_signed(dy),
        }
    }
}

/// Player actions understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Move(Direction),
    Restart,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::Move(Direction::Up)),
            "movedown" => Some(GameAction::Move(Direction::Down)),
            "moveleft" => Some(GameAction::Move(Direction::Left)),
            "moveright" => Some(GameAction::Move(Direction::Right)),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(Direction::Up) => "moveUp",
            GameAction::Move(Direction::Down) => "moveDown",
            GameAction::Move(Direction::Left) => "moveLeft",
            GameAction::Move(Direction::Right) => "moveRight",
            GameAction::Restart => "restart",
        }
    }
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// Round continues
    #[default]
    None,
    /// A merge produced the win tile
    Won,
    /// Grid is full and no two neighbours match
    Lost,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::None)
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Outcome::None => None,
            Outcome::Won => Some("won"),
            Outcome::Lost => Some("lost"),
        }
    }
}

/// What the engine does when a round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndPolicy {
    /// Clear the grid and spawn immediately (classic behaviour)
    #[default]
    AutoReset,
    /// Keep the final grid on screen until an explicit restart
    Hold,
}

impl EndPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "auto_reset" | "autoreset" | "reset" => Some(EndPolicy::AutoReset),
            "hold" => Some(EndPolicy::Hold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EndPolicy::AutoReset => "auto_reset",
            EndPolicy::Hold => "hold",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_defaults() {
        assert_eq!(DEFAULT_GRID_WIDTH, 4);
        assert_eq!(DEFAULT_GRID_HEIGHT, 4);
        assert_eq!(tile_value(DEFAULT_WIN_EXPONENT), 2048);
        assert!(DEFAULT_WIN_EXPONENT <= MAX_EXPONENT);
        assert_eq!(SPAWN_TWO_IN_TEN, 9);
    }

    #[test]
    fn test_direction_roundtrip_names() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
            assert_eq!(
                GameAction::from_str(GameAction::Move(dir).as_str()),
                Some(GameAction::Move(dir))
            );
        }
    }

    #[test]
    fn test_direction_deltas_are_unit_steps() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
            assert_eq!(dir.is_horizontal(), dx != 0);
        }
    }

    #[test]
    fn test_position_step_wraps_off_top_left() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Direction::Right), Position::new(1, 0));
        assert_eq!(origin.step(Direction::Left).x, u8::MAX);
        assert_eq!(origin.step(Direction::Up).y, u8::MAX);
    }

    #[test]
    fn test_end_policy_parse() {
        assert_eq!(EndPolicy::from_str("hold"), Some(EndPolicy::Hold));
        assert_eq!(EndPolicy::from_str("Auto-Reset"), Some(EndPolicy::AutoReset));
        assert_eq!(EndPolicy::from_str("never"), None);
        assert!(Outcome::Won.is_over());
        assert!(!Outcome::None.is_over());
    }
}
