//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 rules: the tile grid, move resolution, spawn
//! randomness, and the animation bookkeeping a renderer needs to draw tiles
//! sliding between cells. It has **no dependencies** on terminals, windows or
//! I/O, making it:
//!
//! - **Deterministic**: Same seed and inputs produce identical games
//! - **Testable**: Every rule is exercised without a renderer
//! - **Portable**: Drive it from a terminal, a GUI or a headless harness
//!
//! # Module Structure
//!
//! - [`grid`]: W×H exponent grid with flat storage and terminal detection
//! - [`resolve`]: Slide/merge resolution into a scratch grid
//! - [`motion`]: Motion records and the slide animation clock
//! - [`engine`]: [`GridEngine`], the Idle/Animating state machine
//! - [`rng`]: Seedable LCG used for spawns
//! - [`snapshot`]: Renderer-facing plain-data copy of the engine
//! - [`layout`]: Cell space to pixel/terminal space mapping
//!
//! # Game Rules
//!
//! - **Slide**: Every tile travels toward the chosen wall until blocked
//! - **Merge**: Two equal tiles combine into the next power of two, once per move
//! - **Spawn**: After each move that changed the grid, a 2 (90%) or 4 (10%)
//!   appears on a random empty cell
//! - **Win / loss**: Reaching the win tile or locking up the grid ends the round;
//!   [`EndPolicy`](types::EndPolicy) decides whether the grid resets at once
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GridEngine;
//! use tui_2048_types::Direction;
//!
//! let mut engine = GridEngine::with_seed(12345);
//! assert_eq!(engine.grid().tile_count(), 1);
//!
//! // A single tile can always move somewhere.
//! let dir = engine.available_moves()[0];
//! engine.request_move(dir);
//! assert!(engine.is_animating());
//!
//! // Drawing: interpolate the in-flight tiles.
//! for m in engine.motions() {
//!     let (_x, _y) = m.position();
//! }
//!
//! // Finish the slide; the move commits and a new tile spawns.
//! assert!(engine.tick(1_000));
//! assert_eq!(engine.grid().tile_count(), 2);
//! ```
//!
//! # Timing
//!
//! Call [`GridEngine::tick`](engine::GridEngine::tick) every frame with the
//! elapsed milliseconds. Moves are rejected while a slide is animating, so the
//! player can never queue moves faster than they are shown.

pub mod engine;
pub mod grid;
pub mod layout;
pub mod motion;
pub mod resolve;
pub mod rng;
pub mod snapshot;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use engine::{EngineConfig, EngineState, GridEngine};
pub use grid::Grid;
pub use layout::Layout;
pub use motion::{Animation, Motion, MotionView};
pub use resolve::{can_move, resolve, resolve_into, Resolution};
pub use rng::SimpleRng;
pub use snapshot::GameSnapshot;
