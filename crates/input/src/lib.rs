//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]s. There is no
//! auto-repeat handling: the engine ignores moves while a slide animates, so
//! held keys cannot queue moves faster than they are drawn.

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
