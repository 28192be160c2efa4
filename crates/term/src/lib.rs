//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the board is drawn into a plain
//! framebuffer, then flushed to the terminal as a diff against the previous
//! frame. No widget toolkit is involved.
//!
//! - [`GameView`] turns a [`core::GameSnapshot`] into a [`FrameBuffer`] (pure)
//! - [`TerminalRenderer`] owns the terminal and writes changed cell runs
//! - [`RenderThrottle`] skips frames that would draw the same picture

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_color, text_color, AnchorY, GameView, Viewport};
pub use render_throttle::{frame_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
