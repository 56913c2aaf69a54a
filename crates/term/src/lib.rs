//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! and layout frameworks and renders into a plain framebuffer that is
//! diff-flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render straight from a [`core::GameSnapshot`]
//! - Control the tile aspect ratio (4 columns by 2 rows per tile by default)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tile_swap_core as core;
pub use tile_swap_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
