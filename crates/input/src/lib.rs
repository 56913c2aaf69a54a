//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and keeps the keyboard cursor that
//! stands in for pointer taps on the grid.

pub mod cursor;
pub mod map;

pub use tile_swap_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_autoplay, should_quit};
