//! Tile Swap (workspace facade crate).
//!
//! Re-exports the workspace crates as `tile_swap::{core,adapter,term,input,engine,types}`
//! and hosts the pieces shared by the terminal binary: [`config`] and the
//! [`app`] that routes player actions to the progression controller.

pub use tile_swap_adapter as adapter;
pub use tile_swap_core as core;
pub use tile_swap_engine as engine;
pub use tile_swap_input as input;
pub use tile_swap_term as term;
pub use tile_swap_types as types;

pub mod app;
pub mod config;

pub use app::App;
pub use config::Config;
