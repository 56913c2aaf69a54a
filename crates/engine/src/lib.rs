//! Engine-side helpers built on the core rules.
//!
//! Solvability checks, swap plans and hints. Nothing here mutates a puzzle
//! except through the public tap protocol.

pub mod solver;

pub use tile_swap_core as core;
pub use tile_swap_types as types;

pub use solver::{
    apply_hint, apply_plan, apply_swap, autoplay, hint, is_solvable, plan_solution, DriveError,
    PuzzleDriver,
};
