//! Error types for the puzzle engine.
//!
//! Only configuration problems are fatal. Invalid swaps are reported by
//! [`PuzzleGrid::swap`](crate::grid::PuzzleGrid::swap) and absorbed by the tap
//! protocol; wrong-state calls are silent no-ops.

use derive_more::{Display, Error, From};

use crate::types::TilePosition;

/// A level configuration the engine cannot play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConfigurationError {
    #[display("level {level}: grid size {size} is outside 3..=5")]
    GridSize { level: u32, size: u8 },
    #[display("level {level}: {tile_types} tile types is outside 3..=7")]
    TileTypes { level: u32, tile_types: u8 },
    #[display("level {level}: time limit must be positive")]
    TimeLimit { level: u32 },
    #[display("level {level}: shuffle complexity must be positive")]
    ShuffleComplexity { level: u32 },
}

/// Rejected swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SwapError {
    #[display("cannot swap {at} with itself")]
    SameCell { at: TilePosition },
    #[display("{at} is outside the grid")]
    OutOfBounds { at: TilePosition },
    #[display("{a} and {b} are not adjacent")]
    NotAdjacent { a: TilePosition, b: TilePosition },
}

/// Rejected campaign request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum ProgressionError {
    #[display("level {level} is locked")]
    LevelLocked { level: u32 },
    #[display("{_0}")]
    #[from]
    Configuration(ConfigurationError),
}
