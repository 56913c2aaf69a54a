//! Engine notifications, queued in emission order and drained by collaborators.

use crate::types::TilePosition;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    LevelStarted {
        level: u32,
        grid_size: u8,
        tile_types: u8,
        time_limit: f64,
    },
    TileSwapped {
        a: TilePosition,
        b: TilePosition,
        /// Move count after this swap.
        moves: u32,
    },
    LevelCompleted {
        level: u32,
        time_remaining: f64,
        stars: u8,
        points: u32,
        moves: u32,
    },
    LevelFailed {
        level: u32,
        time_remaining: f64,
    },
    UnlockPromptShown {
        level: u32,
    },
}

impl EngineEvent {
    /// Analytics event name.
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::LevelStarted { .. } => "level_start",
            EngineEvent::TileSwapped { .. } => "tile_swap",
            EngineEvent::LevelCompleted { .. } => "level_complete",
            EngineEvent::LevelFailed { .. } => "level_fail",
            EngineEvent::UnlockPromptShown { .. } => "unlock_prompt_shown",
        }
    }

    /// Whether the event is forwarded to analytics. Swaps are too chatty.
    pub fn is_analytics(&self) -> bool {
        !matches!(self, EngineEvent::TileSwapped { .. })
    }

    pub fn level(&self) -> Option<u32> {
        match *self {
            EngineEvent::LevelStarted { level, .. }
            | EngineEvent::LevelCompleted { level, .. }
            | EngineEvent::LevelFailed { level, .. }
            | EngineEvent::UnlockPromptShown { level } => Some(level),
            EngineEvent::TileSwapped { .. } => None,
        }
    }
}
