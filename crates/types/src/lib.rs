//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, persistence adapters).
//!
//! # Grid Dimensions
//!
//! Puzzles are square grids between 3x3 and 5x5 cells. Every cell holds a
//! tile-type index in `0..tile_types`, with at most [`MAX_TILE_TYPES`] types.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_COMPLETION_POINTS` | 100 | Awarded for every completed level |
//! | `TIME_BONUS_PER_SECOND` | 10 | Points per remaining second |
//! | `MOVE_BONUS_PER_MOVE` | 5 | Points per move under the move target |
//! | `THREE_STAR_TENTHS` | 7 | 3 stars above 7/10 of the time limit |
//! | `TWO_STAR_TENTHS` | 4 | 2 stars above 4/10 of the time limit |
//!
//! # Campaign
//!
//! The campaign has [`CAMPAIGN_LEVELS`] levels. The first [`FREE_LEVELS`] are
//! always playable; later levels must be unlocked the first time they are reached.
//!
//! # Examples
//!
//! ```
//! use tile_swap_types::{GameAction, PatternId, TilePosition};
//!
//! let a = TilePosition::new(1, 1);
//! let b = TilePosition::new(1, 2);
//! assert_eq!(a.manhattan(b), 1);
//!
//! // Unknown pattern names fall back to the checkerboard.
//! assert_eq!(PatternId::from_name("spiral"), PatternId::Spiral);
//! assert_eq!(PatternId::from_name("zigzag"), PatternId::Checkerboard);
//!
//! assert_eq!(GameAction::from_str("tap"), Some(GameAction::Tap));
//! ```

/// Smallest supported grid edge.
pub const MIN_GRID_SIZE: u8 = 3;

/// Largest supported grid edge.
pub const MAX_GRID_SIZE: u8 = 5;

/// Cell capacity of the largest grid (5x5).
pub const MAX_CELLS: usize = (MAX_GRID_SIZE as usize) * (MAX_GRID_SIZE as usize);

/// Smallest tile-type cardinality a level may use.
pub const MIN_TILE_TYPES: u8 = 3;

/// Largest tile-type cardinality a level may use.
pub const MAX_TILE_TYPES: u8 = 7;

/// Number of levels in the campaign.
pub const CAMPAIGN_LEVELS: u32 = 10;

/// Levels playable without an unlock event.
pub const FREE_LEVELS: u32 = 3;

/// Base points for completing any level.
pub const BASE_COMPLETION_POINTS: u32 = 100;

/// Points per second left on the clock.
pub const TIME_BONUS_PER_SECOND: u32 = 10;

/// Points per move saved against the level's move target.
pub const MOVE_BONUS_PER_MOVE: u32 = 5;

/// Three stars when more than 7/10 of the time limit remains.
pub const THREE_STAR_TENTHS: u32 = 7;

/// Two stars when more than 4/10 of the time limit remains.
pub const TWO_STAR_TENTHS: u32 = 4;

/// Default frame interval for the terminal loop in milliseconds.
pub const TICK_MS: u32 = 100;

/// Position of a cell on the grid.
///
/// `row` grows downwards, `col` grows to the right. Equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TilePosition {
    pub row: u8,
    pub col: u8,
}

impl TilePosition {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(self, other: TilePosition) -> u32 {
        (self.row.abs_diff(other.row) as u32) + (self.col.abs_diff(other.col) as u32)
    }

    /// Whether the position lies inside a `size` x `size` grid.
    pub fn in_bounds(self, size: u8) -> bool {
        self.row < size && self.col < size
    }

    /// Flat row-major index for a grid of edge `size`.
    pub fn index(self, size: u8) -> usize {
        (self.row as usize) * (size as usize) + (self.col as usize)
    }
}

impl std::fmt::Display for TilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One swap of two adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    pub a: TilePosition,
    pub b: TilePosition,
}

impl SwapMove {
    pub const fn new(a: TilePosition, b: TilePosition) -> Self {
        Self { a, b }
    }
}

/// Target pattern families, ordered roughly by visual complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternId {
    Checkerboard,
    Stripes,
    Corners,
    Diagonal,
    DiagonalStripes,
    Cross,
    Spiral,
    Diamond,
    ComplexMandala,
}

impl PatternId {
    /// Every pattern, in campaign order.
    pub const ALL: [PatternId; 9] = [
        PatternId::Checkerboard,
        PatternId::Stripes,
        PatternId::Corners,
        PatternId::Diagonal,
        PatternId::DiagonalStripes,
        PatternId::Cross,
        PatternId::Spiral,
        PatternId::Diamond,
        PatternId::ComplexMandala,
    ];

    /// Parse a pattern name (case-insensitive, `-` or `_` separators).
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_swap_types::PatternId;
    ///
    /// assert_eq!(PatternId::from_str("diagonal-stripes"), Some(PatternId::DiagonalStripes));
    /// assert_eq!(PatternId::from_str("COMPLEX_MANDALA"), Some(PatternId::ComplexMandala));
    /// assert_eq!(PatternId::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "checkerboard" => Some(PatternId::Checkerboard),
            "stripes" => Some(PatternId::Stripes),
            "corners" => Some(PatternId::Corners),
            "diagonal" => Some(PatternId::Diagonal),
            "diagonal-stripes" => Some(PatternId::DiagonalStripes),
            "cross" => Some(PatternId::Cross),
            "spiral" => Some(PatternId::Spiral),
            "diamond" => Some(PatternId::Diamond),
            "complex-mandala" => Some(PatternId::ComplexMandala),
            _ => None,
        }
    }

    /// Parse a pattern name, falling back to [`PatternId::Checkerboard`].
    pub fn from_name(s: &str) -> Self {
        Self::from_str(s).unwrap_or(PatternId::Checkerboard)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternId::Checkerboard => "checkerboard",
            PatternId::Stripes => "stripes",
            PatternId::Corners => "corners",
            PatternId::Diagonal => "diagonal",
            PatternId::DiagonalStripes => "diagonal-stripes",
            PatternId::Cross => "cross",
            PatternId::Spiral => "spiral",
            PatternId::Diamond => "diamond",
            PatternId::ComplexMandala => "complex-mandala",
        }
    }
}

/// Lifecycle of a single level play-through.
///
/// `Loading` is the initial state; `LevelComplete` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Loading,
    Playing,
    Paused,
    LevelComplete,
    Failed,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::LevelComplete | SessionState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Loading => "loading",
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::LevelComplete => "levelComplete",
            SessionState::Failed => "failed",
        }
    }
}

/// Top-level campaign state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressionState {
    Menu,
    Playing,
    Paused,
    GameOver,
    LevelComplete,
    UnlockPrompt,
}

impl ProgressionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressionState::Menu => "menu",
            ProgressionState::Playing => "playing",
            ProgressionState::Paused => "paused",
            ProgressionState::GameOver => "gameOver",
            ProgressionState::LevelComplete => "levelComplete",
            ProgressionState::UnlockPrompt => "unlockPrompt",
        }
    }
}

/// Campaign progress that survives level transitions.
///
/// Persisting it is the job of an external store; the controller only mutates it
/// at level boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerProgress {
    pub current_level: u32,
    pub total_score: u64,
    pub total_stars: u32,
    pub highest_unlocked_level: u32,
}

impl PlayerProgress {
    /// Clamp values that a stale or hand-edited save could carry.
    ///
    /// The current level never lies past the highest unlocked one, so the
    /// saved campaign can always be continued.
    pub fn normalized(self) -> Self {
        let highest_unlocked_level = self
            .highest_unlocked_level
            .clamp(FREE_LEVELS, CAMPAIGN_LEVELS);
        Self {
            current_level: self.current_level.clamp(1, highest_unlocked_level),
            highest_unlocked_level,
            ..self
        }
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level <= FREE_LEVELS || level <= self.highest_unlocked_level
    }
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            current_level: 1,
            total_score: 0,
            total_stars: 0,
            highest_unlocked_level: FREE_LEVELS,
        }
    }
}

/// Grid cursor direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Player intents produced by the input layer.
///
/// Cursor moves and taps drive the grid; the rest map onto controller
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor one cell
    Cursor(Direction),
    /// Tap the cell under the cursor
    Tap,
    /// Toggle pause
    Pause,
    /// Restart the current level
    Restart,
    /// Start the campaign from the menu, or continue after a completed level
    Confirm,
    /// Accept the unlock offer
    Unlock,
    /// Decline the unlock offer / leave to the menu
    Back,
    /// Apply the next hinted swap
    Hint,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_swap_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::Cursor(Direction::Left)));
    /// assert_eq!(GameAction::from_str("unlock"), Some(GameAction::Unlock));
    /// assert_eq!(GameAction::from_str("fly"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::Cursor(Direction::Up)),
            "cursordown" => Some(GameAction::Cursor(Direction::Down)),
            "cursorleft" => Some(GameAction::Cursor(Direction::Left)),
            "cursorright" => Some(GameAction::Cursor(Direction::Right)),
            "tap" => Some(GameAction::Tap),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "confirm" => Some(GameAction::Confirm),
            "unlock" => Some(GameAction::Unlock),
            "back" => Some(GameAction::Back),
            "hint" => Some(GameAction::Hint),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Cursor(Direction::Up) => "cursorUp",
            GameAction::Cursor(Direction::Down) => "cursorDown",
            GameAction::Cursor(Direction::Left) => "cursorLeft",
            GameAction::Cursor(Direction::Right) => "cursorRight",
            GameAction::Tap => "tap",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::Confirm => "confirm",
            GameAction::Unlock => "unlock",
            GameAction::Back => "back",
            GameAction::Hint => "hint",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_names_round_trip_for_every_variant() {
        for pattern in PatternId::ALL {
            assert_eq!(PatternId::from_str(pattern.as_str()), Some(pattern));
        }
    }

    #[test]
    fn manhattan_ignores_direction() {
        let a = TilePosition::new(0, 2);
        let b = TilePosition::new(2, 0);
        assert_eq!(a.manhattan(b), 4);
        assert_eq!(b.manhattan(a), 4);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn in_bounds_and_index() {
        let p = TilePosition::new(2, 1);
        assert!(p.in_bounds(3));
        assert!(!p.in_bounds(2));
        assert_eq!(p.index(3), 7);
        assert_eq!(p.index(5), 11);
    }

    #[test]
    fn default_progress_unlocks_free_levels_only() {
        let progress = PlayerProgress::default();
        assert!(progress.is_unlocked(1));
        assert!(progress.is_unlocked(FREE_LEVELS));
        assert!(!progress.is_unlocked(FREE_LEVELS + 1));
    }

    #[test]
    fn normalized_repairs_out_of_range_progress() {
        let stale = PlayerProgress {
            current_level: 0,
            total_score: 10,
            total_stars: 2,
            highest_unlocked_level: 1,
        };
        let fixed = stale.normalized();
        assert_eq!(fixed.current_level, 1);
        assert_eq!(fixed.highest_unlocked_level, FREE_LEVELS);
        assert_eq!(fixed.total_score, 10);

        let beyond = PlayerProgress {
            current_level: 42,
            highest_unlocked_level: 99,
            ..PlayerProgress::default()
        };
        let fixed = beyond.normalized();
        assert_eq!(fixed.current_level, CAMPAIGN_LEVELS);
        assert_eq!(fixed.highest_unlocked_level, CAMPAIGN_LEVELS);

        let ahead_of_unlocks = PlayerProgress {
            current_level: 7,
            highest_unlocked_level: 3,
            ..PlayerProgress::default()
        };
        let fixed = ahead_of_unlocks.normalized();
        assert_eq!(fixed.current_level, 3);
        assert!(fixed.is_unlocked(fixed.current_level));
    }

    #[test]
    fn action_names_round_trip() {
        for action in [
            GameAction::Cursor(Direction::Up),
            GameAction::Cursor(Direction::Down),
            GameAction::Cursor(Direction::Left),
            GameAction::Cursor(Direction::Right),
            GameAction::Tap,
            GameAction::Pause,
            GameAction::Restart,
            GameAction::Confirm,
            GameAction::Unlock,
            GameAction::Back,
            GameAction::Hint,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}
