use crate::scoring::ScoreResult;
use crate::types::{
    PatternId, ProgressionState, SessionState, TilePosition, FREE_LEVELS, MAX_GRID_SIZE,
};

pub type CellGrid = [[u8; MAX_GRID_SIZE as usize]; MAX_GRID_SIZE as usize];

/// Plain-data view of the game for renderers.
///
/// Grids are written into fixed 5x5 arrays; only the top-left
/// `grid_size x grid_size` cells are meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub state: ProgressionState,
    /// `None` when no session exists (menu).
    pub session_state: Option<SessionState>,
    pub level: u32,
    pub grid_size: u8,
    pub tile_types: u8,
    pub pattern: Option<PatternId>,
    pub current: CellGrid,
    pub target: CellGrid,
    pub selection: Option<TilePosition>,
    pub moves: u32,
    pub move_target: u32,
    pub time_remaining: f64,
    pub time_limit: f64,
    pub last_result: Option<ScoreResult>,
    pub total_score: u64,
    pub total_stars: u32,
    pub highest_unlocked_level: u32,
    /// Level offered by the unlock prompt.
    pub pending_unlock: Option<u32>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.state == ProgressionState::Playing && self.grid_size > 0
    }

    pub fn has_grid(&self) -> bool {
        self.grid_size > 0
    }

    /// Tile at `pos` of the current grid, `None` outside the live area.
    pub fn current_at(&self, pos: TilePosition) -> Option<u8> {
        pos.in_bounds(self.grid_size)
            .then(|| self.current[pos.row as usize][pos.col as usize])
    }

    pub fn target_at(&self, pos: TilePosition) -> Option<u8> {
        pos.in_bounds(self.grid_size)
            .then(|| self.target[pos.row as usize][pos.col as usize])
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            state: ProgressionState::Menu,
            session_state: None,
            level: 0,
            grid_size: 0,
            tile_types: 0,
            pattern: None,
            current: [[0; MAX_GRID_SIZE as usize]; MAX_GRID_SIZE as usize],
            target: [[0; MAX_GRID_SIZE as usize]; MAX_GRID_SIZE as usize],
            selection: None,
            moves: 0,
            move_target: 0,
            time_remaining: 0.0,
            time_limit: 0.0,
            last_result: None,
            total_score: 0,
            total_stars: 0,
            highest_unlocked_level: FREE_LEVELS,
            pending_unlock: None,
        }
    }
}
