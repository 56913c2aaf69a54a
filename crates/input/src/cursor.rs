//! Keyboard cursor over the puzzle grid.

use crate::types::{Direction, TilePosition};

/// Grid cursor. Moves stop at the edges instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pos: TilePosition,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> TilePosition {
        self.pos
    }

    /// Move one cell inside a `size` x `size` grid. Returns false at an edge.
    pub fn step(&mut self, dir: Direction, size: u8) -> bool {
        self.clamp(size);
        let TilePosition { row, col } = self.pos;
        let last = size.saturating_sub(1);
        let next = match dir {
            Direction::Up if row > 0 => TilePosition::new(row - 1, col),
            Direction::Down if row < last => TilePosition::new(row + 1, col),
            Direction::Left if col > 0 => TilePosition::new(row, col - 1),
            Direction::Right if col < last => TilePosition::new(row, col + 1),
            _ => return false,
        };
        self.pos = next;
        true
    }

    /// Pull the cursor back inside a grid that shrank.
    pub fn clamp(&mut self, size: u8) {
        let last = size.saturating_sub(1);
        self.pos = TilePosition::new(self.pos.row.min(last), self.pos.col.min(last));
    }

    /// Centre of a `size` grid.
    pub fn center(&mut self, size: u8) {
        self.pos = TilePosition::new(size / 2, size / 2);
    }
}
