//! Grid module - tile storage and the swap puzzle
//!
//! A [`Grid`] is a square matrix of tile-type indices stored in a flat,
//! fixed-capacity array (row-major, `row * size + col`), so no grid operation
//! allocates. [`PuzzleGrid`] pairs the player's `current` grid with the
//! immutable `target` and implements the swap rules.

use arrayvec::ArrayVec;

use crate::error::SwapError;
use crate::rng::RandomSource;
use crate::types::{SwapMove, TilePosition, MAX_CELLS, MAX_GRID_SIZE, MAX_TILE_TYPES};

/// Square grid of tile-type indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    size: u8,
    /// Cells outside `size * size` always stay 0.
    cells: [u8; MAX_CELLS],
}

impl Grid {
    /// Create a grid filled with tile type 0.
    pub fn new(size: u8) -> Self {
        debug_assert!(size >= 1 && size <= MAX_GRID_SIZE);
        Self {
            size: size.clamp(1, MAX_GRID_SIZE),
            cells: [0; MAX_CELLS],
        }
    }

    /// Build a grid from a cell function evaluated at every `(row, col)`.
    pub fn from_fn(size: u8, mut f: impl FnMut(u8, u8) -> u8) -> Self {
        let mut grid = Self::new(size);
        for row in 0..grid.size {
            for col in 0..grid.size {
                let idx = TilePosition::new(row, col).index(grid.size);
                grid.cells[idx] = f(row, col);
            }
        }
        grid
    }

    /// Build a grid from row slices. Returns `None` unless the rows form a square
    /// of a supported size.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_GRID_SIZE as usize || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self::from_fn(size as u8, |r, c| rows[r as usize][c as usize]))
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Get the tile at `pos`; `None` if out of bounds.
    pub fn get(&self, pos: TilePosition) -> Option<u8> {
        pos.in_bounds(self.size)
            .then(|| self.cells[pos.index(self.size)])
    }

    /// Set the tile at `pos`. Returns false if out of bounds.
    pub fn set(&mut self, pos: TilePosition, tile: u8) -> bool {
        if !pos.in_bounds(self.size) {
            return false;
        }
        self.cells[pos.index(self.size)] = tile;
        true
    }

    /// Row-major view of the live cells.
    pub fn cells(&self) -> &[u8] {
        let len = (self.size as usize) * (self.size as usize);
        &self.cells[..len]
    }

    /// One row of the grid.
    pub fn row(&self, row: u8) -> &[u8] {
        let n = self.size as usize;
        let start = (row.min(self.size - 1) as usize) * n;
        &self.cells[start..start + n]
    }

    /// Every position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = TilePosition> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| TilePosition::new(row, col)))
    }

    /// In-bounds orthogonal neighbours of `pos` (up, down, left, right order).
    pub fn neighbors(&self, pos: TilePosition) -> ArrayVec<TilePosition, 4> {
        let mut out = ArrayVec::new();
        if !pos.in_bounds(self.size) {
            return out;
        }
        if pos.row > 0 {
            out.push(TilePosition::new(pos.row - 1, pos.col));
        }
        if pos.row + 1 < self.size {
            out.push(TilePosition::new(pos.row + 1, pos.col));
        }
        if pos.col > 0 {
            out.push(TilePosition::new(pos.row, pos.col - 1));
        }
        if pos.col + 1 < self.size {
            out.push(TilePosition::new(pos.row, pos.col + 1));
        }
        out
    }

    /// Count of each tile type, indexed by type.
    pub fn tile_counts(&self) -> [u8; MAX_TILE_TYPES as usize] {
        let mut counts = [0u8; MAX_TILE_TYPES as usize];
        for &tile in self.cells() {
            if let Some(slot) = counts.get_mut(tile as usize) {
                *slot += 1;
            }
        }
        counts
    }

    /// Write into a fixed 5x5 matrix, zero-filling unused cells.
    pub fn write_u8_grid(&self, out: &mut [[u8; MAX_GRID_SIZE as usize]; MAX_GRID_SIZE as usize]) {
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self
                    .get(TilePosition::new(r as u8, c as u8))
                    .unwrap_or(0);
            }
        }
    }

    fn swap_cells(&mut self, a: TilePosition, b: TilePosition) {
        let ia = a.index(self.size);
        let ib = b.index(self.size);
        self.cells.swap(ia, ib);
    }
}

/// Manhattan distance exactly 1; diagonal neighbours are not adjacent.
pub fn are_adjacent(a: TilePosition, b: TilePosition) -> bool {
    a.manhattan(b) == 1
}

/// The player's grid together with the pattern it must reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleGrid {
    current: Grid,
    target: Grid,
    tile_types: u8,
}

impl PuzzleGrid {
    /// Start with `current` equal to `target`.
    pub fn new(target: Grid, tile_types: u8) -> Self {
        Self {
            current: target,
            target,
            tile_types: tile_types.clamp(1, MAX_TILE_TYPES),
        }
    }

    /// Pair an explicit starting grid with a target of the same size.
    pub fn with_current(current: Grid, target: Grid, tile_types: u8) -> Option<Self> {
        if current.size() != target.size() {
            return None;
        }
        Some(Self {
            current,
            target,
            tile_types: tile_types.clamp(1, MAX_TILE_TYPES),
        })
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn target(&self) -> &Grid {
        &self.target
    }

    pub fn size(&self) -> u8 {
        self.current.size()
    }

    pub fn tile_types(&self) -> u8 {
        self.tile_types
    }

    /// Replace `current` with the target (used by tests and tools).
    pub fn reset_to_target(&mut self) {
        self.current = self.target;
    }

    /// Fill `current` with uniform random tiles, ignoring the target.
    ///
    /// The result may be unsolvable: tile counts need not match the target.
    pub fn randomize(&mut self, rng: &mut impl RandomSource) {
        let tile_types = self.tile_types as u32;
        let size = self.current.size();
        self.current = Grid::from_fn(size, |_, _| rng.next_range(tile_types) as u8);
    }

    /// Scramble a solved grid with `complexity` random legal swaps.
    ///
    /// Each swap picks a random cell and then one of its existing neighbours, so
    /// replaying the returned log in reverse always restores the target. If the
    /// swaps leave the grid solved (equal tiles traded places), up to
    /// `complexity` more swaps are appended until it differs. A 1x1 grid has
    /// no swaps and comes back solved with an empty log.
    pub fn shuffle_toward_playability(
        &mut self,
        rng: &mut impl RandomSource,
        complexity: u32,
    ) -> Vec<SwapMove> {
        self.current = self.target;
        let mut log = Vec::with_capacity(complexity as usize);

        for _ in 0..complexity {
            let Some(mv) = self.random_adjacent_swap(rng) else {
                return log;
            };
            log.push(mv);
        }

        let mut extra = 0;
        while self.matches_target() && extra < complexity.max(1) && !self.is_uniform() {
            let Some(mv) = self.random_adjacent_swap(rng) else {
                break;
            };
            log.push(mv);
            extra += 1;
        }

        log
    }

    /// `None` when the picked cell has no neighbour (1x1 grid).
    fn random_adjacent_swap(&mut self, rng: &mut impl RandomSource) -> Option<SwapMove> {
        let size = self.current.size() as u32;
        let cell = rng.next_range(size * size);
        let a = TilePosition::new((cell / size) as u8, (cell % size) as u8);
        let neighbors = self.current.neighbors(a);
        if neighbors.is_empty() {
            return None;
        }
        let b = neighbors[rng.next_range(neighbors.len() as u32) as usize];
        self.current.swap_cells(a, b);
        Some(SwapMove::new(a, b))
    }

    fn is_uniform(&self) -> bool {
        let cells = self.target.cells();
        cells.iter().all(|&t| t == cells[0])
    }

    /// Exchange two adjacent cells of `current`.
    pub fn swap(&mut self, a: TilePosition, b: TilePosition) -> Result<(), SwapError> {
        let size = self.current.size();
        if !a.in_bounds(size) {
            return Err(SwapError::OutOfBounds { at: a });
        }
        if !b.in_bounds(size) {
            return Err(SwapError::OutOfBounds { at: b });
        }
        if a == b {
            return Err(SwapError::SameCell { at: a });
        }
        if !are_adjacent(a, b) {
            return Err(SwapError::NotAdjacent { a, b });
        }
        self.current.swap_cells(a, b);
        Ok(())
    }

    /// Cell-wise equality of `current` and `target`.
    pub fn matches_target(&self) -> bool {
        self.current.cells() == self.target.cells()
    }

    /// Number of cells that differ from the target.
    pub fn mismatch_count(&self) -> usize {
        self.current
            .cells()
            .iter()
            .zip(self.target.cells())
            .filter(|(a, b)| a != b)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::tests::ScriptedRng;
    use crate::rng::SimpleRng;

    fn p(row: u8, col: u8) -> TilePosition {
        TilePosition::new(row, col)
    }

    fn sample_target() -> Grid {
        Grid::from_rows(&[&[0, 1, 2], &[1, 2, 0], &[2, 0, 1]]).unwrap()
    }

    #[test]
    fn test_grid_index_and_bounds() {
        let mut grid = Grid::new(3);
        assert!(grid.set(p(2, 1), 4));
        assert_eq!(grid.get(p(2, 1)), Some(4));
        assert_eq!(grid.cells()[7], 4);
        assert_eq!(grid.get(p(3, 0)), None);
        assert!(!grid.set(p(0, 3), 1));
    }

    #[test]
    fn test_from_rows_requires_square() {
        assert!(Grid::from_rows(&[&[0, 1], &[1]]).is_none());
        assert!(Grid::from_rows(&[]).is_none());
        let g = Grid::from_rows(&[&[0, 1], &[1, 0]]).unwrap();
        assert_eq!(g.size(), 2);
        assert_eq!(g.row(1), &[1, 0]);
    }

    #[test]
    fn test_neighbors_at_corner_edge_and_center() {
        let grid = Grid::new(3);
        assert_eq!(grid.neighbors(p(0, 0)).len(), 2);
        assert_eq!(grid.neighbors(p(0, 1)).len(), 3);
        assert_eq!(grid.neighbors(p(1, 1)).len(), 4);
        assert!(grid.neighbors(p(5, 5)).is_empty());
        for n in grid.neighbors(p(1, 1)) {
            assert!(are_adjacent(p(1, 1), n));
        }
    }

    #[test]
    fn test_adjacency_excludes_diagonals() {
        assert!(are_adjacent(p(0, 0), p(0, 1)));
        assert!(are_adjacent(p(1, 0), p(0, 0)));
        assert!(!are_adjacent(p(0, 0), p(1, 1)));
        assert!(!are_adjacent(p(0, 0), p(0, 0)));
        assert!(!are_adjacent(p(0, 0), p(0, 2)));
    }

    #[test]
    fn test_swap_rejections_leave_grid_untouched() {
        let mut puzzle = PuzzleGrid::new(sample_target(), 3);
        let before = *puzzle.current();

        assert_eq!(
            puzzle.swap(p(1, 1), p(1, 1)),
            Err(SwapError::SameCell { at: p(1, 1) })
        );
        assert_eq!(
            puzzle.swap(p(0, 0), p(1, 1)),
            Err(SwapError::NotAdjacent {
                a: p(0, 0),
                b: p(1, 1)
            })
        );
        assert_eq!(
            puzzle.swap(p(2, 2), p(2, 3)),
            Err(SwapError::OutOfBounds { at: p(2, 3) })
        );
        assert_eq!(*puzzle.current(), before);
    }

    #[test]
    fn test_swap_twice_is_identity() {
        let mut puzzle = PuzzleGrid::new(sample_target(), 3);
        let mut rng = SimpleRng::new(3);
        puzzle.randomize(&mut rng);
        let before = *puzzle.current();

        for a in before.positions() {
            for b in before.neighbors(a) {
                puzzle.swap(a, b).unwrap();
                puzzle.swap(a, b).unwrap();
                assert_eq!(*puzzle.current(), before);
            }
        }
    }

    #[test]
    fn test_swap_exchanges_values() {
        let mut puzzle = PuzzleGrid::new(sample_target(), 3);
        puzzle.swap(p(0, 0), p(0, 1)).unwrap();
        assert_eq!(puzzle.current().get(p(0, 0)), Some(1));
        assert_eq!(puzzle.current().get(p(0, 1)), Some(0));
        assert!(!puzzle.matches_target());
        assert_eq!(puzzle.mismatch_count(), 2);
    }

    #[test]
    fn test_matches_target_after_reset() {
        let mut puzzle = PuzzleGrid::new(sample_target(), 3);
        puzzle.randomize(&mut SimpleRng::new(11));
        puzzle.reset_to_target();
        assert!(puzzle.matches_target());
        assert_eq!(puzzle.mismatch_count(), 0);
    }

    #[test]
    fn test_randomize_stays_in_tile_range() {
        let target = Grid::new(5);
        let mut puzzle = PuzzleGrid::new(target, 7);
        let mut rng = SimpleRng::new(42);
        for _ in 0..20 {
            puzzle.randomize(&mut rng);
            assert!(puzzle.current().cells().iter().all(|&t| t < 7));
        }
        assert_eq!(*puzzle.target(), target);
    }

    #[test]
    fn test_shuffle_log_replays_back_to_target() {
        for seed in 1..40 {
            let mut puzzle = PuzzleGrid::new(sample_target(), 3);
            let log = puzzle.shuffle_toward_playability(&mut SimpleRng::new(seed), 15);
            assert!(log.len() >= 15);
            for mv in log.iter().rev() {
                puzzle.swap(mv.a, mv.b).unwrap();
            }
            assert!(puzzle.matches_target(), "seed {seed}");
        }
    }

    #[test]
    fn test_reversing_swaps_restores_unsolved_grid() {
        let swaps = [
            (p(0, 0), p(0, 1)),
            (p(1, 1), p(2, 1)),
            (p(2, 2), p(2, 1)),
            (p(0, 1), p(1, 1)),
        ];
        let mut checked = 0;
        for seed in 1..20 {
            let mut puzzle = PuzzleGrid::new(sample_target(), 3);
            puzzle.randomize(&mut SimpleRng::new(seed));
            if puzzle.matches_target() {
                continue;
            }
            let before = *puzzle.current();

            for &(a, b) in &swaps {
                puzzle.swap(a, b).unwrap();
            }
            for &(a, b) in swaps.iter().rev() {
                puzzle.swap(a, b).unwrap();
            }
            assert_eq!(*puzzle.current(), before, "seed {seed}");
            assert!(!puzzle.matches_target(), "seed {seed}");
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_single_cell_grid_shuffles_to_nothing() {
        let target = Grid::from_rows(&[&[2]]).unwrap();
        let mut puzzle = PuzzleGrid::new(target, 3);
        let log = puzzle.shuffle_toward_playability(&mut SimpleRng::new(5), 10);
        assert!(log.is_empty());
        assert!(puzzle.matches_target());
    }

    #[test]
    fn test_shuffle_preserves_tile_counts() {
        let mut puzzle = PuzzleGrid::new(sample_target(), 3);
        puzzle.shuffle_toward_playability(&mut SimpleRng::new(9), 30);
        assert_eq!(puzzle.current().tile_counts(), puzzle.target().tile_counts());
    }

    #[test]
    fn test_shuffle_never_leaves_grid_solved() {
        // Draw pattern: cell 0, neighbour 0 -> swaps (0,0) with (1,0) every time.
        // Two such swaps undo each other; the extra swaps must break the tie.
        let mut scripted = ScriptedRng::new(vec![0, 0, 0, 0, 4, 1]);
        let mut puzzle = PuzzleGrid::new(sample_target(), 3);
        let log = puzzle.shuffle_toward_playability(&mut scripted, 2);
        assert!(!puzzle.matches_target());
        assert!(log.len() > 2);
    }

    #[test]
    fn test_write_u8_grid_zero_fills() {
        let grid = Grid::from_fn(3, |_, _| 2);
        let mut out = [[9u8; 5]; 5];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[0][0], 2);
        assert_eq!(out[2][2], 2);
        assert_eq!(out[0][3], 0);
        assert_eq!(out[4][4], 0);
    }
}
