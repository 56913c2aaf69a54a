use derive_more::{Display, Error};
use tracing::debug;

use crate::core::{Grid, LevelSession, ProgressionController, PuzzleGrid, TapOutcome};
use crate::types::{ProgressionState, SessionState, SwapMove, TilePosition};

/// Why a solver request did not drive the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DriveError {
    #[display("no level is being played")]
    NotPlayable,
    #[display("tile counts differ from the target")]
    Unsolvable,
    #[display("swap was not applied")]
    SwapRejected,
}

impl DriveError {
    pub fn code(self) -> &'static str {
        match self {
            DriveError::NotPlayable => "not_playable",
            DriveError::Unsolvable => "unsolvable",
            DriveError::SwapRejected => "invalid_swap",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            DriveError::NotPlayable => "no level is being played",
            DriveError::Unsolvable => "tile counts differ from the target",
            DriveError::SwapRejected => "swap was not applied",
        }
    }
}

/// Anything that exposes a playable puzzle and accepts taps.
pub trait PuzzleDriver {
    fn puzzle(&self) -> Option<&PuzzleGrid>;
    fn selection(&self) -> Option<TilePosition>;
    fn playing(&self) -> bool;
    fn tap_tile(&mut self, pos: TilePosition) -> TapOutcome;
}

impl PuzzleDriver for LevelSession {
    fn puzzle(&self) -> Option<&PuzzleGrid> {
        LevelSession::puzzle(self)
    }

    fn selection(&self) -> Option<TilePosition> {
        LevelSession::selection(self)
    }

    fn playing(&self) -> bool {
        self.state() == SessionState::Playing
    }

    fn tap_tile(&mut self, pos: TilePosition) -> TapOutcome {
        LevelSession::tap_tile(self, pos)
    }
}

impl PuzzleDriver for ProgressionController {
    fn puzzle(&self) -> Option<&PuzzleGrid> {
        self.session().puzzle()
    }

    fn selection(&self) -> Option<TilePosition> {
        self.session().selection()
    }

    fn playing(&self) -> bool {
        self.state() == ProgressionState::Playing
    }

    fn tap_tile(&mut self, pos: TilePosition) -> TapOutcome {
        ProgressionController::tap_tile(self, pos)
    }
}

/// Adjacent transpositions reach every arrangement of a connected grid, so a
/// puzzle is solvable exactly when both grids hold the same tiles.
pub fn is_solvable(puzzle: &PuzzleGrid) -> bool {
    puzzle.current().size() == puzzle.target().size()
        && puzzle.current().tile_counts() == puzzle.target().tile_counts()
}

/// Swap sequence that turns `current` into `target`.
///
/// Cells are fixed in row-major order. For each cell the nearest matching tile
/// among the unfixed cells is walked along its row to the target column, then
/// up that column. Both legs only cross unfixed cells, so fixed cells stay put.
pub fn plan_solution(puzzle: &PuzzleGrid) -> Option<Vec<SwapMove>> {
    if !is_solvable(puzzle) {
        return None;
    }

    let target = puzzle.target();
    let mut grid = *puzzle.current();
    let size = grid.size();
    let mut plan = Vec::new();

    for (k, dest) in target.positions().enumerate() {
        let want = target.get(dest)?;
        if grid.get(dest)? == want {
            continue;
        }

        let src = grid
            .positions()
            .skip(k + 1)
            .filter(|&p| grid.get(p) == Some(want))
            .min_by_key(|&p| p.manhattan(dest))?;

        let mut at = src;
        while at.col != dest.col {
            let next = if at.col > dest.col {
                TilePosition::new(at.row, at.col - 1)
            } else {
                TilePosition::new(at.row, at.col + 1)
            };
            swap_in(&mut grid, &mut plan, at, next);
            at = next;
        }
        while at.row > dest.row {
            let next = TilePosition::new(at.row - 1, at.col);
            swap_in(&mut grid, &mut plan, at, next);
            at = next;
        }
    }

    debug!(size, swaps = plan.len(), "Planned solution");
    Some(plan)
}

fn swap_in(grid: &mut Grid, plan: &mut Vec<SwapMove>, a: TilePosition, b: TilePosition) {
    let (Some(va), Some(vb)) = (grid.get(a), grid.get(b)) else {
        return;
    };
    grid.set(a, vb);
    grid.set(b, va);
    plan.push(SwapMove::new(a, b));
}

/// Next swap toward the target, if the driver is playing.
pub fn hint<D: PuzzleDriver>(driver: &D) -> Option<SwapMove> {
    if !driver.playing() {
        return None;
    }
    plan_solution(driver.puzzle()?)?.first().copied()
}

/// Perform one swap through the tap protocol, clearing a stray selection first.
pub fn apply_swap<D: PuzzleDriver>(driver: &mut D, mv: SwapMove) -> Result<TapOutcome, DriveError> {
    if !driver.playing() {
        return Err(DriveError::NotPlayable);
    }

    let outcome = match driver.selection() {
        Some(s) if s == mv.a => driver.tap_tile(mv.b),
        Some(s) if s == mv.b => driver.tap_tile(mv.a),
        selected => {
            if let Some(s) = selected {
                driver.tap_tile(s);
            }
            driver.tap_tile(mv.a);
            driver.tap_tile(mv.b)
        }
    };

    match outcome {
        TapOutcome::Swapped { .. } | TapOutcome::Completed(_) => Ok(outcome),
        _ => Err(DriveError::SwapRejected),
    }
}

/// Play a swap plan, stopping early if the level completes.
pub fn apply_plan<D: PuzzleDriver>(
    driver: &mut D,
    plan: &[SwapMove],
) -> Result<TapOutcome, DriveError> {
    let mut last = TapOutcome::Ignored;
    for &mv in plan {
        last = apply_swap(driver, mv)?;
        if matches!(last, TapOutcome::Completed(_)) {
            break;
        }
    }
    Ok(last)
}

/// Apply the hinted swap.
pub fn apply_hint<D: PuzzleDriver>(driver: &mut D) -> Result<TapOutcome, DriveError> {
    if !driver.playing() {
        return Err(DriveError::NotPlayable);
    }
    let mv = hint(driver).ok_or(DriveError::Unsolvable)?;
    apply_swap(driver, mv)
}

/// Solve the whole level.
pub fn autoplay<D: PuzzleDriver>(driver: &mut D) -> Result<TapOutcome, DriveError> {
    if !driver.playing() {
        return Err(DriveError::NotPlayable);
    }
    let plan = driver
        .puzzle()
        .and_then(plan_solution)
        .ok_or(DriveError::Unsolvable)?;
    apply_plan(driver, &plan)
}
