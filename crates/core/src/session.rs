//! Level session - one play-through of a single level
//!
//! A session owns the puzzle grid, the countdown, the move counter and the
//! current selection. It is driven by three inputs, all serialised by the
//! host: [`LevelSession::tick`] with the elapsed time, [`LevelSession::tap_tile`]
//! with a grid position, and [`LevelSession::pause`]/[`LevelSession::resume`].
//!
//! ```text
//! Loading --start--> Playing --match--> LevelComplete
//!                    |  ^  \--timeout--> Failed
//!              pause |  | resume
//!                    v  |
//!                   Paused
//! ```
//!
//! Calls made in the wrong state are ignored and report that nothing happened.

use tracing::{debug, info, warn};

use crate::catalog::{get_config, LevelConfig};
use crate::error::ConfigurationError;
use crate::event::EngineEvent;
use crate::grid::{are_adjacent, PuzzleGrid};
use crate::pattern::generate;
use crate::rng::SimpleRng;
use crate::scoring::{score, ScoreResult};
use crate::snapshot::GameSnapshot;
use crate::types::{ProgressionState, SessionState, SwapMove, TilePosition};

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Result of a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Wrong state or out-of-bounds position.
    Ignored,
    /// The tapped cell is now selected (replacing any previous selection).
    Selected(TilePosition),
    /// The selected cell was tapped again.
    Deselected,
    /// Two adjacent cells were exchanged.
    Swapped { a: TilePosition, b: TilePosition },
    /// The swap completed the pattern.
    Completed(ScoreResult),
}

impl TapOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, TapOutcome::Ignored)
    }
}

/// Level countdown, kept in whole microseconds so ticks that sum to the limit
/// reach zero exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Countdown {
    limit_us: u64,
    remaining_us: u64,
    running: bool,
}

impl Countdown {
    fn start(limit_seconds: u32) -> Self {
        let limit_us = limit_seconds as u64 * 1_000_000;
        Self {
            limit_us,
            remaining_us: limit_us,
            running: true,
        }
    }

    /// Advance by `dt` seconds. Returns true when the countdown hits zero.
    fn advance(&mut self, dt: f64) -> bool {
        if !self.running {
            return false;
        }
        let elapsed_us = (dt * MICROS_PER_SECOND).round() as u64;
        self.remaining_us = self.remaining_us.saturating_sub(elapsed_us);
        if self.remaining_us == 0 {
            self.running = false;
            return true;
        }
        false
    }

    fn remaining(&self) -> f64 {
        self.remaining_us as f64 / MICROS_PER_SECOND
    }

    fn limit(&self) -> f64 {
        self.limit_us as f64 / MICROS_PER_SECOND
    }
}

/// One play-through of a level.
#[derive(Debug, Clone)]
pub struct LevelSession {
    rng: SimpleRng,
    seed: u32,
    state: SessionState,
    config: Option<LevelConfig>,
    puzzle: Option<PuzzleGrid>,
    countdown: Countdown,
    moves: u32,
    selection: Option<TilePosition>,
    /// Swaps that scrambled the target into the starting grid.
    scramble_log: Vec<SwapMove>,
    result: Option<ScoreResult>,
    /// Pending notifications, oldest first.
    events: Vec<EngineEvent>,
}

impl LevelSession {
    /// Create an idle session. `seed` drives every scramble it produces.
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
            state: SessionState::Loading,
            config: None,
            puzzle: None,
            countdown: Countdown::default(),
            moves: 0,
            selection: None,
            scramble_log: Vec::new(),
            result: None,
            events: Vec::new(),
        }
    }

    /// Start (or restart) the catalog level `level`.
    pub fn start(&mut self, level: u32) -> Result<(), ConfigurationError> {
        self.start_with_config(get_config(level))
    }

    /// Start a level from an explicit configuration.
    ///
    /// On a configuration error the session moves to `Failed`, emits nothing
    /// and keeps no grid.
    pub fn start_with_config(&mut self, config: LevelConfig) -> Result<(), ConfigurationError> {
        self.reset();

        if let Err(err) = config.validate() {
            warn!(level = config.level, error = %err, "Rejected level configuration");
            self.state = SessionState::Failed;
            return Err(err);
        }

        let target = generate(config.pattern, config.grid_size, config.tile_types);
        let mut puzzle = PuzzleGrid::new(target, config.tile_types);
        let mut level_rng = self.rng.fork(config.level);
        self.scramble_log =
            puzzle.shuffle_toward_playability(&mut level_rng, config.shuffle_complexity);

        debug!(
            level = config.level,
            pattern = config.pattern.as_str(),
            scramble = self.scramble_log.len(),
            mismatched = puzzle.mismatch_count(),
            "Level started"
        );

        self.puzzle = Some(puzzle);
        self.countdown = Countdown::start(config.time_limit_seconds);
        self.config = Some(config);
        self.state = SessionState::Playing;
        self.events.push(EngineEvent::LevelStarted {
            level: config.level,
            grid_size: config.grid_size,
            tile_types: config.tile_types,
            time_limit: config.time_limit(),
        });
        Ok(())
    }

    /// Drop the current level and return to `Loading`. Queued events are kept.
    pub fn abandon(&mut self) {
        if self.state != SessionState::Loading {
            debug!(level = self.level(), "Level abandoned");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.state = SessionState::Loading;
        self.config = None;
        self.puzzle = None;
        self.countdown = Countdown::default();
        self.moves = 0;
        self.selection = None;
        self.scramble_log.clear();
        self.result = None;
    }

    /// Advance the countdown by `dt` seconds.
    ///
    /// Only counts down while `Playing`; non-positive or non-finite `dt` is
    /// ignored. Returns true if the countdown moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.state != SessionState::Playing || !dt.is_finite() || dt <= 0.0 {
            return false;
        }

        if self.countdown.advance(dt) {
            self.state = SessionState::Failed;
            self.selection = None;
            let level = self.level();
            info!(level, moves = self.moves, "Level failed: time expired");
            self.events.push(EngineEvent::LevelFailed {
                level,
                time_remaining: self.countdown.remaining(),
            });
        }
        true
    }

    /// Apply the tap protocol at `pos`.
    pub fn tap_tile(&mut self, pos: TilePosition) -> TapOutcome {
        if self.state != SessionState::Playing {
            return TapOutcome::Ignored;
        }
        let Some(puzzle) = self.puzzle.as_mut() else {
            return TapOutcome::Ignored;
        };
        if !pos.in_bounds(puzzle.size()) {
            return TapOutcome::Ignored;
        }

        let selected = match self.selection {
            None => {
                self.selection = Some(pos);
                return TapOutcome::Selected(pos);
            }
            Some(selected) if selected == pos => {
                self.selection = None;
                return TapOutcome::Deselected;
            }
            Some(selected) if !are_adjacent(selected, pos) => {
                self.selection = Some(pos);
                return TapOutcome::Selected(pos);
            }
            Some(selected) => selected,
        };

        if puzzle.swap(selected, pos).is_err() {
            return TapOutcome::Ignored;
        }
        let solved = puzzle.matches_target();

        self.moves += 1;
        self.selection = None;
        self.events.push(EngineEvent::TileSwapped {
            a: selected,
            b: pos,
            moves: self.moves,
        });

        if solved {
            return TapOutcome::Completed(self.complete());
        }
        TapOutcome::Swapped {
            a: selected,
            b: pos,
        }
    }

    fn complete(&mut self) -> ScoreResult {
        self.countdown.running = false;
        let move_target = self.config.map(|c| c.move_target).unwrap_or(0);
        let time_remaining = self.countdown.remaining();
        let result = score(
            time_remaining,
            self.countdown.limit(),
            self.moves,
            move_target,
        );

        self.result = Some(result);
        self.state = SessionState::LevelComplete;
        let level = self.level();
        info!(
            level,
            moves = self.moves,
            time_remaining,
            stars = result.stars,
            points = result.points,
            "Level complete"
        );
        self.events.push(EngineEvent::LevelCompleted {
            level,
            time_remaining,
            stars: result.stars,
            points: result.points,
            moves: self.moves,
        });
        result
    }

    /// Stop the countdown. Only valid while `Playing`.
    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.countdown.running = false;
        self.state = SessionState::Paused;
        debug!(level = self.level(), "Paused");
        true
    }

    /// Restart the countdown. Only valid while `Paused`.
    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.countdown.running = true;
        self.state = SessionState::Playing;
        debug!(level = self.level(), "Resumed");
        true
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> Option<&LevelConfig> {
        self.config.as_ref()
    }

    /// Level number of the active configuration, 0 when idle.
    pub fn level(&self) -> u32 {
        self.config.map(|c| c.level).unwrap_or(0)
    }

    pub fn puzzle(&self) -> Option<&PuzzleGrid> {
        self.puzzle.as_ref()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn selection(&self) -> Option<TilePosition> {
        self.selection
    }

    pub fn time_remaining(&self) -> f64 {
        self.countdown.remaining()
    }

    pub fn time_limit(&self) -> f64 {
        self.countdown.limit()
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.running
    }

    /// Score of the completed level.
    pub fn result(&self) -> Option<ScoreResult> {
        self.result
    }

    pub fn scramble_log(&self) -> &[SwapMove] {
        &self.scramble_log
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, EngineEvent> {
        self.events.drain(..)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Write the session-owned fields of a render snapshot.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.session_state = Some(self.state);
        out.level = self.level();
        out.moves = self.moves;
        out.selection = self.selection;
        out.time_remaining = self.countdown.remaining();
        out.time_limit = self.countdown.limit();
        out.last_result = self.result;

        match (&self.puzzle, &self.config) {
            (Some(puzzle), Some(config)) => {
                out.grid_size = puzzle.size();
                out.tile_types = puzzle.tile_types();
                out.pattern = Some(config.pattern);
                out.move_target = config.move_target;
                puzzle.current().write_u8_grid(&mut out.current);
                puzzle.target().write_u8_grid(&mut out.target);
            }
            _ => {
                out.grid_size = 0;
                out.tile_types = 0;
                out.pattern = None;
                out.move_target = 0;
                out.current = Default::default();
                out.target = Default::default();
            }
        }
    }

    /// Stand-alone snapshot; the top-level state mirrors the session state.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s.state = match self.state {
            SessionState::Loading => ProgressionState::Menu,
            SessionState::Playing => ProgressionState::Playing,
            SessionState::Paused => ProgressionState::Paused,
            SessionState::LevelComplete => ProgressionState::LevelComplete,
            SessionState::Failed => ProgressionState::GameOver,
        };
        s
    }
}

impl Default for LevelSession {
    fn default() -> Self {
        Self::new(1)
    }
}
