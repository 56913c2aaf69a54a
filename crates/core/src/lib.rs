//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains every game rule and state machine of the tile-swap
//! puzzle. It has **no dependencies** on rendering, input or I/O:
//!
//! - **Deterministic**: the same seed scrambles every level identically
//! - **Testable**: sessions are driven by plain `tick`/`tap_tile` calls
//! - **Allocation-light**: grids live in fixed 5x5 arrays
//!
//! # Module Structure
//!
//! - [`catalog`]: level number to [`LevelConfig`]
//! - [`pattern`]: closed-form target patterns
//! - [`grid`]: tile storage, adjacency and the swap rules
//! - [`scoring`]: points and star rating
//! - [`session`]: one play-through of a level
//! - [`progression`]: campaign state machine and unlock gate
//! - [`rng`]: seeded random source for scrambles
//!
//! # Example
//!
//! ```
//! use tile_swap_core::{ProgressionController, TapOutcome};
//! use tile_swap_core::types::ProgressionState;
//!
//! let mut game = ProgressionController::new(12345);
//! game.start_level(1).unwrap();
//! assert_eq!(game.state(), ProgressionState::Playing);
//!
//! // Undo the scramble swap by swap.
//! let log = game.session().scramble_log().to_vec();
//! for mv in log.iter().rev() {
//!     game.tap_tile(mv.a);
//!     if let TapOutcome::Completed(result) = game.tap_tile(mv.b) {
//!         assert!(result.points >= 100);
//!         break;
//!     }
//! }
//! assert_eq!(game.state(), ProgressionState::LevelComplete);
//! ```
//!
//! # Timing
//!
//! Time is passed in as seconds of elapsed wall time; the host decides the
//! cadence. Call [`ProgressionController::tick`] every frame.

pub mod catalog;
pub mod error;
pub mod event;
pub mod grid;
pub mod pattern;
pub mod progression;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tile_swap_types as types;

// Re-export commonly used types for convenience
pub use catalog::{get_config, LevelConfig};
pub use error::{ConfigurationError, ProgressionError, SwapError};
pub use event::EngineEvent;
pub use grid::{are_adjacent, Grid, PuzzleGrid};
pub use pattern::{generate, generate_named};
pub use progression::ProgressionController;
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{score, stars_for, ScoreResult};
pub use session::{LevelSession, TapOutcome};
pub use snapshot::GameSnapshot;
