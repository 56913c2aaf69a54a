//! Adapters between the engine and the outside world.
//!
//! The core never performs I/O. This crate carries the two collaborators the
//! terminal game needs:
//!
//! - [`progress_store`]: JSON save file for [`types::PlayerProgress`], written
//!   atomically (temp file + rename)
//! - [`analytics`]: forwards `level_start`, `level_complete`, `level_fail` and
//!   `unlock_prompt_shown` to a sink (structured `tracing` events or a JSON
//!   lines file)
//!
//! # Example
//!
//! ```
//! use tile_swap_adapter::analytics::{forward_events, JsonLinesSink};
//! use tile_swap_adapter::core::ProgressionController;
//!
//! let mut game = ProgressionController::new(7);
//! game.start_level(1).unwrap();
//!
//! let mut sink = JsonLinesSink::new(Vec::new());
//! let sent = forward_events(game.drain_events(), &mut sink);
//! assert_eq!(sent, 1);
//! ```

pub mod analytics;
pub mod progress_store;

pub use tile_swap_core as core;
pub use tile_swap_types as types;

pub use analytics::{forward_events, AnalyticsEvent, AnalyticsSink, JsonLinesSink, TracingSink};
pub use progress_store::{ProgressRecord, ProgressStore, StoreError};
