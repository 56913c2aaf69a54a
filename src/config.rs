//! Command-line and environment configuration.
//!
//! Every flag has a `TILE_SWAP_*` environment fallback, so the game can be
//! configured without arguments (e.g. from a launcher script).

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::types::TICK_MS;

/// Tile Swap - match the target pattern before the clock runs out
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tile-swap")]
#[command(about = "Terminal tile-swap pattern puzzle", long_about = None)]
#[command(version)]
pub struct Config {
    /// Seed for level scrambles (defaults to the clock)
    #[arg(long, env = "TILE_SWAP_SEED")]
    pub seed: Option<u32>,

    /// Where campaign progress is saved
    #[arg(long, env = "TILE_SWAP_SAVE_FILE", default_value = "tile_swap_progress.json")]
    pub save_file: PathBuf,

    /// Append analytics events as JSON lines to this file
    #[arg(long, env = "TILE_SWAP_ANALYTICS_FILE")]
    pub analytics_file: Option<PathBuf>,

    /// Log file (the terminal is in raw mode while playing)
    #[arg(long, env = "TILE_SWAP_LOG_FILE", default_value = "tile_swap.log")]
    pub log_file: PathBuf,

    /// Frame interval in milliseconds
    #[arg(
        long,
        env = "TILE_SWAP_TICK_MS",
        default_value_t = TICK_MS,
        value_parser = clap::value_parser!(u32).range(10..=1000)
    )]
    pub tick_ms: u32,

    /// Delete saved progress before starting
    #[arg(long, env = "TILE_SWAP_RESET_PROGRESS")]
    pub reset_progress: bool,
}

impl Config {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }

    /// Configured seed, or one derived from the wall clock.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
