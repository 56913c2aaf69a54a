//! Analytics forwarding.
//!
//! Four engine events are reported: `level_start`, `level_complete`,
//! `level_fail` and `unlock_prompt_shown`. A failing sink is logged and skipped;
//! it never reaches the engine.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::core::EngineEvent;

/// Wire shape of one analytics record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    #[serde(rename_all = "camelCase")]
    LevelStart {
        level: u32,
        grid_size: u8,
        tile_types: u8,
        time_limit: f64,
    },
    #[serde(rename_all = "camelCase")]
    LevelComplete {
        level: u32,
        time_remaining: f64,
        stars_earned: u8,
    },
    #[serde(rename_all = "camelCase")]
    LevelFail { level: u32, time_remaining: f64 },
    UnlockPromptShown { level: u32 },
}

impl AnalyticsEvent {
    /// Analytics view of an engine event; `None` for events not reported.
    pub fn from_engine(event: &EngineEvent) -> Option<Self> {
        match *event {
            EngineEvent::LevelStarted {
                level,
                grid_size,
                tile_types,
                time_limit,
            } => Some(AnalyticsEvent::LevelStart {
                level,
                grid_size,
                tile_types,
                time_limit,
            }),
            EngineEvent::LevelCompleted {
                level,
                time_remaining,
                stars,
                ..
            } => Some(AnalyticsEvent::LevelComplete {
                level,
                time_remaining,
                stars_earned: stars,
            }),
            EngineEvent::LevelFailed {
                level,
                time_remaining,
            } => Some(AnalyticsEvent::LevelFail {
                level,
                time_remaining,
            }),
            EngineEvent::UnlockPromptShown { level } => {
                Some(AnalyticsEvent::UnlockPromptShown { level })
            }
            EngineEvent::TileSwapped { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::LevelStart { .. } => "level_start",
            AnalyticsEvent::LevelComplete { .. } => "level_complete",
            AnalyticsEvent::LevelFail { .. } => "level_fail",
            AnalyticsEvent::UnlockPromptShown { .. } => "unlock_prompt_shown",
        }
    }
}

/// Destination for analytics records.
pub trait AnalyticsSink {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<()>;
}

/// Emits each record as a structured `tracing` event under the `analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<()> {
        match *event {
            AnalyticsEvent::LevelStart {
                level,
                grid_size,
                tile_types,
                time_limit,
            } => info!(
                target: "analytics",
                event = event.name(),
                level,
                grid_size,
                tile_types,
                time_limit
            ),
            AnalyticsEvent::LevelComplete {
                level,
                time_remaining,
                stars_earned,
            } => info!(
                target: "analytics",
                event = event.name(),
                level,
                time_remaining,
                stars_earned
            ),
            AnalyticsEvent::LevelFail {
                level,
                time_remaining,
            } => info!(target: "analytics", event = event.name(), level, time_remaining),
            AnalyticsEvent::UnlockPromptShown { level } => {
                info!(target: "analytics", event = event.name(), level)
            }
        }
        Ok(())
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Append to `path`, creating it if needed.
    pub fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open analytics file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> AnalyticsSink for JsonLinesSink<W> {
    fn send(&mut self, event: &AnalyticsEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event).context("encode analytics event")?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Forward the analytics subset of `events` to `sink`. Returns how many records
/// were delivered.
pub fn forward_events<I>(events: I, sink: &mut dyn AnalyticsSink) -> usize
where
    I: IntoIterator<Item = EngineEvent>,
{
    let mut delivered = 0;
    for event in events {
        let Some(record) = AnalyticsEvent::from_engine(&event) else {
            continue;
        };
        match sink.send(&record) {
            Ok(()) => delivered += 1,
            Err(err) => warn!(event = record.name(), error = %err, "Analytics delivery failed"),
        }
    }
    delivered
}
