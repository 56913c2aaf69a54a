//! JSON file persistence for [`PlayerProgress`].
//!
//! The file holds one camelCase object:
//!
//! ```json
//! {"currentLevel":4,"totalScore":1830,"totalStars":9,"highestUnlockedLevel":4}
//! ```
//!
//! Missing keys take their defaults and the loaded value is normalised, so a
//! stale or hand-edited save never yields an unplayable campaign.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::PlayerProgress;

#[derive(Debug, Display, Error)]
pub enum StoreError {
    #[display("reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[display("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("encoding progress: {source}")]
    Encode { source: serde_json::Error },
}

/// On-disk shape of the progress file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    pub current_level: u32,
    pub total_score: u64,
    pub total_stars: u32,
    pub highest_unlocked_level: u32,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        PlayerProgress::default().into()
    }
}

impl From<PlayerProgress> for ProgressRecord {
    fn from(p: PlayerProgress) -> Self {
        Self {
            current_level: p.current_level,
            total_score: p.total_score,
            total_stars: p.total_stars,
            highest_unlocked_level: p.highest_unlocked_level,
        }
    }
}

impl From<ProgressRecord> for PlayerProgress {
    fn from(r: ProgressRecord) -> Self {
        PlayerProgress {
            current_level: r.current_level,
            total_score: r.total_score,
            total_stars: r.total_stars,
            highest_unlocked_level: r.highest_unlocked_level,
        }
        .normalized()
    }
}

/// Progress file at a fixed path.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved progress; a missing file gives the default campaign.
    pub fn load(&self) -> Result<PlayerProgress, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved progress");
                return Ok(PlayerProgress::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let record: ProgressRecord =
            serde_json::from_str(&text).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let progress = PlayerProgress::from(record);
        debug!(
            path = %self.path.display(),
            level = progress.current_level,
            unlocked = progress.highest_unlocked_level,
            "Loaded progress"
        );
        Ok(progress)
    }

    /// Write progress through a temporary file and rename it into place.
    pub fn save(&self, progress: &PlayerProgress) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(&ProgressRecord::from(*progress))
            .map_err(|source| StoreError::Encode { source })?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(
            path = %self.path.display(),
            level = progress.current_level,
            score = progress.total_score,
            "Saved progress"
        );
        Ok(())
    }

    /// Delete the save file. A missing file is not an error.
    pub fn reset(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Progress reset");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "progress.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
