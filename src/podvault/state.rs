//! Cross-invocation processing state.
//!
//! Multi-step workflows (add -> process -> cleanup) leave a single
//! current-episode marker on disk so the CLI can report and resume without
//! the user re-supplying identifiers. Each platform keeps its own state
//! file; every save fully replaces the prior state. No history.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Platform, Status};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingState {
    pub episode_id: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_file: Option<String>,
}

impl ProcessingState {
    pub fn processing(episode_id: &str) -> Self {
        Self {
            episode_id: episode_id.to_string(),
            status: Status::Processing,
            error: None,
            transcript_file: None,
        }
    }

    pub fn complete(episode_id: &str) -> Self {
        Self {
            episode_id: episode_id.to_string(),
            status: Status::Complete,
            error: None,
            transcript_file: None,
        }
    }

    pub fn failed(episode_id: &str, error: impl Into<String>) -> Self {
        Self {
            episode_id: episode_id.to_string(),
            status: Status::Error,
            error: Some(error.into()),
            transcript_file: None,
        }
    }

    pub fn with_transcript(mut self, path: impl Into<String>) -> Self {
        self.transcript_file = Some(path.into());
        self
    }
}

/// Owns the per-platform current-episode files under the data directory.
pub struct StateTracker {
    dir: PathBuf,
}

impl StateTracker {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn file_for(&self, platform: Platform) -> PathBuf {
        self.dir.join(format!(".current_episode_{}.json", platform))
    }

    /// The file a platform-less read resolves to: whichever platform file
    /// already exists, defaulting to youtube.
    fn resolve(&self, platform: Option<Platform>) -> PathBuf {
        match platform {
            Some(p) => self.file_for(p),
            None => {
                for p in [Platform::Youtube, Platform::Vimeo] {
                    let path = self.file_for(p);
                    if path.exists() {
                        return path;
                    }
                }
                self.file_for(Platform::Youtube)
            }
        }
    }

    /// Overwrite the platform's state file with the given state.
    pub fn save(&self, platform: Platform, state: &ProcessingState) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        let path = self.file_for(platform);
        write_atomic(&path, &content)?;
        Ok(())
    }

    /// Read the current state; absence is not an error.
    pub fn load(&self, platform: Option<Platform>) -> Result<Option<ProcessingState>> {
        let path = self.resolve(platform);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Remove the platform's state file. Absent file is fine.
    pub fn clear(&self, platform: Platform) -> Result<()> {
        match fs::remove_file(self.file_for(platform)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_file_name(format!(".state-{}.tmp", Uuid::new_v4()));
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
