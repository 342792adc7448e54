use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use uuid::Uuid;

use super::DataStore;
use crate::error::{Result, VaultError};
use crate::model::{Episode, EpisodeUpdate};

/// File-backed episode database: a single pretty-printed JSON array.
///
/// Every operation loads the whole array; every mutation rewrites it whole.
/// That is fine at the anticipated scale (single user, low hundreds of
/// entries) and keeps the file trivially inspectable and editable.
pub struct FileStore {
    db_path: PathBuf,
}

impl FileStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Read the database. An absent file is an empty store; a present but
    /// unparseable file is corruption, never silently dropped data.
    fn load_all(&self) -> Result<Vec<Episode>> {
        if !self.db_path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.db_path)?;
        serde_json::from_str(&content).map_err(|source| VaultError::Corrupt {
            path: self.db_path.clone(),
            source,
        })
    }

    /// Rewrite the database atomically: serialize to a temp file in the same
    /// directory, then rename over the target.
    fn save_all(&self, episodes: &[Episode]) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(episodes)?;
        let tmp = self
            .db_path
            .with_file_name(format!(".episodes-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.db_path)?;
        Ok(())
    }

    /// Advisory exclusive lock held for one load-mutate-save cycle.
    fn lock(&self) -> Result<StoreLock> {
        let lock_path = self.db_path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        file.lock_exclusive()?;
        Ok(StoreLock(file))
    }
}

/// Guard for the database lock file; releases on drop.
struct StoreLock(File);

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.0);
    }
}

impl DataStore for FileStore {
    fn list(&self) -> Result<Vec<Episode>> {
        self.load_all()
    }

    fn get(&self, episode_id: &str) -> Result<Episode> {
        self.load_all()?
            .into_iter()
            .find(|e| e.episode_id == episode_id)
            .ok_or_else(|| VaultError::EpisodeNotFound(episode_id.to_string()))
    }

    fn find_by_url(&self, url: &str) -> Result<Option<Episode>> {
        Ok(self.load_all()?.into_iter().find(|e| e.url == url))
    }

    fn insert(&mut self, episode: &Episode) -> Result<()> {
        let _lock = self.lock()?;
        let mut episodes = self.load_all()?;
        if episodes.iter().any(|e| e.episode_id == episode.episode_id) {
            return Err(VaultError::Store(format!(
                "episode ID already in database: {}",
                episode.episode_id
            )));
        }
        episodes.push(episode.clone());
        self.save_all(&episodes)
    }

    fn update(&mut self, episode_id: &str, update: &EpisodeUpdate) -> Result<Episode> {
        let _lock = self.lock()?;
        let mut episodes = self.load_all()?;
        let episode = episodes
            .iter_mut()
            .find(|e| e.episode_id == episode_id)
            .ok_or_else(|| VaultError::EpisodeNotFound(episode_id.to_string()))?;
        update.apply(episode);
        let updated = episode.clone();
        self.save_all(&episodes)?;
        Ok(updated)
    }

    fn remove(&mut self, episode_id: &str) -> Result<Episode> {
        let _lock = self.lock()?;
        let mut episodes = self.load_all()?;
        let position = episodes
            .iter()
            .position(|e| e.episode_id == episode_id)
            .ok_or_else(|| VaultError::EpisodeNotFound(episode_id.to_string()))?;
        let removed = episodes.remove(position);
        self.save_all(&episodes)?;
        Ok(removed)
    }
}
