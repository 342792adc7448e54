use super::DataStore;
use crate::error::{Result, VaultError};
use crate::model::{Episode, EpisodeUpdate};

/// In-memory storage for testing. Does NOT persist data.
///
/// Keeps entries in insertion order, matching the JSON-array semantics of
/// the file store.
#[derive(Default)]
pub struct InMemoryStore {
    episodes: Vec<Episode>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataStore for InMemoryStore {
    fn list(&self) -> Result<Vec<Episode>> {
        Ok(self.episodes.clone())
    }

    fn get(&self, episode_id: &str) -> Result<Episode> {
        self.episodes
            .iter()
            .find(|e| e.episode_id == episode_id)
            .cloned()
            .ok_or_else(|| VaultError::EpisodeNotFound(episode_id.to_string()))
    }

    fn find_by_url(&self, url: &str) -> Result<Option<Episode>> {
        Ok(self.episodes.iter().find(|e| e.url == url).cloned())
    }

    fn insert(&mut self, episode: &Episode) -> Result<()> {
        if self
            .episodes
            .iter()
            .any(|e| e.episode_id == episode.episode_id)
        {
            return Err(VaultError::Store(format!(
                "episode ID already in database: {}",
                episode.episode_id
            )));
        }
        self.episodes.push(episode.clone());
        Ok(())
    }

    fn update(&mut self, episode_id: &str, update: &EpisodeUpdate) -> Result<Episode> {
        let episode = self
            .episodes
            .iter_mut()
            .find(|e| e.episode_id == episode_id)
            .ok_or_else(|| VaultError::EpisodeNotFound(episode_id.to_string()))?;
        update.apply(episode);
        Ok(episode.clone())
    }

    fn remove(&mut self, episode_id: &str) -> Result<Episode> {
        let position = self
            .episodes
            .iter()
            .position(|e| e.episode_id == episode_id)
            .ok_or_else(|| VaultError::EpisodeNotFound(episode_id.to_string()))?;
        Ok(self.episodes.remove(position))
    }
}
