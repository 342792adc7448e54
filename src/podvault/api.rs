//! # API Facade
//!
//! Thin entry point over the command layer: one method per operation,
//! structured `Result<CmdResult>` returns, no terminal I/O. Generic over
//! [`DataStore`] so the same facade runs against `FileStore` in production
//! and `InMemoryStore` in tests.

use std::path::Path;

use crate::commands::{self, CmdResult};
use crate::config::VaultConfig;
use crate::error::Result;
use crate::id::IdGenerator;
use crate::markdown::MarkdownGenerator;
use crate::model::{Episode, Metadata, Platform};
use crate::state::StateTracker;
use crate::store::DataStore;
use crate::transcript::TranscriptWriter;

pub struct PodvaultApi<S: DataStore> {
    store: S,
    ids: IdGenerator,
    tracker: StateTracker,
    markdown: MarkdownGenerator,
    transcripts: TranscriptWriter,
}

impl<S: DataStore> PodvaultApi<S> {
    /// Wire up all components against one configuration. Loads the ID
    /// counters, rebuilding them from the store when the cache file is
    /// absent.
    pub fn new(store: S, config: &VaultConfig) -> Result<Self> {
        let episodes = store.list()?;
        let ids = IdGenerator::load(config.id_cache_path(), &episodes);
        Ok(Self {
            store,
            ids,
            tracker: StateTracker::new(config.state_dir()),
            markdown: MarkdownGenerator::new(config),
            transcripts: TranscriptWriter::new(config),
        })
    }

    pub fn add_podcast(
        &mut self,
        url: &str,
        platform: Platform,
        metadata: &Metadata,
        overwrite: bool,
    ) -> Result<CmdResult> {
        commands::add::run(
            &mut self.store,
            &mut self.ids,
            url,
            platform,
            metadata,
            overwrite,
        )
    }

    pub fn process_podcast(
        &mut self,
        episode_id: &str,
        transcript_source: Option<&Path>,
    ) -> Result<CmdResult> {
        commands::process::run(
            &mut self.store,
            &self.tracker,
            &self.markdown,
            &self.transcripts,
            episode_id,
            transcript_source,
        )
    }

    pub fn cleanup_podcast(&mut self, episode_id: &str, reset: bool) -> Result<CmdResult> {
        commands::cleanup::run(&mut self.store, &mut self.ids, episode_id, reset)
    }

    pub fn list_podcasts(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn processing_status(&self, platform: Option<Platform>) -> Result<CmdResult> {
        commands::status::run(&self.tracker, platform)
    }

    /// Lookup used by the CLI to show an existing entry before the
    /// overwrite prompt.
    pub fn get_episode(&self, episode_id: &str) -> Result<Episode> {
        self.store.get(episode_id)
    }
}
