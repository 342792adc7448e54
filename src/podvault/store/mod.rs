//! # Storage Layer
//!
//! The [`DataStore`] trait abstracts the episode database so the command
//! layer can run against different backends:
//!
//! - [`fs::FileStore`]: production storage. One JSON array in
//!   `podcasts.json`, loaded whole per operation and rewritten whole on every
//!   mutation. Writes go through a temp file and rename so a failed write
//!   never corrupts the previous valid file, and mutations take an advisory
//!   lock on a sibling lock file so concurrent CLI invocations serialize
//!   instead of racing.
//! - [`memory::InMemoryStore`]: in-memory storage for tests. No persistence.
//!
//! The store is dumb persistence: duplicate-URL policy, ID issuance, and
//! status transitions live in the command layer. The one shape invariant the
//! store owns is episode-ID uniqueness on insert.

use crate::error::Result;
use crate::model::{Episode, EpisodeUpdate};

pub mod fs;
pub mod memory;

/// Abstract interface for the episode database.
pub trait DataStore {
    /// All entries, in stored order.
    fn list(&self) -> Result<Vec<Episode>>;

    /// Entry by episode ID. `EpisodeNotFound` if absent.
    fn get(&self, episode_id: &str) -> Result<Episode>;

    /// Entry by source URL, if any. Linear scan; the store is small.
    fn find_by_url(&self, url: &str) -> Result<Option<Episode>>;

    /// Append a new entry. `Store` error if the episode ID already exists.
    fn insert(&mut self, episode: &Episode) -> Result<()>;

    /// Apply a partial update and persist. Returns the updated entry.
    fn update(&mut self, episode_id: &str, update: &EpisodeUpdate) -> Result<Episode>;

    /// Remove an entry and persist. Returns the removed entry.
    fn remove(&mut self, episode_id: &str) -> Result<Episode>;
}
