use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("An entry for {url} already exists (episode {episode_id})")]
    DuplicateUrl { url: String, episode_id: String },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Episode not found: {0}")]
    EpisodeNotFound(String),

    #[error("Database file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid episode ID format: {0}")]
    IdFormat(String),

    #[error("Sequence counter exhausted for '{0}': the ID format carries a two-digit counter")]
    CounterOverflow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
