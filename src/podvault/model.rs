use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, VaultError};

/// Source platform an episode was published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Vimeo,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Youtube => write!(f, "youtube"),
            Platform::Vimeo => write!(f, "vimeo"),
        }
    }
}

impl FromStr for Platform {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            "vimeo" => Ok(Platform::Vimeo),
            other => Err(VaultError::InvalidMetadata(format!(
                "unsupported platform: {}",
                other
            ))),
        }
    }
}

/// Pipeline status of an episode. Advances pending -> processing ->
/// {complete | error}; error is recoverable by re-running process-podcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Processing,
    Error,
    Complete,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::Processing => write!(f, "processing"),
            Status::Error => write!(f, "error"),
            Status::Complete => write!(f, "complete"),
        }
    }
}

/// The guest of an episode. Immutable value object embedded in an [`Episode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interviewee {
    pub name: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub organization: String,
}

impl Interviewee {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profession: String::new(),
            organization: String::new(),
        }
    }
}

/// Episode metadata as produced by an external platform fetcher.
///
/// Parsed at the CLI boundary so malformed fetcher output is rejected before
/// it reaches the store. `published_at` accepts RFC 3339 or a bare
/// `YYYY-MM-DD`; `interviewee` accepts a full object or a bare name string.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "de_published_at")]
    pub published_at: DateTime<Utc>,
    pub podcast_name: String,
    #[serde(deserialize_with = "de_interviewee")]
    pub interviewee: Interviewee,
    #[serde(default)]
    pub webvtt_link: String,
}

impl Metadata {
    /// Read and validate a metadata JSON file written by a fetcher.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            VaultError::InvalidMetadata(format!("{}: {}", path.display(), e))
        })
    }
}

/// Parse a fetcher-supplied publication date.
pub fn parse_published_at(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc());
    }
    Err(format!("unrecognized date format in published_at: {}", s))
}

fn de_published_at<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_published_at(&s).map_err(serde::de::Error::custom)
}

fn de_interviewee<'de, D>(deserializer: D) -> std::result::Result<Interviewee, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Name(String),
        Full(Interviewee),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Name(name) => Interviewee::named(name),
        Raw::Full(interviewee) => interviewee,
    })
}

/// One record in the episode database.
///
/// File fields hold paths to generated vault artifacts; the empty string
/// means "not yet generated".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode_id: String,
    pub url: String,
    pub platform: Platform,
    pub title: String,
    pub podcast_name: String,
    pub interviewee: Interviewee,
    pub date: NaiveDate,
    pub status: Status,
    #[serde(default)]
    pub episodes_file: String,
    #[serde(default)]
    pub claims_file: String,
    #[serde(default)]
    pub transcripts_file: String,
    #[serde(default)]
    pub webvtt_link: String,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Episode {
    /// Build a fresh entry from fetcher metadata. Starts pending with no
    /// generated artifacts.
    pub fn new(episode_id: String, url: &str, platform: Platform, metadata: &Metadata) -> Self {
        let now = Utc::now();
        Self {
            episode_id,
            url: url.to_string(),
            platform,
            title: metadata.title.clone(),
            podcast_name: metadata.podcast_name.clone(),
            interviewee: metadata.interviewee.clone(),
            date: metadata.published_at.date_naive(),
            status: Status::Pending,
            episodes_file: String::new(),
            claims_file: String::new(),
            transcripts_file: String::new(),
            webvtt_link: metadata.webvtt_link.clone(),
            added_at: now,
            updated_at: now,
        }
    }

    /// All three vault artifacts have been generated.
    pub fn is_complete(&self) -> bool {
        !self.episodes_file.is_empty()
            && !self.claims_file.is_empty()
            && !self.transcripts_file.is_empty()
    }
}

/// A partial update to an episode entry. Only the fields that are set are
/// applied; the store bumps `updated_at` on every apply.
#[derive(Debug, Clone, Default)]
pub struct EpisodeUpdate {
    pub status: Option<Status>,
    pub title: Option<String>,
    pub episodes_file: Option<String>,
    pub claims_file: Option<String>,
    pub transcripts_file: Option<String>,
    pub webvtt_link: Option<String>,
}

impl EpisodeUpdate {
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn episodes_file(mut self, path: impl Into<String>) -> Self {
        self.episodes_file = Some(path.into());
        self
    }

    pub fn claims_file(mut self, path: impl Into<String>) -> Self {
        self.claims_file = Some(path.into());
        self
    }

    pub fn transcripts_file(mut self, path: impl Into<String>) -> Self {
        self.transcripts_file = Some(path.into());
        self
    }

    pub fn webvtt_link(mut self, link: impl Into<String>) -> Self {
        self.webvtt_link = Some(link.into());
        self
    }

    pub fn apply(&self, episode: &mut Episode) {
        if let Some(status) = self.status {
            episode.status = status;
        }
        if let Some(title) = &self.title {
            episode.title = title.clone();
        }
        if let Some(path) = &self.episodes_file {
            episode.episodes_file = path.clone();
        }
        if let Some(path) = &self.claims_file {
            episode.claims_file = path.clone();
        }
        if let Some(path) = &self.transcripts_file {
            episode.transcripts_file = path.clone();
        }
        if let Some(link) = &self.webvtt_link {
            episode.webvtt_link = link.clone();
        }
        episode.updated_at = Utc::now();
    }
}
