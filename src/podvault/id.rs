//! Episode identity: sortable, filesystem-safe IDs with per-group sequence
//! counters.
//!
//! An ID looks like `24_09_24_danny_jones_jack_kruse_youtube_01`: date triple,
//! sanitized podcast name, sanitized interviewee name, platform, two-digit
//! counter. Counters are grouped by podcast+interviewee so repeat guests on
//! the same show number up from 01.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::error::{Result, VaultError};
use crate::model::{Episode, Platform};

static STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

// Podcast segment is non-greedy, interviewee greedy up to a known platform
// token: segments may themselves contain underscores, so the split is
// positional, not unambiguous.
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})_(\d{2})_(\d{2})_(.+?)_(.+)_(youtube|vimeo)_(\d{2})$").unwrap()
});

/// Normalize a name for use inside an episode ID: lowercase, strip anything
/// outside word chars / whitespace / hyphens, then collapse whitespace runs
/// and repeated underscores to a single underscore. Idempotent.
pub fn sanitize(name: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = STRIP.replace_all(&lower, "");
    let underscored = WHITESPACE.replace_all(&stripped, "_");
    UNDERSCORES.replace_all(&underscored, "_").into_owned()
}

/// A parsed or freshly issued episode identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeId {
    pub date: NaiveDate,
    pub podcast_name: String,
    pub interviewee_name: String,
    pub platform: Platform,
    pub count: u32,
}

impl EpisodeId {
    pub fn new(
        date: NaiveDate,
        podcast_name: &str,
        interviewee_name: &str,
        platform: Platform,
        count: u32,
    ) -> Self {
        Self {
            date,
            podcast_name: sanitize(podcast_name),
            interviewee_name: sanitize(interviewee_name),
            platform,
            count,
        }
    }

    /// Artifact filename for this ID, e.g. `<id>_transcript.md`.
    pub fn filename(&self, kind: &str) -> String {
        format!("{}_{}.md", self, kind)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{:02}",
            self.date.format("%y_%m_%d"),
            self.podcast_name,
            self.interviewee_name,
            self.platform,
            self.count
        )
    }
}

impl FromStr for EpisodeId {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = ID_PATTERN
            .captures(s)
            .ok_or_else(|| VaultError::IdFormat(s.to_string()))?;

        let date_str = format!("{}_{}_{}", &caps[1], &caps[2], &caps[3]);
        let date = NaiveDate::parse_from_str(&date_str, "%y_%m_%d")
            .map_err(|_| VaultError::IdFormat(s.to_string()))?;
        let platform = Platform::from_str(&caps[6])?;
        let count: u32 = caps[7]
            .parse()
            .map_err(|_| VaultError::IdFormat(s.to_string()))?;

        Ok(Self {
            date,
            podcast_name: caps[4].to_string(),
            interviewee_name: caps[5].to_string(),
            platform,
            count,
        })
    }
}

/// Issues episode IDs and owns the per-group sequence counters.
///
/// Counters live in their own JSON file and are persisted on every issued ID,
/// so a crash after issuance never loses the increment. When the cache file
/// is missing (or unreadable) the counters are rebuilt from the episode
/// database, which is the authoritative record.
pub struct IdGenerator {
    cache_path: PathBuf,
    counters: HashMap<String, u32>,
}

impl IdGenerator {
    /// Load counters from the cache file, falling back to a rebuild from the
    /// given episodes. The cache is derivable state, so a bad cache file is
    /// rebuilt rather than treated as corruption.
    pub fn load(cache_path: PathBuf, episodes: &[Episode]) -> Self {
        let counters = fs::read_to_string(&cache_path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_else(|| Self::rebuild(episodes));
        Self {
            cache_path,
            counters,
        }
    }

    /// Derive counters from existing entries: grouping key from the entry's
    /// own fields, count from the trailing ID segment. Entries whose ID does
    /// not end in a number are skipped.
    fn rebuild(episodes: &[Episode]) -> HashMap<String, u32> {
        let mut counters: HashMap<String, u32> = HashMap::new();
        for episode in episodes {
            let count = match episode
                .episode_id
                .rsplit('_')
                .next()
                .and_then(|segment| segment.parse::<u32>().ok())
            {
                Some(count) => count,
                None => continue,
            };
            let key = grouping_key(&episode.podcast_name, &episode.interviewee.name);
            let current = counters.entry(key).or_insert(0);
            *current = (*current).max(count);
        }
        counters
    }

    /// Issue the next ID for (podcast, interviewee) and persist the counter
    /// immediately.
    pub fn next_id(
        &mut self,
        date: NaiveDate,
        podcast_name: &str,
        interviewee_name: &str,
        platform: Platform,
    ) -> Result<EpisodeId> {
        let key = grouping_key(podcast_name, interviewee_name);
        let count = self.counters.get(&key).copied().unwrap_or(0) + 1;
        if count > 99 {
            return Err(VaultError::CounterOverflow(key));
        }
        self.counters.insert(key, count);
        self.persist()?;
        Ok(EpisodeId::new(
            date,
            podcast_name,
            interviewee_name,
            platform,
            count,
        ))
    }

    /// Clear all counters and delete the cache file. Safe to call when the
    /// file does not exist.
    pub fn reset(&mut self) -> Result<()> {
        self.counters.clear();
        match fs::remove_file(&self.cache_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::Io(e)),
        }
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.cache_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.counters)?;
        let tmp = self
            .cache_path
            .with_file_name(format!(".id-cache-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.cache_path)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn counter_for(&self, podcast_name: &str, interviewee_name: &str) -> u32 {
        self.counters
            .get(&grouping_key(podcast_name, interviewee_name))
            .copied()
            .unwrap_or(0)
    }
}

fn grouping_key(podcast_name: &str, interviewee_name: &str) -> String {
    format!("{}_{}", sanitize(podcast_name), sanitize(interviewee_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Interviewee, Metadata};
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 24).unwrap()
    }

    fn metadata(podcast: &str, guest: &str) -> Metadata {
        serde_json::from_str(&format!(
            r#"{{
                "title": "T",
                "published_at": "2024-09-24",
                "podcast_name": "{}",
                "interviewee": "{}"
            }}"#,
            podcast, guest
        ))
        .unwrap()
    }

    #[test]
    fn sanitize_lowercases_and_underscores() {
        assert_eq!(sanitize("Danny Jones"), "danny_jones");
        assert_eq!(sanitize("Dr. Jack Kruse!"), "dr_jack_kruse");
        assert_eq!(sanitize("a  b\t c"), "a_b_c");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in ["Danny Jones", "Dr. Jack Kruse!", "a__b", "  spaced  ", "çédille"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn generates_gapless_two_digit_counters() {
        let dir = tempdir().unwrap();
        let mut ids = IdGenerator::load(dir.path().join("id_cache.json"), &[]);

        let first = ids
            .next_id(date(), "Danny Jones", "Jack Kruse", Platform::Youtube)
            .unwrap();
        let second = ids
            .next_id(date(), "Danny Jones", "Jack Kruse", Platform::Youtube)
            .unwrap();

        assert_eq!(
            first.to_string(),
            "24_09_24_danny_jones_jack_kruse_youtube_01"
        );
        assert_eq!(
            second.to_string(),
            "24_09_24_danny_jones_jack_kruse_youtube_02"
        );
    }

    #[test]
    fn counters_are_independent_per_grouping_key() {
        let dir = tempdir().unwrap();
        let mut ids = IdGenerator::load(dir.path().join("id_cache.json"), &[]);

        ids.next_id(date(), "Danny Jones", "Jack Kruse", Platform::Youtube)
            .unwrap();
        let other = ids
            .next_id(date(), "Danny Jones", "Andrew Huberman", Platform::Youtube)
            .unwrap();
        assert_eq!(other.count, 1);
    }

    #[test]
    fn counter_survives_reload() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("id_cache.json");

        let mut ids = IdGenerator::load(cache.clone(), &[]);
        ids.next_id(date(), "Danny Jones", "Jack Kruse", Platform::Youtube)
            .unwrap();

        // Fresh generator, no episodes: the persisted cache carries the count.
        let mut ids = IdGenerator::load(cache, &[]);
        let next = ids
            .next_id(date(), "Danny Jones", "Jack Kruse", Platform::Youtube)
            .unwrap();
        assert_eq!(next.count, 2);
    }

    #[test]
    fn rebuilds_counters_from_episodes_when_cache_missing() {
        let dir = tempdir().unwrap();
        let mut episode = Episode::new(
            "24_09_24_danny_jones_jack_kruse_youtube_02".into(),
            "https://youtube.com/watch?v=abc",
            Platform::Youtube,
            &metadata("Danny Jones", "Jack Kruse"),
        );
        episode.interviewee = Interviewee::named("Jack Kruse");

        let mut ids = IdGenerator::load(dir.path().join("id_cache.json"), &[episode]);
        let next = ids
            .next_id(date(), "Danny Jones", "Jack Kruse", Platform::Youtube)
            .unwrap();
        assert_eq!(next.count, 3);
    }

    #[test]
    fn rebuild_skips_malformed_ids() {
        let dir = tempdir().unwrap();
        let mut episode = Episode::new(
            "not-an-id".into(),
            "https://youtube.com/watch?v=abc",
            Platform::Youtube,
            &metadata("Danny Jones", "Jack Kruse"),
        );
        episode.episode_id = "garbage_without_trailing_count_x".into();

        let ids = IdGenerator::load(dir.path().join("id_cache.json"), &[episode]);
        assert_eq!(ids.counter_for("Danny Jones", "Jack Kruse"), 0);
    }

    #[test]
    fn reset_clears_counters_and_cache_file() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("id_cache.json");
        let mut ids = IdGenerator::load(cache.clone(), &[]);
        ids.next_id(date(), "Danny Jones", "Jack Kruse", Platform::Youtube)
            .unwrap();
        assert!(cache.exists());

        ids.reset().unwrap();
        assert!(!cache.exists());
        // Resetting again with no file present is fine.
        ids.reset().unwrap();

        let next = ids
            .next_id(date(), "Danny Jones", "Jack Kruse", Platform::Youtube)
            .unwrap();
        assert_eq!(next.count, 1);
    }

    #[test]
    fn overflow_is_an_error_not_a_wrap() {
        let dir = tempdir().unwrap();
        let mut ids = IdGenerator::load(dir.path().join("id_cache.json"), &[]);
        for _ in 0..99 {
            ids.next_id(date(), "P", "G", Platform::Vimeo).unwrap();
        }
        let err = ids.next_id(date(), "P", "G", Platform::Vimeo).unwrap_err();
        assert!(matches!(err, VaultError::CounterOverflow(_)));
    }

    #[test]
    fn parses_id_back_into_components() {
        let id: EpisodeId = "24_09_24_danny_jones_jack_kruse_youtube_01"
            .parse()
            .unwrap();
        assert_eq!(id.date, date());
        assert_eq!(id.podcast_name, "danny");
        assert_eq!(id.interviewee_name, "jones_jack_kruse");
        assert_eq!(id.platform, Platform::Youtube);
        assert_eq!(id.count, 1);
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        for bad in [
            "2024_09_24_a_b_youtube_01",
            "24_09_24_a_b_spotify_01",
            "24_09_24_a_b_youtube_1",
            "not an id",
            "",
        ] {
            let result: Result<EpisodeId> = bad.parse();
            assert!(
                matches!(result, Err(VaultError::IdFormat(_)) | Err(VaultError::InvalidMetadata(_))),
                "expected format error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn filename_appends_kind() {
        let id = EpisodeId::new(date(), "Danny Jones", "Jack Kruse", Platform::Youtube, 1);
        assert_eq!(
            id.filename("transcript"),
            "24_09_24_danny_jones_jack_kruse_youtube_01_transcript.md"
        );
    }
}
