use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::id::IdGenerator;
use crate::model::{Episode, Metadata, Platform};
use crate::store::DataStore;

/// Register a new episode in the database.
///
/// A URL that is already present is rejected unless `overwrite` is set, in
/// which case the prior entry is replaced and its episode ID reused without
/// touching the sequence counter.
pub fn run<S: DataStore>(
    store: &mut S,
    ids: &mut IdGenerator,
    url: &str,
    platform: Platform,
    metadata: &Metadata,
    overwrite: bool,
) -> Result<CmdResult> {
    let existing_id = match store.find_by_url(url)? {
        Some(prior) if !overwrite => {
            return Err(VaultError::DuplicateUrl {
                url: url.to_string(),
                episode_id: prior.episode_id,
            });
        }
        Some(prior) => {
            store.remove(&prior.episode_id)?;
            Some(prior.episode_id)
        }
        None => None,
    };

    let episode_id = match existing_id {
        Some(id) => id,
        None => ids
            .next_id(
                metadata.published_at.date_naive(),
                &metadata.podcast_name,
                &metadata.interviewee.name,
                platform,
            )?
            .to_string(),
    };

    let episode = Episode::new(episode_id, url, platform, metadata);
    store.insert(&episode)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Podcast added: {}",
        episode.episode_id
    )));
    result.add_message(CmdMessage::info(format!("Title: {}", episode.title)));
    result.add_message(CmdMessage::info(format!(
        "Podcast: {}",
        episode.podcast_name
    )));
    result.add_message(CmdMessage::info(format!(
        "Interviewee: {}",
        episode.interviewee.name
    )));
    result.episodes.push(episode);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::store::memory::InMemoryStore;
    use tempfile::tempdir;

    fn metadata(podcast: &str, guest: &str) -> Metadata {
        serde_json::from_str(&format!(
            r#"{{
                "title": "Some Conversation",
                "published_at": "2024-09-24T10:00:00Z",
                "podcast_name": "{}",
                "interviewee": "{}"
            }}"#,
            podcast, guest
        ))
        .unwrap()
    }

    fn generator(dir: &tempfile::TempDir) -> IdGenerator {
        IdGenerator::load(dir.path().join("id_cache.json"), &[])
    }

    #[test]
    fn adds_pending_entry_with_generated_id() {
        let dir = tempdir().unwrap();
        let mut store = InMemoryStore::new();
        let mut ids = generator(&dir);

        let result = run(
            &mut store,
            &mut ids,
            "https://youtube.com/watch?v=abc",
            Platform::Youtube,
            &metadata("Danny Jones", "Jack Kruse"),
            false,
        )
        .unwrap();

        let episode = &result.episodes[0];
        assert_eq!(
            episode.episode_id,
            "24_09_24_danny_jones_jack_kruse_youtube_01"
        );
        assert_eq!(episode.status, Status::Pending);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_url_is_rejected_and_store_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = InMemoryStore::new();
        let mut ids = generator(&dir);
        let url = "https://youtube.com/watch?v=abc";

        run(
            &mut store,
            &mut ids,
            url,
            Platform::Youtube,
            &metadata("Danny Jones", "Jack Kruse"),
            false,
        )
        .unwrap();

        let err = run(
            &mut store,
            &mut ids,
            url,
            Platform::Youtube,
            &metadata("Danny Jones", "Jack Kruse"),
            false,
        )
        .unwrap_err();

        assert!(matches!(err, VaultError::DuplicateUrl { .. }));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn overwrite_reuses_id_without_bumping_counter() {
        let dir = tempdir().unwrap();
        let mut store = InMemoryStore::new();
        let mut ids = generator(&dir);
        let url = "https://youtube.com/watch?v=abc";

        let first = run(
            &mut store,
            &mut ids,
            url,
            Platform::Youtube,
            &metadata("Danny Jones", "Jack Kruse"),
            false,
        )
        .unwrap();
        let original_id = first.episodes[0].episode_id.clone();

        let second = run(
            &mut store,
            &mut ids,
            url,
            Platform::Youtube,
            &metadata("Danny Jones", "Jack Kruse"),
            true,
        )
        .unwrap();

        assert_eq!(second.episodes[0].episode_id, original_id);
        assert_eq!(store.list().unwrap().len(), 1);
        // Next distinct episode for the same pairing continues at 02.
        let next = ids
            .next_id(
                chrono::NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
                "Danny Jones",
                "Jack Kruse",
                Platform::Youtube,
            )
            .unwrap();
        assert_eq!(next.count, 2);
    }

    #[test]
    fn same_pairing_gets_increasing_counters() {
        let dir = tempdir().unwrap();
        let mut store = InMemoryStore::new();
        let mut ids = generator(&dir);

        let a = run(
            &mut store,
            &mut ids,
            "https://youtube.com/watch?v=a",
            Platform::Youtube,
            &metadata("Danny Jones", "Jack Kruse"),
            false,
        )
        .unwrap();
        let b = run(
            &mut store,
            &mut ids,
            "https://youtube.com/watch?v=b",
            Platform::Youtube,
            &metadata("Danny Jones", "Jack Kruse"),
            false,
        )
        .unwrap();

        assert!(a.episodes[0].episode_id.ends_with("_01"));
        assert!(b.episodes[0].episode_id.ends_with("_02"));
    }
}
