use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// All episodes, newest first.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut episodes = store.list()?;
    episodes.sort_by(|a, b| b.date.cmp(&a.date).then(b.episode_id.cmp(&a.episode_id)));

    let mut result = CmdResult::default();
    if episodes.is_empty() {
        result.add_message(CmdMessage::info("No episodes in the database."));
    }
    result.episodes = episodes;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::id::IdGenerator;
    use crate::model::{Metadata, Platform};
    use crate::store::memory::InMemoryStore;
    use tempfile::tempdir;

    fn metadata(date: &str) -> Metadata {
        serde_json::from_str(&format!(
            r#"{{
                "title": "T",
                "published_at": "{}",
                "podcast_name": "P",
                "interviewee": "G"
            }}"#,
            date
        ))
        .unwrap()
    }

    #[test]
    fn lists_newest_first() {
        let dir = tempdir().unwrap();
        let mut store = InMemoryStore::new();
        let mut ids = IdGenerator::load(dir.path().join("id_cache.json"), &[]);

        add::run(
            &mut store,
            &mut ids,
            "url-a",
            Platform::Youtube,
            &metadata("2024-01-01"),
            false,
        )
        .unwrap();
        add::run(
            &mut store,
            &mut ids,
            "url-b",
            Platform::Youtube,
            &metadata("2024-06-01"),
            false,
        )
        .unwrap();

        let result = run(&store).unwrap();
        assert_eq!(result.episodes.len(), 2);
        assert!(result.episodes[0].date > result.episodes[1].date);
    }

    #[test]
    fn empty_store_reports_a_message() {
        let store = InMemoryStore::new();
        let result = run(&store).unwrap();
        assert!(result.episodes.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
