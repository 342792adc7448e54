//! Vault note generation: plain string templates, one file per artifact.

use std::fs;
use std::path::PathBuf;

use crate::config::VaultConfig;
use crate::error::Result;
use crate::model::Episode;

pub struct MarkdownGenerator {
    episodes_dir: PathBuf,
    claims_dir: PathBuf,
}

impl MarkdownGenerator {
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            episodes_dir: config.episodes_dir(),
            claims_dir: config.claims_dir(),
        }
    }

    /// Write the episode note: metadata plus embeds of the claims and
    /// transcript notes. Returns the written path.
    pub fn episode_note(&self, episode: &Episode) -> Result<PathBuf> {
        let path = self.episodes_dir.join(format!("{}.md", episode.episode_id));
        let content = format!(
            "# {title}\n\
             \n\
             ## Metadata\n\
             \n\
             - **Episode ID**: {id}\n\
             - **Podcast**: {podcast}\n\
             - **Platform**: {platform}\n\
             - **Date**: {date}\n\
             - **URL**: {url}\n\
             - **Interviewee**: {interviewee}\n\
             \n\
             ## Summary\n\
             \n\
             No summary available.\n\
             \n\
             ## Claims\n\
             \n\
             ![[{id}_claims]]\n\
             \n\
             ## Transcript\n\
             \n\
             ![[{id}_transcript]]\n",
            title = episode.title,
            id = episode.episode_id,
            podcast = episode.podcast_name,
            platform = episode.platform,
            date = episode.date,
            url = episode.url,
            interviewee = episode.interviewee.name,
        );

        fs::create_dir_all(&self.episodes_dir)?;
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write the claims note skeleton the operator fills in later.
    pub fn claims_note(&self, episode: &Episode) -> Result<PathBuf> {
        let path = self
            .claims_dir
            .join(format!("{}_claims.md", episode.episode_id));
        let content = format!(
            "# Claims from {title}\n\
             \n\
             ## Key Claims\n\
             \n\
             - [ ] Add key claims here\n\
             \n\
             ## Supporting Evidence\n\
             \n\
             - [ ] Add supporting evidence here\n",
            title = episode.title,
        );

        fs::create_dir_all(&self.claims_dir)?;
        fs::write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metadata, Platform};
    use tempfile::tempdir;

    fn episode() -> Episode {
        let metadata: Metadata = serde_json::from_str(
            r#"{
                "title": "Decentralized Medicine",
                "published_at": "2024-09-24",
                "podcast_name": "Danny Jones",
                "interviewee": "Jack Kruse"
            }"#,
        )
        .unwrap();
        Episode::new(
            "24_09_24_danny_jones_jack_kruse_youtube_01".into(),
            "https://youtube.com/watch?v=abc",
            Platform::Youtube,
            &metadata,
        )
    }

    #[test]
    fn episode_note_embeds_claims_and_transcript() {
        let dir = tempdir().unwrap();
        let config = VaultConfig::load(dir.path().to_path_buf()).unwrap();
        let generator = MarkdownGenerator::new(&config);

        let path = generator.episode_note(&episode()).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("# Decentralized Medicine"));
        assert!(content.contains("![[24_09_24_danny_jones_jack_kruse_youtube_01_claims]]"));
        assert!(content.contains("![[24_09_24_danny_jones_jack_kruse_youtube_01_transcript]]"));
        assert!(content.contains("- **Interviewee**: Jack Kruse"));
    }

    #[test]
    fn claims_note_is_named_after_episode_id() {
        let dir = tempdir().unwrap();
        let config = VaultConfig::load(dir.path().to_path_buf()).unwrap();
        let generator = MarkdownGenerator::new(&config);

        let path = generator.claims_note(&episode()).unwrap();
        assert!(path.ends_with("24_09_24_danny_jones_jack_kruse_youtube_01_claims.md"));
        assert!(path.exists());
    }
}
