use std::fs;
use std::path::Path;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::id::IdGenerator;
use crate::model::{EpisodeUpdate, Status};
use crate::store::DataStore;

/// Delete an episode's vault artifacts, then remove it from the database
/// (or, with `reset`, return it to pending with empty file fields), then
/// reset the ID cache. Artifacts go first so a failed deletion never leaves
/// a file the database no longer knows about.
///
/// An unknown episode ID is reported, not an error.
pub fn run<S: DataStore>(
    store: &mut S,
    ids: &mut IdGenerator,
    episode_id: &str,
    reset: bool,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let episode = match store.get(episode_id) {
        Ok(episode) => episode,
        Err(VaultError::EpisodeNotFound(_)) => {
            result.add_message(CmdMessage::warning(format!(
                "No episode found with ID: {}",
                episode_id
            )));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    for file in [
        &episode.episodes_file,
        &episode.claims_file,
        &episode.transcripts_file,
    ] {
        if file.is_empty() {
            continue;
        }
        let path = Path::new(file);
        if path.exists() {
            fs::remove_file(path)?;
            result.add_message(CmdMessage::info(format!("Removed: {}", path.display())));
        }
    }

    if reset {
        store.update(
            episode_id,
            &EpisodeUpdate::default()
                .status(Status::Pending)
                .episodes_file("")
                .claims_file("")
                .transcripts_file(""),
        )?;
        result.add_message(CmdMessage::success(format!(
            "Reset episode to pending: {}",
            episode_id
        )));
    } else {
        store.remove(episode_id)?;
        result.add_message(CmdMessage::success(format!(
            "Removed episode: {}",
            episode.title
        )));
    }

    ids.reset()?;
    result.episodes.push(episode);
    Ok(result)
}
