use std::path::Path;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::markdown::MarkdownGenerator;
use crate::model::{Episode, EpisodeUpdate, Status};
use crate::state::{ProcessingState, StateTracker};
use crate::store::DataStore;
use crate::transcript::TranscriptWriter;

/// Generate the vault artifacts for an episode: transcript note, episode
/// note, claims note. The entry and the state tracker move to `processing`
/// up front and to `complete` at the end; on any failure both record
/// `error` (with the message in the state file) before the error propagates,
/// so the database always reflects the last known state.
pub fn run<S: DataStore>(
    store: &mut S,
    tracker: &StateTracker,
    markdown: &MarkdownGenerator,
    transcripts: &TranscriptWriter,
    episode_id: &str,
    transcript_source: Option<&Path>,
) -> Result<CmdResult> {
    let episode = store.get(episode_id)?;
    tracker.save(episode.platform, &ProcessingState::processing(episode_id))?;
    store.update(
        episode_id,
        &EpisodeUpdate::default().status(Status::Processing),
    )?;

    match generate(store, markdown, transcripts, &episode, transcript_source) {
        Ok(result) => {
            let updated = store.update(
                episode_id,
                &EpisodeUpdate::default().status(Status::Complete),
            )?;
            debug_assert!(updated.is_complete());
            tracker.save(episode.platform, &ProcessingState::complete(episode_id))?;
            Ok(result)
        }
        Err(e) => {
            // Record the failure but never mask the original error.
            let _ = store.update(episode_id, &EpisodeUpdate::default().status(Status::Error));
            let _ = tracker.save(
                episode.platform,
                &ProcessingState::failed(episode_id, e.to_string()),
            );
            Err(e)
        }
    }
}

fn generate<S: DataStore>(
    store: &mut S,
    markdown: &MarkdownGenerator,
    transcripts: &TranscriptWriter,
    episode: &Episode,
    transcript_source: Option<&Path>,
) -> Result<CmdResult> {
    let source = transcript_source.ok_or_else(|| {
        VaultError::Store(format!(
            "no transcript source for {}: pass --transcript with the fetched file",
            episode.episode_id
        ))
    })?;

    let transcript_path = transcripts.write_note(&episode.episode_id, source)?;
    store.update(
        &episode.episode_id,
        &EpisodeUpdate::default().transcripts_file(transcript_path.display().to_string()),
    )?;

    let episode_path = markdown.episode_note(episode)?;
    store.update(
        &episode.episode_id,
        &EpisodeUpdate::default().episodes_file(episode_path.display().to_string()),
    )?;

    let claims_path = markdown.claims_note(episode)?;
    store.update(
        &episode.episode_id,
        &EpisodeUpdate::default().claims_file(claims_path.display().to_string()),
    )?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Processing completed successfully!"));
    result.add_message(CmdMessage::info(format!(
        "Episode note:    {}",
        episode_path.display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Claims note:     {}",
        claims_path.display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Transcript note: {}",
        transcript_path.display()
    )));
    Ok(result)
}
