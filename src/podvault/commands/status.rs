use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Platform;
use crate::state::StateTracker;

/// Report the most recently touched episode for a platform (or for
/// whichever platform has state when none is given).
pub fn run(tracker: &StateTracker, platform: Option<Platform>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match tracker.load(platform)? {
        Some(state) => {
            result.add_message(CmdMessage::info(format!(
                "Current episode: {} ({})",
                state.episode_id, state.status
            )));
            if let Some(error) = &state.error {
                result.add_message(CmdMessage::error(format!("Last error: {}", error)));
            }
            result.state = Some(state);
        }
        None => {
            result.add_message(CmdMessage::info("No processing state recorded."));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProcessingState;
    use tempfile::tempdir;

    #[test]
    fn reports_saved_state() {
        let dir = tempdir().unwrap();
        let tracker = StateTracker::new(dir.path().to_path_buf());
        tracker
            .save(Platform::Youtube, &ProcessingState::failed("id_01", "boom"))
            .unwrap();

        let result = run(&tracker, Some(Platform::Youtube)).unwrap();
        let state = result.state.unwrap();
        assert_eq!(state.episode_id, "id_01");
        assert_eq!(result.messages.len(), 2);
    }

    #[test]
    fn reports_absence_without_failing() {
        let dir = tempdir().unwrap();
        let tracker = StateTracker::new(dir.path().to_path_buf());
        let result = run(&tracker, None).unwrap();
        assert!(result.state.is_none());
    }
}
