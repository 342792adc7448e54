//! Business logic for each CLI command. Pure with respect to the terminal:
//! commands take stores and generators, return [`CmdResult`], and never touch
//! stdout or exit codes.

use crate::model::Episode;
use crate::state::ProcessingState;

pub mod add;
pub mod cleanup;
pub mod list;
pub mod process;
pub mod status;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured outcome of a command, rendered by the CLI layer.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    /// Episodes the command created, touched, or listed.
    pub episodes: Vec<Episode>,
    /// Current processing state, when the command reports one.
    pub state: Option<ProcessingState>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}
