//! Log entry types shared between the queue and the HTTP surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Channel a command arrived through. Only used to annotate the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandSource {
    Text,
    Voice,
    Unknown,
}

impl CommandSource {
    /// Maps a free-form client label onto a source. Anything other than
    /// `text` or `voice` (case-insensitive) is `Unknown`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("text") => CommandSource::Text,
            Some("voice") => CommandSource::Voice,
            _ => CommandSource::Unknown,
        }
    }
}

impl fmt::Display for CommandSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CommandSource::Text => "text",
            CommandSource::Voice => "voice",
            CommandSource::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Lifecycle of an entry: `Pending` moves once to `Done` or `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Pending,
    Done,
    Error,
}

impl CommandStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, CommandStatus::Pending)
    }
}

/// Final status and message produced by the executor for one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: CommandStatus,
    pub output: String,
}

impl Outcome {
    pub fn done(output: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Done,
            output: output.into(),
        }
    }

    pub fn error(output: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            output: output.into(),
        }
    }
}

/// One submitted command and its execution outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub id: u64,
    pub text: String,
    pub source: CommandSource,
    pub status: CommandStatus,
    pub output: String,
    pub created_at: DateTime<Utc>,
}

impl CommandEntry {
    pub(crate) fn pending(id: u64, text: &str, source: CommandSource) -> Self {
        Self {
            id,
            text: text.to_string(),
            source,
            status: CommandStatus::Pending,
            output: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Applies the executor's outcome. Returns `false` and leaves the entry
    /// untouched if it already reached a terminal status or if the outcome
    /// itself is not terminal.
    pub(crate) fn complete(&mut self, outcome: Outcome) -> bool {
        if self.status.is_terminal() || !outcome.status.is_terminal() {
            return false;
        }
        self.status = outcome.status;
        self.output = outcome.output;
        true
    }
}
