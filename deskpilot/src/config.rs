//! Process-wide settings, read once at startup

use std::path::PathBuf;

use crate::guard::normalize_token;

/// Number of log entries retained when nothing else is configured.
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret. `None` disables authorization.
    pub token: Option<String>,
    /// How many of the most recent entries the log keeps (at least 1).
    pub max_log_entries: usize,
    /// Directory that relative paths in file commands resolve against.
    /// Falls back to the home directory.
    pub base_dir: Option<PathBuf>,
    /// Directory `~` expands to. Falls back to the current user's home.
    pub home_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            max_log_entries: DEFAULT_MAX_LOG_ENTRIES,
            base_dir: None,
            home_dir: None,
        }
    }
}

impl Config {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: normalize_token(token),
            ..Default::default()
        }
    }

    pub fn with_max_log_entries(mut self, max: usize) -> Self {
        self.max_log_entries = max.max(1);
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Home directory used for `~` expansion.
    pub fn resolved_home_dir(&self) -> PathBuf {
        self.home_dir
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory used for relative file paths.
    pub fn resolved_base_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .unwrap_or_else(|| self.resolved_home_dir())
    }
}
