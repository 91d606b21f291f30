//! Runs parsed actions against the desktop engine

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::parser::ParsedAction;
use crate::platforms::{AppTarget, DesktopEngine};
use crate::types::Outcome;
use crate::AutomationError;

pub struct ActionExecutor {
    engine: Arc<dyn DesktopEngine>,
    base_dir: PathBuf,
    home_dir: PathBuf,
}

impl ActionExecutor {
    /// `base_dir` anchors relative file paths, `home_dir` is what `~`
    /// expands to.
    pub fn new(engine: Arc<dyn DesktopEngine>, base_dir: PathBuf, home_dir: PathBuf) -> Self {
        Self {
            engine,
            base_dir,
            home_dir,
        }
    }

    /// Execute an action and turn the result into a terminal outcome.
    /// Failures never escape: they become an `error` outcome carrying the
    /// error message.
    #[instrument(skip(self, action), fields(kind = action.kind()))]
    pub fn execute(&self, action: &ParsedAction) -> Outcome {
        match self.run(action) {
            Ok(output) => {
                debug!("action succeeded: {}", output);
                Outcome::done(output)
            }
            Err(e) => {
                warn!("action failed: {}", e);
                Outcome::error(e.to_string())
            }
        }
    }

    fn run(&self, action: &ParsedAction) -> Result<String, AutomationError> {
        match action {
            ParsedAction::OpenApp(name) => {
                let target = AppTarget::from_name(name)
                    .ok_or_else(|| AutomationError::UnsupportedTarget(name.clone()))?;
                self.engine.launch_app(target)?;
                Ok(format!("opened {}", target))
            }
            ParsedAction::TypeText(text) => {
                if text.is_empty() {
                    return Err(AutomationError::InvalidArgument(
                        "nothing to type".to_string(),
                    ));
                }
                self.engine.type_text(text)?;
                Ok(format!("typed text ({} chars)", text.chars().count()))
            }
            ParsedAction::PressKey(key) => {
                self.engine.press_key(key)?;
                Ok(format!("pressed {}", key))
            }
            ParsedAction::Hotkey(keys) => {
                if keys.is_empty() {
                    return Err(AutomationError::InvalidArgument(
                        "no keys provided".to_string(),
                    ));
                }
                self.engine.hotkey(keys)?;
                Ok(format!("pressed hotkey {}", keys.join("+")))
            }
            ParsedAction::CreateFile(path) => self.create_file(path),
            ParsedAction::OpenFile(path) => self.open_file(path),
            ParsedAction::Unrecognized(_) => Err(AutomationError::UnrecognizedCommand),
        }
    }

    fn create_file(&self, path: &str) -> Result<String, AutomationError> {
        let resolved = self.resolve_path(path)?;
        // create_new makes the existence check and the creation one step.
        let output = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&resolved)
        {
            Ok(_) => format!("created file {}", path),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !resolved.is_file() {
                    return Err(AutomationError::InvalidArgument(format!(
                        "'{}' is a directory",
                        path
                    )));
                }
                format!("file already exists: {}", path)
            }
            Err(e) => {
                return Err(AutomationError::PlatformError(format!(
                    "failed to create '{}': {}",
                    resolved.display(),
                    e
                )))
            }
        };
        // The file exists either way; failing to show it does not undo that.
        if let Err(e) = self.engine.open_file(&resolved) {
            warn!("created '{}' but could not open it: {}", resolved.display(), e);
        }
        Ok(output)
    }

    fn open_file(&self, path: &str) -> Result<String, AutomationError> {
        let resolved = self.resolve_path(path)?;
        if !resolved.exists() {
            return Err(AutomationError::FileNotFound(
                resolved.display().to_string(),
            ));
        }
        self.engine.open_file(&resolved)?;
        Ok(format!("opened file {}", resolved.display()))
    }

    /// Expand a leading `~` and anchor relative paths at the base directory.
    pub fn resolve_path(&self, path: &str) -> Result<PathBuf, AutomationError> {
        if path.is_empty() {
            return Err(AutomationError::InvalidArgument(
                "missing file name".to_string(),
            ));
        }
        let expanded = expand_home(path, &self.home_dir);
        if expanded.is_absolute() {
            Ok(expanded)
        } else {
            Ok(self.base_dir.join(expanded))
        }
    }
}

fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path
        .strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
    {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}
