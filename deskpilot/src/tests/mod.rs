
use crate::platforms::{AppTarget, DesktopEngine};
use crate::AutomationError;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Mutex;

// Initialize tracing for tests
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Launch(AppTarget),
    OpenFile(PathBuf),
    Type(String),
    Press(String),
    Hotkey(Vec<String>),
}

/// Fake desktop that records every call instead of touching the session.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    fail_with: Option<String>,
    /// When set, each call reports on `started` and then waits for `release`.
    gate: Option<(Mutex<Sender<()>>, Mutex<Receiver<()>>)>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn gated(started: Sender<()>, release: Receiver<()>) -> Self {
        Self {
            gate: Some((Mutex::new(started), Mutex::new(release))),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: EngineCall) -> Result<(), AutomationError> {
        if let Some((started, release)) = &self.gate {
            started.lock().unwrap().send(()).unwrap();
            release.lock().unwrap().recv().unwrap();
        }
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(AutomationError::PlatformError(message.clone())),
            None => Ok(()),
        }
    }
}

impl DesktopEngine for RecordingEngine {
    fn launch_app(&self, target: AppTarget) -> Result<(), AutomationError> {
        self.record(EngineCall::Launch(target))
    }

    fn open_file(&self, path: &Path) -> Result<(), AutomationError> {
        self.record(EngineCall::OpenFile(path.to_path_buf()))
    }

    fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        self.record(EngineCall::Type(text.to_string()))
    }

    fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        self.record(EngineCall::Press(key.to_string()))
    }

    fn hotkey(&self, keys: &[String]) -> Result<(), AutomationError> {
        self.record(EngineCall::Hotkey(keys.to_vec()))
    }
}
