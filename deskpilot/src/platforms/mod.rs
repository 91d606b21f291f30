use crate::AutomationError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

mod process;

/// Applications the executor is allowed to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTarget {
    Browser,
    FileManager,
    TextEditor,
    Terminal,
}

impl AppTarget {
    pub const ALL: [AppTarget; 4] = [
        AppTarget::Browser,
        AppTarget::FileManager,
        AppTarget::TextEditor,
        AppTarget::Terminal,
    ];

    /// Canonical name as produced by the parser.
    pub fn name(self) -> &'static str {
        match self {
            AppTarget::Browser => "browser",
            AppTarget::FileManager => "file manager",
            AppTarget::TextEditor => "text editor",
            AppTarget::Terminal => "terminal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for AppTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Page the browser target opens on.
pub(crate) const BROWSER_START_URL: &str = "https://www.google.com";

/// The OS-level automation capability the executor drives.
///
/// Implementations simulate input and hand files to the OS. Every method is
/// blocking; the caller decides where it runs.
pub trait DesktopEngine: Send + Sync {
    /// Launch one of the supported applications
    fn launch_app(&self, target: AppTarget) -> Result<(), AutomationError>;

    /// Open an existing file with its default handler
    fn open_file(&self, path: &Path) -> Result<(), AutomationError>;

    /// Type text into whatever currently has focus
    fn type_text(&self, text: &str) -> Result<(), AutomationError>;

    /// Press and release a single named key (`enter`, `tab`, `a`, ...)
    fn press_key(&self, key: &str) -> Result<(), AutomationError>;

    /// Press keys as a chord in the given order, release in reverse
    fn hotkey(&self, keys: &[String]) -> Result<(), AutomationError>;
}

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "windows")]
pub mod windows;

/// Create the appropriate engine for the current platform
///
/// `home_dir` is where the file manager target opens.
pub fn create_engine(home_dir: &Path) -> Result<Arc<dyn DesktopEngine>, AutomationError> {
    #[cfg(target_os = "macos")]
    {
        Ok(Arc::new(macos::MacOSEngine::new(home_dir)))
    }
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::WindowsEngine::new(home_dir)))
    }
    #[cfg(target_os = "linux")]
    {
        Ok(Arc::new(linux::LinuxEngine::new(home_dir)))
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        let _ = home_dir;
        Err(AutomationError::UnsupportedPlatform(
            "Current platform is not supported".to_string(),
        ))
    }
}
