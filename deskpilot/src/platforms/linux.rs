use super::process::{run_checked, spawn_detached};
use super::{AppTarget, DesktopEngine, BROWSER_START_URL};
use crate::AutomationError;
use std::path::{Path, PathBuf};
use tracing::info;

/// X11 desktop driven through `xdg-open` and `xdotool`.
pub struct LinuxEngine {
    home_dir: PathBuf,
}

impl LinuxEngine {
    pub fn new(home_dir: &Path) -> Self {
        Self {
            home_dir: home_dir.to_path_buf(),
        }
    }
}

impl DesktopEngine for LinuxEngine {
    fn launch_app(&self, target: AppTarget) -> Result<(), AutomationError> {
        info!("Opening application on Linux: {}", target);
        match target {
            AppTarget::Browser => spawn_detached("xdg-open", &[BROWSER_START_URL]),
            AppTarget::FileManager => {
                let home = self.home_dir.to_string_lossy().into_owned();
                spawn_detached("xdg-open", &[home.as_str()])
            }
            AppTarget::TextEditor => spawn_detached("gedit", &[]),
            AppTarget::Terminal => spawn_detached("x-terminal-emulator", &[]),
        }
    }

    fn open_file(&self, path: &Path) -> Result<(), AutomationError> {
        let path = path.to_string_lossy().into_owned();
        info!("Opening file with xdg-open: {}", path);
        spawn_detached("xdg-open", &[path.as_str()])
    }

    fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        run_checked("xdotool", &["type", "--delay", "30", "--", text])
    }

    fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        let keysym = keysym(key);
        run_checked("xdotool", &["key", "--", keysym.as_str()])
    }

    fn hotkey(&self, keys: &[String]) -> Result<(), AutomationError> {
        if keys.is_empty() {
            return Err(AutomationError::InvalidArgument(
                "no keys provided".to_string(),
            ));
        }
        let chord = keys
            .iter()
            .map(|k| keysym(k))
            .collect::<Vec<_>>()
            .join("+");
        run_checked("xdotool", &["key", "--", chord.as_str()])
    }
}

/// Translate a key name into the X keysym xdotool expects.
fn keysym(key: &str) -> String {
    if let Some(n) = key.strip_prefix('f').filter(|n| n.parse::<u8>().is_ok()) {
        return format!("F{}", n);
    }
    let name = match key {
        "enter" | "return" => "Return",
        "esc" | "escape" => "Escape",
        "tab" => "Tab",
        "space" => "space",
        "backspace" => "BackSpace",
        "delete" | "del" => "Delete",
        "up" => "Up",
        "down" => "Down",
        "left" => "Left",
        "right" => "Right",
        "home" => "Home",
        "end" => "End",
        "pageup" => "Prior",
        "pagedown" => "Next",
        "ctrl" | "control" => "ctrl",
        "alt" => "alt",
        "shift" => "shift",
        "win" | "super" | "cmd" | "meta" => "super",
        other => other,
    };
    name.to_string()
}
