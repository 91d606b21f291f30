use super::process::{run_checked, spawn_detached};
use super::{AppTarget, DesktopEngine, BROWSER_START_URL};
use crate::AutomationError;
use std::path::{Path, PathBuf};
use tracing::info;

/// macOS desktop driven through `open` and System Events via `osascript`.
pub struct MacOSEngine {
    home_dir: PathBuf,
}

impl MacOSEngine {
    pub fn new(home_dir: &Path) -> Self {
        Self {
            home_dir: home_dir.to_path_buf(),
        }
    }

    fn system_events(&self, statement: &str) -> Result<(), AutomationError> {
        let script = format!("tell application \"System Events\" to {}", statement);
        run_checked("osascript", &["-e", script.as_str()])
    }
}

impl DesktopEngine for MacOSEngine {
    fn launch_app(&self, target: AppTarget) -> Result<(), AutomationError> {
        info!("Opening application on macOS: {}", target);
        match target {
            AppTarget::Browser => spawn_detached("open", &[BROWSER_START_URL]),
            AppTarget::FileManager => {
                let home = self.home_dir.to_string_lossy().into_owned();
                spawn_detached("open", &[home.as_str()])
            }
            AppTarget::TextEditor => spawn_detached("open", &["-a", "TextEdit"]),
            AppTarget::Terminal => spawn_detached("open", &["-a", "Terminal"]),
        }
    }

    fn open_file(&self, path: &Path) -> Result<(), AutomationError> {
        let path = path.to_string_lossy().into_owned();
        info!("Opening file with open: {}", path);
        spawn_detached("open", &[path.as_str()])
    }

    fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        self.system_events(&format!("keystroke \"{}\"", escape_applescript(text)))
    }

    fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        self.system_events(&key_statement(key, &[]))
    }

    fn hotkey(&self, keys: &[String]) -> Result<(), AutomationError> {
        let Some((last, modifiers)) = keys.split_last() else {
            return Err(AutomationError::InvalidArgument(
                "no keys provided".to_string(),
            ));
        };
        let modifiers = modifiers
            .iter()
            .map(|m| modifier(m))
            .collect::<Result<Vec<_>, _>>()?;
        self.system_events(&key_statement(last, &modifiers))
    }
}

fn key_statement(key: &str, modifiers: &[&str]) -> String {
    let action = match key_code(key) {
        Some(code) => format!("key code {}", code),
        None => format!("keystroke \"{}\"", escape_applescript(key)),
    };
    if modifiers.is_empty() {
        action
    } else {
        format!("{} using {{{}}}", action, modifiers.join(", "))
    }
}

fn key_code(key: &str) -> Option<u8> {
    let code = match key {
        "enter" | "return" => 36,
        "tab" => 48,
        "space" => 49,
        "backspace" | "delete" => 51,
        "esc" | "escape" => 53,
        "left" => 123,
        "right" => 124,
        "down" => 125,
        "up" => 126,
        _ => return None,
    };
    Some(code)
}

fn modifier(key: &str) -> Result<&'static str, AutomationError> {
    match key {
        "ctrl" | "control" => Ok("control down"),
        "cmd" | "command" | "win" | "super" | "meta" => Ok("command down"),
        "alt" | "option" => Ok("option down"),
        "shift" => Ok("shift down"),
        other => Err(AutomationError::InvalidArgument(format!(
            "'{}' is not a modifier key",
            other
        ))),
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
