use super::process::{run_checked, spawn_detached};
use super::{AppTarget, DesktopEngine, BROWSER_START_URL};
use crate::AutomationError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Windows desktop driven through `cmd`, `explorer` and PowerShell.
pub struct WindowsEngine {
    home_dir: PathBuf,
}

impl WindowsEngine {
    pub fn new(home_dir: &Path) -> Self {
        Self {
            home_dir: home_dir.to_path_buf(),
        }
    }

    fn powershell(&self, command: &str) -> Result<(), AutomationError> {
        run_checked(
            "powershell",
            &["-NoProfile", "-WindowStyle", "hidden", "-Command", command],
        )
    }

    fn send_keys(&self, keys: &str) -> Result<(), AutomationError> {
        let command = format!(
            "(New-Object -ComObject WScript.Shell).SendKeys({})",
            quote_literal(keys)
        );
        self.powershell(&command)
    }
}

impl DesktopEngine for WindowsEngine {
    fn launch_app(&self, target: AppTarget) -> Result<(), AutomationError> {
        info!("Opening application on Windows: {}", target);
        match target {
            AppTarget::Browser => spawn_detached("cmd", &["/C", "start", "", BROWSER_START_URL]),
            AppTarget::FileManager => {
                let home = self.home_dir.to_string_lossy().into_owned();
                spawn_detached("explorer", &[home.as_str()])
            }
            AppTarget::TextEditor => spawn_detached("notepad", &[]),
            AppTarget::Terminal => spawn_detached("cmd", &["/C", "start", "", "cmd"]),
        }
    }

    fn open_file(&self, path: &Path) -> Result<(), AutomationError> {
        // -LiteralPath stops wildcard matching, the single-quoted string
        // stops `$` expansion.
        let command = format!(
            "Invoke-Item -LiteralPath {}",
            quote_literal(&path.to_string_lossy())
        );
        info!("Running command to open file: {}", command);
        self.powershell(&command)
    }

    fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        self.send_keys(&escape_send_keys(text))
    }

    fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        self.send_keys(&send_keys_name(key))
    }

    fn hotkey(&self, keys: &[String]) -> Result<(), AutomationError> {
        let Some((last, modifiers)) = keys.split_last() else {
            return Err(AutomationError::InvalidArgument(
                "no keys provided".to_string(),
            ));
        };
        let mut sequence = String::new();
        for m in modifiers {
            sequence.push_str(modifier(m)?);
        }
        sequence.push_str(&send_keys_name(last));
        self.send_keys(&sequence)
    }
}

fn modifier(key: &str) -> Result<&'static str, AutomationError> {
    match key {
        "ctrl" | "control" => Ok("^"),
        "alt" => Ok("%"),
        "shift" => Ok("+"),
        // SendKeys has no code for the Windows key.
        "win" | "super" | "cmd" | "meta" => Err(AutomationError::InvalidArgument(format!(
            "'{}' cannot be held as a modifier on Windows",
            key
        ))),
        other => Err(AutomationError::InvalidArgument(format!(
            "'{}' is not a modifier key",
            other
        ))),
    }
}

fn send_keys_name(key: &str) -> String {
    match key {
        "enter" | "return" => "{ENTER}".to_string(),
        "tab" => "{TAB}".to_string(),
        "esc" | "escape" => "{ESC}".to_string(),
        "backspace" => "{BACKSPACE}".to_string(),
        "delete" | "del" => "{DELETE}".to_string(),
        "space" => " ".to_string(),
        "up" => "{UP}".to_string(),
        "down" => "{DOWN}".to_string(),
        "left" => "{LEFT}".to_string(),
        "right" => "{RIGHT}".to_string(),
        "home" => "{HOME}".to_string(),
        "end" => "{END}".to_string(),
        "pageup" => "{PGUP}".to_string(),
        "pagedown" => "{PGDN}".to_string(),
        // Ctrl+Esc opens the Start menu, the same as a lone Windows key press.
        "win" | "super" => "^{ESC}".to_string(),
        other => match other.strip_prefix('f') {
            Some(n) if n.parse::<u8>().is_ok() => format!("{{F{}}}", n),
            _ => escape_send_keys(other),
        },
    }
}

/// Single-quoted PowerShell literal: no `$` or backtick expansion. PowerShell
/// also ends the string on the typographic single quotes, so every quote
/// character is doubled.
fn quote_literal(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        if matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}') {
            quoted.push(c);
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// SendKeys treats `+^%~(){}[]` as control characters; wrap them in braces.
fn escape_send_keys(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '+' | '^' | '%' | '~' | '(' | ')' | '{' | '}' | '[' | ']' => {
                escaped.push('{');
                escaped.push(c);
                escaped.push('}');
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
