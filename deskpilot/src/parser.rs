//! Free-text command parsing
//!
//! Commands are matched case-insensitively and word by word, so a keyword
//! never matches the prefix of a longer word (`typewriter` is not `type`).
//! Rules are tried from the most specific to the least specific; the first
//! one that matches decides the action.

/// Structured interpretation of a command's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAction {
    OpenApp(String),
    TypeText(String),
    PressKey(String),
    Hotkey(Vec<String>),
    CreateFile(String),
    OpenFile(String),
    Unrecognized(String),
}

impl ParsedAction {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ParsedAction::OpenApp(_) => "open_app",
            ParsedAction::TypeText(_) => "type_text",
            ParsedAction::PressKey(_) => "press_key",
            ParsedAction::Hotkey(_) => "hotkey",
            ParsedAction::CreateFile(_) => "create_file",
            ParsedAction::OpenFile(_) => "open_file",
            ParsedAction::Unrecognized(_) => "unrecognized",
        }
    }
}

/// Whole-command phrases, compared after lower-casing and collapsing
/// whitespace.
const PHRASES: &[(&str, Phrase)] = &[
    ("open browser", Phrase::App("browser")),
    ("open chrome", Phrase::App("browser")),
    ("launch browser", Phrase::App("browser")),
    ("open file manager", Phrase::App("file manager")),
    ("open files", Phrase::App("file manager")),
    ("open notepad", Phrase::App("text editor")),
    ("open editor", Phrase::App("text editor")),
    ("open terminal", Phrase::App("terminal")),
    ("enter", Phrase::Key("enter")),
    ("press enter", Phrase::Key("enter")),
    ("copy", Phrase::Chord(&["ctrl", "c"])),
    ("ctrl c", Phrase::Chord(&["ctrl", "c"])),
    ("paste", Phrase::Chord(&["ctrl", "v"])),
    ("ctrl v", Phrase::Chord(&["ctrl", "v"])),
    ("save", Phrase::Chord(&["ctrl", "s"])),
    ("ctrl s", Phrase::Chord(&["ctrl", "s"])),
];

/// Alternative spellings accepted after `open`/`launch`.
const APP_ALIASES: &[(&str, &str)] = &[
    ("chrome", "browser"),
    ("web browser", "browser"),
    ("files", "file manager"),
    ("explorer", "file manager"),
    ("finder", "file manager"),
    ("notepad", "text editor"),
    ("editor", "text editor"),
    ("console", "terminal"),
];

#[derive(Debug, Clone, Copy)]
enum Phrase {
    App(&'static str),
    Key(&'static str),
    Chord(&'static [&'static str]),
}

impl Phrase {
    fn to_action(self) -> ParsedAction {
        match self {
            Phrase::App(target) => ParsedAction::OpenApp(target.to_string()),
            Phrase::Key(key) => ParsedAction::PressKey(key.to_string()),
            Phrase::Chord(keys) => {
                ParsedAction::Hotkey(keys.iter().map(|k| k.to_string()).collect())
            }
        }
    }
}

/// Maps a command string onto an action. Never fails: text that matches no
/// rule becomes [`ParsedAction::Unrecognized`] carrying the original text.
pub fn parse(text: &str) -> ParsedAction {
    let trimmed = text.trim();
    let normalized = trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if let Some((_, phrase)) = PHRASES.iter().find(|(p, _)| *p == normalized) {
        return phrase.to_action();
    }

    if let Some(path) = strip_keyword(trimmed, &["create", "file"]) {
        return ParsedAction::CreateFile(path.trim().to_string());
    }

    if let Some(path) = strip_keyword(trimmed, &["open", "file"]) {
        return ParsedAction::OpenFile(path.trim().to_string());
    }

    if let Some(name) =
        strip_keyword(trimmed, &["open"]).or_else(|| strip_keyword(trimmed, &["launch"]))
    {
        if !name.is_empty() {
            return ParsedAction::OpenApp(canonical_app_name(name));
        }
    }

    if let Some(rest) = strip_keyword(trimmed, &["type"]) {
        return ParsedAction::TypeText(rest.to_string());
    }

    if let Some(rest) = strip_keyword(trimmed, &["press"]) {
        let mut tokens = rest.split_whitespace();
        if let (Some(key), None) = (tokens.next(), tokens.next()) {
            return ParsedAction::PressKey(key.to_lowercase());
        }
    }

    if let Some(rest) = strip_keyword(trimmed, &["hotkey"]) {
        let keys = rest
            .split('+')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        return ParsedAction::Hotkey(keys);
    }

    ParsedAction::Unrecognized(text.to_string())
}

/// Strips a sequence of whole-word keywords from the start of `text`,
/// returning whatever follows with leading whitespace removed.
fn strip_keyword<'a>(text: &'a str, keywords: &[&str]) -> Option<&'a str> {
    let mut rest = text.trim_start();
    for word in keywords {
        let head = rest.get(..word.len())?;
        if !head.eq_ignore_ascii_case(word) {
            return None;
        }
        let tail = &rest[word.len()..];
        if !(tail.is_empty() || tail.starts_with(char::is_whitespace)) {
            return None;
        }
        rest = tail.trim_start();
    }
    Some(rest)
}

fn canonical_app_name(name: &str) -> String {
    let name = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    APP_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, target)| target.to_string())
        .unwrap_or(name)
}
