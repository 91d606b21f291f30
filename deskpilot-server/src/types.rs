use deskpilot::CommandEntry;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of `POST /api/command`. Every field is optional so a sparse body
/// reaches the token and validation checks instead of failing to decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub source: Option<String>, // "text", "voice", anything else is "unknown"

    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub ok: bool,
    pub entry: CommandEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogsResponse {
    pub ok: bool,
    /// Newest first.
    pub logs: Vec<CommandEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub status: String,
    pub version: String,
    pub entries: usize,
    pub auth_enabled: bool,
}
