use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use deskpilot::{CommandError, CommandQueue, CommandSource, TokenGuard};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::types::{CommandRequest, CommandResponse, ErrorResponse, HealthResponse, LogsResponse};

/// Header carrying the shared token.
pub const TOKEN_HEADER: &str = "x-remote-token";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<CommandQueue>,
    pub guard: TokenGuard,
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized request.".to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (
            status,
            Json(ErrorResponse {
                ok: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<CommandError> for ApiError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Unauthorized => ApiError::Unauthorized,
            CommandError::Validation(message) => ApiError::BadRequest(message),
            CommandError::Execution(e) => ApiError::Internal(e.to_string()),
        }
    }
}

fn header_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok())
}

// ============================================================================
// Health Check
// ============================================================================

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        entries: state.queue.len(),
        auth_enabled: state.guard.is_enabled(),
    })
}

// ============================================================================
// Submit Command
// ============================================================================

/// `POST /api/command`. A command that fails on the desktop is still a
/// successful request: the entry comes back with status `error`.
pub async fn submit_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Treating unreadable command body as empty: {}", rejection);
            CommandRequest::default()
        }
    };

    if !state
        .guard
        .authorize_any([header_token(&headers), request.token.as_deref()])
    {
        warn!("Rejected POST /api/command: bad or missing token");
        return Err(CommandError::Unauthorized.into());
    }

    let source = CommandSource::from_label(request.source.as_deref());
    let text = request.text.unwrap_or_default();
    info!("📥 POST /api/command - source: {}", source);

    // Desktop actions block, keep them off the async workers.
    let queue = state.queue.clone();
    let entry = tokio::task::spawn_blocking(move || queue.submit(&text, source))
        .await
        .map_err(|e| {
            error!("Command worker panicked: {}", e);
            ApiError::Internal(format!("command worker failed: {}", e))
        })??;

    info!("✅ Command #{} finished: {:?}", entry.id, entry.status);

    Ok(Json(CommandResponse { ok: true, entry }))
}

// ============================================================================
// Logs
// ============================================================================

/// `GET /api/logs`. Token via header only; entries newest first.
pub async fn get_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogsResponse>, ApiError> {
    if !state.guard.authorize(header_token(&headers)) {
        warn!("Rejected GET /api/logs: bad or missing token");
        return Err(ApiError::Unauthorized);
    }

    let mut logs = state.queue.list();
    logs.reverse();

    Ok(Json(LogsResponse { ok: true, logs }))
}
