use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use deskpilot::{
    AppTarget, AutomationError, CommandQueue, Config, DesktopEngine, TokenGuard,
};
use deskpilot_server::{api::TOKEN_HEADER, build_router, AppState};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Desktop stand-in: every action succeeds and nothing happens.
struct NullDesktop;

impl DesktopEngine for NullDesktop {
    fn launch_app(&self, _target: AppTarget) -> Result<(), AutomationError> {
        Ok(())
    }

    fn open_file(&self, _path: &Path) -> Result<(), AutomationError> {
        Ok(())
    }

    fn type_text(&self, _text: &str) -> Result<(), AutomationError> {
        Ok(())
    }

    fn press_key(&self, _key: &str) -> Result<(), AutomationError> {
        Ok(())
    }

    fn hotkey(&self, _keys: &[String]) -> Result<(), AutomationError> {
        Ok(())
    }
}

fn app(token: Option<&str>) -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = Config::new(token.map(str::to_string)).with_home_dir(dir.path());
    let state = AppState {
        queue: Arc::new(CommandQueue::from_config(&config, Arc::new(NullDesktop))),
        guard: TokenGuard::new(config.token.clone()),
    };
    (build_router(state, false), dir)
}

fn post_command(body: Value, header_token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/command")
        .header("content-type", "application/json");
    if let Some(token) = header_token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_logs(header_token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/api/logs");
    if let Some(token) = header_token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_open_mode_accepts_requests_without_token() {
    let (app, _dir) = app(None);

    let (status, body) = send(&app, post_command(json!({"text": "open browser", "source": "text"}), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["entry"]["id"], 1);
    assert_eq!(body["entry"]["status"], "done");
    assert_eq!(body["entry"]["output"], "opened browser");
    assert_eq!(body["entry"]["source"], "text");

    let (status, body) = send(&app, get_logs(None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_logs_require_matching_header_token() {
    let (app, _dir) = app(Some("s3cret"));

    let (status, body) = send(&app, get_logs(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, get_logs(Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, get_logs(Some("s3cret"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["logs"], json!([]));
}

#[tokio::test]
async fn test_command_token_via_body_or_header() {
    let (app, _dir) = app(Some("s3cret"));

    let (status, _) = send(&app, post_command(json!({"text": "press tab"}), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        post_command(json!({"text": "press tab", "token": "s3cret"}), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["id"], 1);

    let (status, body) = send(
        &app,
        post_command(json!({"text": "press tab"}), Some("s3cret")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry"]["id"], 2);
}

#[tokio::test]
async fn test_unauthorized_command_never_reaches_log() {
    let (app, _dir) = app(Some("s3cret"));

    let (status, _) = send(
        &app,
        post_command(json!({"text": "open browser", "token": "nope"}), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(&app, get_logs(Some("s3cret"))).await;
    assert_eq!(body["logs"], json!([]));
}

#[tokio::test]
async fn test_empty_text_is_bad_request_and_wastes_no_id() {
    let (app, _dir) = app(None);

    let (status, body) = send(&app, post_command(json!({"text": "   "}), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "command text is required");

    let (status, _) = send(&app, post_command(json!({}), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, post_command(json!({"text": "save"}), None)).await;
    assert_eq!(body["entry"]["id"], 1);
}

#[tokio::test]
async fn test_malformed_body_is_treated_as_empty() {
    let (app, _dir) = app(None);
    let request = Request::builder()
        .method("POST")
        .uri("/api/command")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn test_failed_command_is_still_http_success() {
    let (app, _dir) = app(None);

    let (status, body) = send(&app, post_command(json!({"text": "banana", "source": "voice"}), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["entry"]["status"], "error");
    assert_eq!(body["entry"]["output"], "unrecognized command");
    assert_eq!(body["entry"]["source"], "voice");
}

#[tokio::test]
async fn test_unknown_source_label() {
    let (app, _dir) = app(None);
    let (_, body) = send(&app, post_command(json!({"text": "save", "source": "phone"}), None)).await;
    assert_eq!(body["entry"]["source"], "unknown");
}

#[tokio::test]
async fn test_logs_are_newest_first() {
    let (app, _dir) = app(None);
    for text in ["open browser", "type hello", "banana"] {
        send(&app, post_command(json!({"text": text}), None)).await;
    }

    let (_, body) = send(&app, get_logs(None)).await;
    let ids: Vec<u64> = body["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_create_file_twice_over_http() {
    let (app, dir) = app(None);

    let (_, first) = send(&app, post_command(json!({"text": "create file notes.txt"}), None)).await;
    assert_eq!(first["entry"]["status"], "done");
    assert_eq!(first["entry"]["output"], "created file notes.txt");

    let (_, second) = send(&app, post_command(json!({"text": "create file notes.txt"}), None)).await;
    assert_eq!(second["entry"]["status"], "done");
    assert_eq!(second["entry"]["output"], "file already exists: notes.txt");
    assert!(dir.path().join("notes.txt").is_file());
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let (app, _dir) = app(Some("s3cret"));
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["auth_enabled"], true);
    assert_eq!(body["entries"], 0);
}
