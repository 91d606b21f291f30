//! HTTP surface for submitting desktop commands and polling the log

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod types;
pub mod utils;

pub use api::AppState;

/// Build the router. With `cors` set, any origin may call the API.
pub fn build_router(state: AppState, cors: bool) -> Router {
    let app = Router::new()
        // Health check
        .route("/api/health", get(api::health))
        // Command intake and log polling
        .route("/api/command", post(api::submit_command))
        .route("/api/logs", get(api::get_logs))
        // Shared state
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}
