use anyhow::Result;
use clap::Parser;
use deskpilot::{platforms, CommandQueue, Config, TokenGuard};
use deskpilot_server::{build_router, utils, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "deskpilot-server")]
#[command(about = "Drive this desktop with short text or voice commands from a phone browser")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Shared token clients must send; leave unset to disable the check
    #[arg(long, env = "REMOTE_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Number of recent commands kept in the log
    #[arg(long, env = "MAX_LOG_ENTRIES", default_value = "100")]
    max_log_entries: usize,

    /// Directory relative file paths resolve against (defaults to home)
    #[arg(long, env = "DESKPILOT_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Enable CORS for all origins
    #[arg(long)]
    cors: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    utils::init_logging()?;

    info!("🚀 Starting deskpilot-server v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::new(args.token).with_max_log_entries(args.max_log_entries);
    if let Some(dir) = args.base_dir {
        config = config.with_base_dir(dir);
    }

    let engine = platforms::create_engine(&config.resolved_home_dir())?;
    let state = AppState {
        queue: Arc::new(CommandQueue::from_config(&config, engine)),
        guard: TokenGuard::new(config.token.clone()),
    };

    info!("🔧 Files resolve against {}", config.resolved_base_dir().display());
    info!("🔧 Keeping the last {} commands", config.max_log_entries);
    info!("🔧 CORS: {}", if args.cors { "enabled" } else { "disabled" });
    if state.guard.is_enabled() {
        info!("🔒 Security enabled: clients must send REMOTE_API_TOKEN");
    } else {
        warn!("🔓 No token configured: anyone on the network can send commands");
    }

    let app = build_router(state, args.cors);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("✅ Server listening on http://{}", addr);
    info!("🖥️  Open on desktop: http://127.0.0.1:{}", args.port);
    info!("📱 Open on phone  : http://{}:{}", utils::local_ip(), args.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    info!("Shutting down deskpilot-server");

    Ok(())
}
