use anyhow::Result;
use std::env;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Stderr logging for the server. `RUST_LOG` directives win when present;
/// otherwise everything at `LOG_LEVEL` and above is shown.
pub fn init_logging() -> Result<()> {
    let fallback = level_from_name(env::var("LOG_LEVEL").ok().as_deref());
    let filter = EnvFilter::builder()
        .with_default_directive(fallback.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

fn level_from_name(name: Option<&str>) -> LevelFilter {
    match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
        Some("error") => LevelFilter::ERROR,
        Some("warn") => LevelFilter::WARN,
        Some("debug") => LevelFilter::DEBUG,
        _ => LevelFilter::INFO,
    }
}

/// Best-effort LAN address for the startup banner.
///
/// Connecting a UDP socket sends nothing; it only makes the OS pick the
/// outbound interface.
pub fn local_ip() -> IpAddr {
    UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("8.8.8.8:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}
