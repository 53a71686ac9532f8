//! parlord - line-oriented TCP chat relay daemon.
//!
//! Clients register a unique screen name over a SUBMITNAME/NAMEACCEPTED
//! handshake, then exchange newline-delimited messages relayed to every
//! connected session.

mod activity;
mod config;
mod network;
mod state;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::activity::{ActivityLog, NoopLog, TracingLog, Transcript};
use crate::config::Config;
use crate::network::Listener;
use crate::state::Roster;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).map_err(|e| {
            error!(path = %config_path, error = %e, "Failed to load config");
            e
        })?
    } else {
        info!(path = %config_path, "Config file not found, using defaults");
        Config::default()
    };

    info!(
        server = %config.server.name,
        address = %config.listen.address,
        "Starting parlord"
    );

    // Select the activity log sink
    let activity: Arc<dyn ActivityLog> = match config.activity.sink.as_str() {
        "none" => Arc::new(NoopLog),
        "memory" => Arc::new(Transcript::new()),
        "log" => Arc::new(TracingLog),
        other => {
            info!(sink = %other, "Unknown activity sink, using 'log'");
            Arc::new(TracingLog)
        }
    };

    let roster = Arc::new(Roster::new());

    let listener = Listener::bind(
        config.listen.address,
        Arc::clone(&roster),
        Arc::clone(&activity),
    )
    .await?;
    let local_addr = listener.local_addr()?;

    // Seed the activity stream the way log viewers expect: a running
    // banner, then the day marker.
    activity.banner(&format!("{} running on {}", config.server.name, local_addr));
    activity.banner(&parlor_proto::date_banner());

    listener.run().await?;

    Ok(())
}
