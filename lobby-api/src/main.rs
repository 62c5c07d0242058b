//! lobby-api - ProductLobby API service entry point
//!
//! Opens (or creates) the SQLite database in the resolved data folder,
//! loads operational settings, and serves the HTTP API.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;

use lobby_api::{build_router, AppState};

/// Command-line arguments for lobby-api
#[derive(Parser, Debug)]
#[command(name = "lobby-api")]
#[command(about = "ProductLobby demand-aggregation API service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the http_port setting)
    #[arg(short, long, env = "PRODUCTLOBBY_PORT")]
    port: Option<u16>,

    /// Data folder containing productlobby.db
    #[arg(short, long, env = "PRODUCTLOBBY_DATA_FOLDER")]
    data_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting ProductLobby API (lobby-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // 4-tier data folder resolution: CLI arg, env var, config file, OS default
    let data_folder = lobby_common::config::resolve_data_folder(
        args.data_folder.as_deref(),
        "PRODUCTLOBBY_DATA_FOLDER",
    )?;
    let db_path = lobby_common::config::ensure_data_folder(&data_folder)?;
    info!("Database path: {}", db_path.display());

    let pool = lobby_common::db::init::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;
    info!("✓ Database initialized");

    let http_port = match args.port {
        Some(p) => p,
        None => {
            let value = lobby_common::config::setting_i64(&pool, "http_port", 5730).await?;
            validate_port(value).with_context(|| format!("Invalid http_port setting: {}", value))?
        }
    };

    let state = AppState::load(pool).await?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("lobby-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// A stored port must be a non-zero u16; anything else is a config mistake
fn validate_port(value: i64) -> Option<u16> {
    u16::try_from(value).ok().filter(|p| *p > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_port_accepts_valid_range() {
        assert_eq!(validate_port(5730), Some(5730));
        assert_eq!(validate_port(1), Some(1));
        assert_eq!(validate_port(65535), Some(65535));
    }

    #[test]
    fn test_validate_port_rejects_out_of_range() {
        assert_eq!(validate_port(0), None);
        assert_eq!(validate_port(65536), None);
        assert_eq!(validate_port(-1), None);
    }
}
