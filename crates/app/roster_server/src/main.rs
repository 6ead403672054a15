//! Roster HTTP server binary.
//!
//! Reads token and account settings from the environment (a `.env` file is
//! honoured), opens the SQLite store, runs migrations and serves until Ctrl-C.

use clap::Parser;
use roster_api::AppState;
use roster_api::config::ApiConfig;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "roster_server", about = "Roster employee records server")]
struct Args {
    /// Interface to bind. Overrides `BIND_ADDR` together with `--port`.
    #[arg(long, env = "ROSTER_HOST")]
    host: Option<String>,

    /// Port to listen on (0 = ephemeral). Overrides `BIND_ADDR` together with `--host`.
    #[arg(long, env = "ROSTER_PORT")]
    port: Option<u16>,

    /// SQLite connection URL. The file is created when missing.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://roster.db")]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// `--host`/`--port` win over the configured address; a missing half falls
/// back to the default host or port.
fn bind_addr(args: &Args, configured: &str) -> String {
    match (&args.host, args.port) {
        (None, None) => configured.to_string(),
        (host, port) => format!(
            "{}:{}",
            host.as_deref().unwrap_or(DEFAULT_HOST),
            port.unwrap_or(DEFAULT_PORT)
        ),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,roster_api=debug,roster_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, "starting roster_server");

    // Token settings are mandatory; refuse to start without them.
    let mut config = ApiConfig::from_env()?;
    config.bind_addr = bind_addr(&args, &config.bind_addr);
    config.database_url = args.database_url;

    info!(max_connections = args.max_connections, "opening database");
    let pool = roster_core::db::open(&config.database_url, args.max_connections).await?;

    let state = AppState::new(pool, config.clone())?;
    let app = roster_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "listening");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, shutting down");
            }
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(host: Option<&str>, port: Option<u16>) -> Args {
        Args {
            host: host.map(str::to_string),
            port,
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
        }
    }

    #[test]
    fn configured_address_is_kept_without_flags() {
        assert_eq!("0.0.0.0:9000", bind_addr(&args(None, None), "0.0.0.0:9000"));
    }

    #[test]
    fn flags_override_configured_address() {
        assert_eq!(
            "0.0.0.0:3000",
            bind_addr(&args(Some("0.0.0.0"), Some(3000)), "127.0.0.1:9000")
        );
        assert_eq!(
            "127.0.0.1:3000",
            bind_addr(&args(None, Some(3000)), "10.0.0.1:9000")
        );
        assert_eq!(
            "0.0.0.0:8080",
            bind_addr(&args(Some("0.0.0.0"), None), "10.0.0.1:9000")
        );
    }
}
