//! # Crewbook Server Entry Point
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Server Startup                                    │
//! │                                                                         │
//! │  1. Initialize Logging ──────── RUST_LOG or info,crewbook=debug        │
//! │  2. Load ServerConfig ───────── CREWBOOK_* environment variables       │
//! │  3. Open Database ───────────── SQLite (WAL), pending migrations       │
//! │  4. Build Router ────────────── AppState shared by every handler       │
//! │  5. Serve ───────────────────── until Ctrl+C / SIGTERM                 │
//! │  6. Close Database ──────────── flush WAL, release the file            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing::{error, info};

use crewbook_db::{Database, DbConfig};
use crewbook_server::{build_router, init_tracing, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("Starting Crewbook server...");

    let config = ServerConfig::load()?;
    info!(
        addr = %config.bind_addr,
        db = %config.database_path.display(),
        language = config.default_language.tag(),
        "Configuration loaded"
    );

    let db = Database::new(
        DbConfig::new(config.database_path.clone()).max_connections(config.db_max_connections),
    )
    .await?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    let app = build_router(AppState::new(db.clone(), config));

    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed is
/// logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
