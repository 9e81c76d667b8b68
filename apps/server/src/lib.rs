//! # Crewbook Server Library
//!
//! REST backend for the Crewbook mobile app: quote, invoice and purchase
//! order forms, the worker roster with daily attendance, and back-office
//! admins.
//!
//! ## Module Organization
//! ```text
//! crewbook_server/
//! ├── lib.rs          ◄─── You are here (router assembly & logging)
//! ├── main.rs         ◄─── Binary: config, database, listener
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (database + config)
//! │   ├── config.rs   ◄─── CREWBOOK_* environment variables
//! │   └── context.rs  ◄─── Per-request language and acting admin
//! ├── routes/
//! │   ├── mod.rs      ◄─── Route table
//! │   ├── documents.rs◄─── Preview and generate documents
//! │   ├── receipts.rs ◄─── Generated document history
//! │   ├── workers.rs  ◄─── Roster, attendance, pay
//! │   ├── admins.rs   ◄─── Admin accounts and login
//! │   └── health.rs   ◄─── Liveness + database check
//! └── error.rs        ◄─── ApiError and its HTTP mapping
//! ```

pub mod error;
pub mod routes;
pub mod state;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

pub use state::{AppState, ServerConfig};

/// Builds the complete application router.
pub fn build_router(state: AppState) -> Router {
    routes::router()
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,crewbook=debug,sqlx=warn")),
        )
        .with_target(true)
        .init();
}

/// Logs method, path, status and latency of every request.
async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), elapsed_ms, "Request failed");
    } else {
        debug!(%method, %path, status = status.as_u16(), elapsed_ms, "Request");
    }

    response
}
