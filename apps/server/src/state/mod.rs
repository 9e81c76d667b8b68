//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Shared (one per process, cloned into every handler)                   │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────────┐    │
//! │  │  Database                    │  │  Arc<ServerConfig>           │    │
//! │  │  (SQLite pool, thread-safe)  │  │  (read-only after startup)   │    │
//! │  └──────────────────────────────┘  └──────────────────────────────┘    │
//! │                                                                         │
//! │  Per request                                                           │
//! │  ┌──────────────────────────────┐                                      │
//! │  │  SessionContext              │  language + acting admin, parsed     │
//! │  │                              │  from headers                        │
//! │  └──────────────────────────────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Document forms are not held here: the client owns the form and submits
//! it whole for preview or generation.

mod config;
mod context;

use std::sync::Arc;

use crewbook_db::Database;

pub use config::{ConfigError, ServerConfig};
pub use context::{SessionContext, ADMIN_ID_HEADER};

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}
