//! # crewbook-db: Database Layer for Crewbook
//!
//! SQLite persistence for workers, attendance, receipts and admins, built on
//! sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Crewbook Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (POST /documents/generate)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   crewbook-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ WorkerRepo    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ AttendanceRepo│    │ 001_initial_ │  │   │
//! │  │   │ WAL + FKs     │    │ ReceiptRepo   │    │   schema.sql │  │   │
//! │  │   │               │    │ AdminRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │        <platform data dir>/crewbook/crewbook.db                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crewbook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("crewbook.db")).await?;
//! let workers = db.workers().list_active().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::admin::{AdminRepository, NewAdmin};
pub use repository::attendance::AttendanceRepository;
pub use repository::receipt::ReceiptRepository;
pub use repository::worker::WorkerRepository;
