//! # Repository Module
//!
//! One repository per table. Each holds a clone of the pool and exposes
//! plain async methods; SQL never leaves this module.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │  db.attendance().record(&entry)                                │
//! │       ▼                                                                 │
//! │  ┌──────────────────┐ ┌──────────────────────┐ ┌──────────────────┐    │
//! │  │ WorkerRepository │ │ AttendanceRepository │ │ReceiptRepository │    │
//! │  │  insert / update │ │  record (upsert)     │ │ next_sequence    │    │
//! │  │  list_active     │ │  list_for_worker     │ │ insert_generated │    │
//! │  │  deactivate      │ │                      │ │ list / delete    │    │
//! │  └──────────────────┘ └──────────────────────┘ └──────────────────┘    │
//! │  ┌──────────────────┐                                                  │
//! │  │ AdminRepository  │  create (argon2 hash) / verify_credentials       │
//! │  └──────────────────┘                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod attendance;
pub mod receipt;
pub mod worker;
