//! # crewbook-core: Pure Business Logic for Crewbook
//!
//! Worker attendance, pay, and the quote / invoice / order-bond calculator,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Crewbook Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile admin app                             │   │
//! │  │    Workers ──► Attendance ──► Pay ──► Quote/Invoice/Order bond  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    crewbook-server (axum)                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ crewbook-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │calculator │  │  payroll  │  │   │
//! │  │   │  Worker   │  │   Money   │  │ LineItem  │  │ PayPeriod │  │   │
//! │  │   │  Receipt  │  │  TaxRate  │  │  totals   │  │PaySummary │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 crewbook-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Worker, AttendanceRecord, Receipt, Admin)
//! - [`money`] - Money type with integer cents
//! - [`calculator`] - Line totals, subtotal, tax and grand total
//! - [`document`] - The shared document form session and numbering
//! - [`payroll`] - Days worked and pay per period
//! - [`validation`] - Input validation
//! - [`i18n`] - Static translation lookup
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use crewbook_core::calculator::{totals, LineItem};
//! use crewbook_core::DocumentKind;
//!
//! let items = vec![LineItem::new("Cement", "2", "50"), LineItem::new("Sand", "1", "30")];
//! let t = totals(&items, DocumentKind::Invoice);
//!
//! assert_eq!(t.subtotal.to_string(), "130.00");
//! assert_eq!(t.tax.to_string(), "26.00");
//! assert_eq!(t.grand_total.to_string(), "156.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod document;
pub mod error;
pub mod i18n;
pub mod money;
pub mod payroll;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{DocumentTotals, ItemField, LineItem};
pub use document::{Confirmation, DocumentForm, GeneratedDocument, ValidatedDocument};
pub use error::{CoreError, CoreResult, ValidationError};
pub use i18n::Language;
pub use money::Money;
pub use payroll::{PayPeriod, PaySummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum rows accepted for one document submitted to the server.
pub const MAX_DOCUMENT_ITEMS: usize = 200;
