//! # Domain Types
//!
//! Core domain types used throughout Crewbook.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Worker      │   │ AttendanceRecord│   │     Receipt     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  worker_id (FK) │   │  document_number│       │
//! │  │  full_name      │   │  work_date      │   │  kind           │       │
//! │  │  daily_rate     │   │  status         │   │  grand_total    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  DocumentKind   │   │AttendanceStatus │       │
//! │  │  bps (u32)      │   │  Quote          │   │  Present        │       │
//! │  │  2000 = 20%     │   │  Invoice        │   │  HalfDay        │       │
//! │  └─────────────────┘   │  OrderBond      │   │  Absent         │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (1 bps = 0.01%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// The fixed VAT (TVA) rate applied to invoices: 20%.
    pub const VAT: TaxRate = TaxRate(2000);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Document Kind
// =============================================================================

/// The three commercial documents the app can produce.
///
/// All three share one line-item form; they differ only in tax rate, the
/// label of the counterparty, and the number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Price quote sent to a client. No VAT.
    Quote,
    /// Invoice sent to a client. 20% VAT.
    Invoice,
    /// Purchase order ("bon de commande") sent to a supplier. No VAT.
    OrderBond,
}

impl DocumentKind {
    /// Tax rate applied to the subtotal of this kind of document.
    pub const fn tax_rate(&self) -> TaxRate {
        match self {
            DocumentKind::Invoice => TaxRate::VAT,
            DocumentKind::Quote | DocumentKind::OrderBond => TaxRate::zero(),
        }
    }

    /// Prefix used in generated document numbers.
    pub const fn number_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Quote => "QUO",
            DocumentKind::Invoice => "INV",
            DocumentKind::OrderBond => "BON",
        }
    }

    /// Whether the counterparty is a supplier (otherwise a client).
    pub const fn is_supplier_facing(&self) -> bool {
        matches!(self, DocumentKind::OrderBond)
    }

    /// Storage/wire name, identical to the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Quote => "quote",
            DocumentKind::Invoice => "invoice",
            DocumentKind::OrderBond => "order_bond",
        }
    }

    /// Parses the storage/wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quote" => Some(DocumentKind::Quote),
            "invoice" => Some(DocumentKind::Invoice),
            "order_bond" | "orderbond" => Some(DocumentKind::OrderBond),
            _ => None,
        }
    }
}

// =============================================================================
// Worker
// =============================================================================

/// A worker whose attendance and pay are tracked.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Worker {
    pub id: String,
    pub full_name: String,
    pub phone: Option<String>,
    /// Trade or role on site (mason, electrician, ...).
    pub role: Option<String>,
    /// Pay for one full day of attendance, in cents.
    pub daily_rate_cents: i64,
    /// Soft-delete flag.
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Worker {
    #[inline]
    pub fn daily_rate(&self) -> Money {
        Money::from_cents(self.daily_rate_cents)
    }

    /// Fails with [`CoreError::InactiveWorker`] for soft-deleted workers.
    pub fn ensure_active(&self) -> CoreResult<()> {
        if self.is_active {
            Ok(())
        } else {
            Err(CoreError::InactiveWorker(self.id.clone()))
        }
    }
}

// =============================================================================
// Attendance
// =============================================================================

/// Attendance mark for one worker on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    HalfDay,
    Absent,
}

impl Default for AttendanceStatus {
    fn default() -> Self {
        AttendanceStatus::Present
    }
}

/// One attendance entry. At most one exists per (worker, date).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AttendanceRecord {
    pub id: String,
    pub worker_id: String,
    #[ts(as = "String")]
    pub work_date: NaiveDate,
    pub status: AttendanceStatus,
    /// Admin who recorded the entry, when known.
    pub recorded_by: Option<String>,
    pub note: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Receipt
// =============================================================================

/// The persisted trace of a generated document.
///
/// Only the header and totals are stored; line items live in the form
/// session and are discarded after generation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Receipt {
    pub id: String,
    pub document_number: String,
    pub kind: DocumentKind,
    /// Client name (quote, invoice) or supplier name (order bond).
    pub party_name: String,
    #[ts(as = "String")]
    pub document_date: NaiveDate,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub grand_total_cents: i64,
    pub item_count: i64,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Receipt {
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }
}

// =============================================================================
// Admin
// =============================================================================

/// An administrator account of the back office.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub display_name: String,
    /// PHC-format argon2 hash. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Language tag the admin's screens default to (`en`, `fr`, `ar`).
    pub language: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
