//! # Error Types
//!
//! Domain-specific error types for crewbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  crewbook-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  crewbook-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Server errors (apps/server)                                           │
//! │  └── ApiError         - What the mobile app sees (JSON)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Mobile app             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric parse failures while editing a document are NOT errors: the
//! calculator coerces them to zero. They only surface as
//! [`ValidationError::InvalidAmounts`] when the document is generated.

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A pay period whose end precedes its start.
    #[error("Invalid period: {start} is after {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    /// Operation on a soft-deleted worker.
    #[error("Worker {0} is inactive")]
    InactiveWorker(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Several required fields are missing at once.
    ///
    /// Produced right before a document is generated, so the user sees a
    /// single alert listing everything that still needs filling in.
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// Document rows whose quantity or unit price is not a number.
    ///
    /// Row numbers are 1-based, as displayed in the form.
    #[error("Rows with invalid amounts: {}", join_rows(.rows))]
    InvalidAmounts { rows: Vec<usize> },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

fn join_rows(rows: &[usize]) -> String {
    rows.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
