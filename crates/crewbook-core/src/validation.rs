//! # Validation Module
//!
//! Input validation utilities for Crewbook.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mobile form                                                  │
//! │  ├── Numeric keyboards, immediate totals                               │
//! │  └── Lenient: bad numbers count as zero while typing                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Server handler (Rust)                                        │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign keys                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crewbook_core::validation::{validate_worker_name, validate_date};
//!
//! assert!(validate_worker_name("Youssef El Amrani").is_ok());
//! assert!(validate_date("date", "2026-10-15").is_ok());
//! assert!(validate_date("date", "15/10/2026").is_err());
//! ```

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::MAX_DOCUMENT_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format accepted for document and attendance dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Numeric Input
// =============================================================================

/// Parses a decimal typed into a numeric field.
///
/// Accepts `.` or a single `,` as decimal separator. Returns `None` for empty
/// or malformed input.
pub fn parse_decimal_input(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized).ok()
}

/// Strict counterpart of the calculator's lenient parsing.
///
/// ```rust
/// use crewbook_core::validation::parse_amount_strict;
///
/// assert!(parse_amount_strict("unit price", "12,50").is_ok());
/// assert!(parse_amount_strict("unit price", "12abc").is_err());
/// assert!(parse_amount_strict("unit price", "").is_err());
/// ```
pub fn parse_amount_strict(field: &str, input: &str) -> ValidationResult<Decimal> {
    if input.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    parse_decimal_input(input).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a number".to_string(),
    })
}

/// Validates a daily rate in cents.
///
/// Zero is allowed (volunteers, apprentices paid separately).
pub fn validate_daily_rate_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "daily rate".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the number of rows submitted for one document.
pub fn validate_item_count(count: usize) -> ValidationResult<()> {
    if count == 0 || count > MAX_DOCUMENT_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_DOCUMENT_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

fn require_bounded(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a worker's full name: required, at most 100 characters.
pub fn validate_worker_name(name: &str) -> ValidationResult<()> {
    require_bounded("full name", name, 100)
}

/// Validates a client or supplier name: required, at most 200 characters.
pub fn validate_party_name(name: &str) -> ValidationResult<()> {
    require_bounded("party name", name, 200)
}

/// Validates an optional phone number.
///
/// ## Rules
/// - Empty is allowed (no phone on file)
/// - At most 20 characters
/// - Digits, spaces, `+` and `-` only
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Ok(());
    }

    if phone.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, + and -".to_string(),
        });
    }

    Ok(())
}

/// Validates an admin username: 3 to 32 characters of letters, digits, `_`
/// or `.`.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: 3,
        });
    }

    if username.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 32,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, underscores and dots".to_string(),
        });
    }

    Ok(())
}

/// Validates a new admin password (at least 8 characters).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < 8 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        });
    }

    Ok(())
}

// =============================================================================
// Dates
// =============================================================================

/// Parses a `YYYY-MM-DD` date typed into `field`.
pub fn validate_date(field: &str, input: &str) -> ValidationResult<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
