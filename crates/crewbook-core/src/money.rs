//! # Money Module
//!
//! Provides the `Money` type used for every amount shown on a document or a
//! pay slip.
//!
//! ## Integer Cents, Decimal Inputs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form input (text)        Exact decimal           Stored amount         │
//! │                                                                         │
//! │  quantity   "1.5"   ──►   Decimal(1.5)   ─┐                             │
//! │                                           ├─► round(2) ──► Money(cents) │
//! │  unit price "19.99" ──►   Decimal(19.99) ─┘                             │
//! │                                                                         │
//! │  Quantities may be fractional (half days, 2.5 m²), so the product is    │
//! │  computed on exact decimals and only then rounded to the cent.          │
//! │  Everything after that (subtotal, VAT, grand total) is integer math.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crewbook_core::money::Money;
//!
//! let total = Money::from_cents(10000) + Money::from_cents(3000);
//! assert_eq!(total.to_string(), "130.00");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed so that credit notes and corrections can be represented, although
/// the document forms never produce negative totals on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use crewbook_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from an exact decimal amount, rounding to the
    /// nearest cent (midpoints away from zero).
    ///
    /// Returns `None` when the amount does not fit in an `i64` of cents.
    ///
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use crewbook_core::money::Money;
    ///
    /// let amount = Decimal::new(12345, 3); // 12.345
    /// assert_eq!(Money::from_decimal(amount).unwrap().cents(), 1235);
    /// ```
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
    }

    /// Returns the value as an exact decimal with two fractional digits.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion in cents (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Calculates tax at the given rate, rounded to the nearest cent.
    ///
    /// Midpoints round away from zero so that a negative amount produces the
    /// exact mirror of the positive one.
    ///
    /// ```rust
    /// use crewbook_core::money::Money;
    /// use crewbook_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(13000);
    /// assert_eq!(subtotal.calculate_tax(TaxRate::VAT).cents(), 2600);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so that large subtotals times 10000 bps cannot overflow
        let magnitude = (self.0.unsigned_abs() as i128 * rate.bps() as i128 + 5000) / 10000;
        let tax = if self.0 < 0 { -magnitude } else { magnitude };
        Money(tax as i64)
    }

    /// Formats the amount followed by a currency symbol, e.g. `"156.00 DH"`.
    /// An empty symbol prints the bare amount.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if symbol.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", self, symbol)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal display without a currency symbol: `"100.00"`, `"-5.50"`.
///
/// This is the format the document forms show next to every line and total.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the `i64` bounds instead of overflowing.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(10000).to_string(), "100.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        let d = Decimal::from_str("2.005").unwrap();
        assert_eq!(Money::from_decimal(d).unwrap().cents(), 201);

        let d = Decimal::from_str("-2.005").unwrap();
        assert_eq!(Money::from_decimal(d).unwrap().cents(), -201);

        let d = Decimal::from_str("19.994").unwrap();
        assert_eq!(Money::from_decimal(d).unwrap().cents(), 1999);
    }

    #[test]
    fn test_from_decimal_overflow_is_none() {
        assert!(Money::from_decimal(Decimal::MAX).is_none());
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(
            Money::from_cents(15600).to_decimal(),
            Decimal::from_str("156.00").unwrap()
        );
    }

    #[test]
    fn test_vat_on_subtotal() {
        let subtotal = Money::from_cents(13000);
        assert_eq!(subtotal.calculate_tax(TaxRate::VAT).cents(), 2600);
        assert_eq!(subtotal.calculate_tax(TaxRate::zero()).cents(), 0);
    }

    #[test]
    fn test_tax_rounding_is_symmetric() {
        // 0.03 * 20% = 0.006 -> 0.01
        assert_eq!(Money::from_cents(3).calculate_tax(TaxRate::VAT).cents(), 1);
        assert_eq!(Money::from_cents(-3).calculate_tax(TaxRate::VAT).cents(), -1);
        // 0.02 * 20% = 0.004 -> 0.00
        assert_eq!(Money::from_cents(2).calculate_tax(TaxRate::VAT).cents(), 0);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!((a + b).cents(), 1250);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1250);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 1500);
    }

    #[test]
    fn test_addition_saturates() {
        let big = Money::from_cents(i64::MAX - 10);
        assert_eq!((big + Money::from_cents(100)).cents(), i64::MAX);

        let total: Money = [big, big, big].iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        let low = Money::from_cents(i64::MIN + 10);
        assert_eq!((low + Money::from_cents(-100)).cents(), i64::MIN);
    }

    #[test]
    fn test_format_with_symbol() {
        let m = Money::from_cents(15600);
        assert_eq!(m.format_with_symbol("DH"), "156.00 DH");
        assert_eq!(m.format_with_symbol(""), "156.00");
        assert_eq!(Money::from_cents(-100).format_with_symbol("MAD"), "-1.00 MAD");
    }
}
