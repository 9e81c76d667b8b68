//! # Document Total Calculator
//!
//! Line-item math shared by the quote, invoice and order-bond forms.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form field edit              Calculator                 Form display   │
//! │  ───────────────              ──────────                 ────────────   │
//! │                                                                         │
//! │  qty "2" ───────────────► update_item(items, 0, Quantity, "2")          │
//! │                                │                                        │
//! │                                ├── field replaced                       │
//! │                                └── total = parse(qty) × parse(price)    │
//! │                                         rounded to the cent             │
//! │                                                                         │
//! │  any edit ──────────────► totals(items, kind) ────────► subtotal        │
//! │                                                         VAT (invoice)   │
//! │                                                         grand total     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these operations fail. A quantity or price that does not parse
//! counts as zero while the user is typing, and so does a row whose total
//! exceeds [`MAX_LINE_TOTAL`]; [`crate::document::DocumentForm`] reports
//! such rows only when the document is generated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{DocumentKind, TaxRate};
use crate::validation::parse_decimal_input;

// =============================================================================
// Line Item
// =============================================================================

/// One row of a document: quantity × unit price.
///
/// Quantity and unit price are kept exactly as typed so the form can show
/// the user's input back unchanged; only `total` is derived.
///
/// Missing fields deserialize as empty, so clients may omit `total`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(default, rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    /// Derived: `round(quantity × unit_price, 2)`, or zero.
    pub total: Money,
}

impl LineItem {
    /// A new empty row (all fields empty, total zero).
    pub fn blank() -> Self {
        LineItem::default()
    }

    /// Builds a row and computes its total.
    pub fn new(
        description: impl Into<String>,
        quantity: impl Into<String>,
        unit_price: impl Into<String>,
    ) -> Self {
        let mut item = LineItem {
            description: description.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            total: Money::zero(),
        };
        item.recompute_total();
        item
    }

    /// Recomputes `total` from the current quantity and unit price.
    pub fn recompute_total(&mut self) {
        self.total = line_total(&self.quantity, &self.unit_price);
    }

    /// True when quantity or unit price holds text that is not a number, or
    /// when their product is beyond [`MAX_LINE_TOTAL`].
    ///
    /// Empty fields are not invalid; they simply count as zero.
    pub fn has_invalid_amount(&self) -> bool {
        let invalid = |s: &str| !s.trim().is_empty() && parse_decimal_input(s).is_none();
        if invalid(&self.quantity) || invalid(&self.unit_price) {
            return true;
        }
        bounded_line_total(parse_number(&self.quantity), parse_number(&self.unit_price)).is_none()
    }
}

/// The editable fields of a [`LineItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ItemField {
    Description,
    Quantity,
    UnitPrice,
}

// =============================================================================
// Item Operations
// =============================================================================

/// Lenient number parsing used while editing: empty or malformed input is 0.
///
/// ```rust
/// use rust_decimal::Decimal;
/// use crewbook_core::calculator::parse_number;
///
/// assert_eq!(parse_number("2.5"), Decimal::new(25, 1));
/// assert_eq!(parse_number("abc"), Decimal::ZERO);
/// assert_eq!(parse_number(""), Decimal::ZERO);
/// ```
pub fn parse_number(input: &str) -> Decimal {
    parse_decimal_input(input).unwrap_or(Decimal::ZERO)
}

/// Largest row total in either direction: one billion currency units.
///
/// With at most [`crate::MAX_DOCUMENT_ITEMS`] rows the subtotal,
/// tax and grand total stay far inside `i64` cents.
pub const MAX_LINE_TOTAL: Money = Money::from_cents(100_000_000_000);

/// `round(quantity × unit_price, 2)` as Money.
///
/// A product beyond [`MAX_LINE_TOTAL`] yields zero.
pub fn line_total(quantity: &str, unit_price: &str) -> Money {
    bounded_line_total(parse_number(quantity), parse_number(unit_price)).unwrap_or_default()
}

fn bounded_line_total(quantity: Decimal, unit_price: Decimal) -> Option<Money> {
    quantity
        .checked_mul(unit_price)
        .and_then(Money::from_decimal)
        .filter(|total| total.cents().unsigned_abs() <= MAX_LINE_TOTAL.cents().unsigned_abs())
}

/// Replaces one field of the row at `index`.
///
/// Editing quantity or unit price recomputes that row's total. An index past
/// the end of the list is ignored.
pub fn update_item(items: &mut [LineItem], index: usize, field: ItemField, value: impl Into<String>) {
    let Some(item) = items.get_mut(index) else {
        return;
    };

    let value = value.into();
    match field {
        ItemField::Description => item.description = value,
        ItemField::Quantity => {
            item.quantity = value;
            item.recompute_total();
        }
        ItemField::UnitPrice => {
            item.unit_price = value;
            item.recompute_total();
        }
    }
}

/// Appends a blank row.
pub fn add_item(items: &mut Vec<LineItem>) {
    items.push(LineItem::blank());
}

/// Removes the row at `index`, unless it is the last remaining row.
///
/// Returns whether a row was removed.
pub fn remove_item(items: &mut Vec<LineItem>, index: usize) -> bool {
    if items.len() <= 1 || index >= items.len() {
        return false;
    }
    items.remove(index);
    true
}

// =============================================================================
// Totals
// =============================================================================

/// Sum of all row totals.
pub fn subtotal(items: &[LineItem]) -> Money {
    items.iter().map(|item| item.total).sum()
}

/// Tax on a subtotal, rounded to the cent.
#[inline]
pub fn tax(subtotal: Money, rate: TaxRate) -> Money {
    subtotal.calculate_tax(rate)
}

/// Subtotal plus tax.
#[inline]
pub fn grand_total(subtotal: Money, tax: Money) -> Money {
    subtotal + tax
}

/// Totals summary shown at the bottom of every document form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DocumentTotals {
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub grand_total: Money,
}

/// Computes subtotal, tax and grand total for a document of the given kind.
pub fn totals(items: &[LineItem], kind: DocumentKind) -> DocumentTotals {
    let rate = kind.tax_rate();
    let subtotal = subtotal(items);
    let tax = tax(subtotal, rate);
    DocumentTotals {
        subtotal,
        tax_rate: rate,
        tax,
        grand_total: grand_total(subtotal, tax),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_DOCUMENT_ITEMS;

    fn items(rows: &[(&str, &str)]) -> Vec<LineItem> {
        rows.iter()
            .map(|(qty, price)| LineItem::new("", *qty, *price))
            .collect()
    }

    #[test]
    fn test_line_total_rounds_to_cents() {
        assert_eq!(line_total("3", "0.335").cents(), 101); // 1.005 -> 1.01
        assert_eq!(line_total("1.5", "19.99").cents(), 2999); // 29.985 -> 29.99
        assert_eq!(line_total("0", "50").cents(), 0);
    }

    #[test]
    fn test_non_numeric_input_is_zero() {
        assert_eq!(line_total("abc", "10").to_string(), "0.00");
        assert_eq!(line_total("2", "ten").to_string(), "0.00");
        assert_eq!(line_total("", "").to_string(), "0.00");
    }

    #[test]
    fn test_comma_decimal_separator() {
        assert_eq!(line_total("1,5", "10").cents(), 1500);
    }

    #[test]
    fn test_negative_inputs_are_not_rejected() {
        assert_eq!(line_total("-2", "10").cents(), -2000);
    }

    #[test]
    fn test_reference_invoice() {
        let rows = items(&[("2", "50"), ("1", "30")]);
        assert_eq!(rows[0].total.to_string(), "100.00");
        assert_eq!(rows[1].total.to_string(), "30.00");

        let t = totals(&rows, DocumentKind::Invoice);
        assert_eq!(t.subtotal.to_string(), "130.00");
        assert_eq!(t.tax.to_string(), "26.00");
        assert_eq!(t.grand_total.to_string(), "156.00");
    }

    #[test]
    fn test_quote_and_order_bond_have_no_tax() {
        let rows = items(&[("2", "50"), ("1", "30")]);
        for kind in [DocumentKind::Quote, DocumentKind::OrderBond] {
            let t = totals(&rows, kind);
            assert!(t.tax.is_zero());
            assert_eq!(t.grand_total, t.subtotal);
        }
    }

    #[test]
    fn test_garbage_row_contributes_nothing() {
        let rows = items(&[("abc", "10")]);
        assert_eq!(rows[0].total.to_string(), "0.00");
        assert_eq!(subtotal(&rows).to_string(), "0.00");
    }

    #[test]
    fn test_update_item_recomputes_only_for_amounts() {
        let mut rows = vec![LineItem::blank()];

        update_item(&mut rows, 0, ItemField::Quantity, "4");
        assert!(rows[0].total.is_zero());

        update_item(&mut rows, 0, ItemField::UnitPrice, "12.50");
        assert_eq!(rows[0].total.cents(), 5000);

        update_item(&mut rows, 0, ItemField::Description, "Cement bags");
        assert_eq!(rows[0].description, "Cement bags");
        assert_eq!(rows[0].total.cents(), 5000);

        update_item(&mut rows, 0, ItemField::Quantity, "x");
        assert!(rows[0].total.is_zero());
    }

    #[test]
    fn test_update_item_out_of_range_is_ignored() {
        let mut rows = vec![LineItem::blank()];
        update_item(&mut rows, 5, ItemField::Quantity, "3");
        assert_eq!(rows, vec![LineItem::blank()]);
    }

    #[test]
    fn test_add_item_appends_blank_row() {
        let mut rows = items(&[("1", "1")]);
        add_item(&mut rows);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], LineItem::blank());
        assert!(rows[1].total.is_zero());
    }

    #[test]
    fn test_remove_last_row_is_noop() {
        let mut rows = items(&[("1", "1")]);
        assert!(!remove_item(&mut rows, 0));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut rows = items(&[("1", "1"), ("2", "2"), ("3", "3")]);
        assert!(remove_item(&mut rows, 1));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].quantity, "3");
        assert!(!remove_item(&mut rows, 7));
    }

    #[test]
    fn test_subtotal_is_order_independent() {
        let mut rows = items(&[("2", "50"), ("1", "30"), ("0.5", "7.25")]);
        let forward = subtotal(&rows);
        rows.reverse();
        assert_eq!(subtotal(&rows), forward);
        assert_eq!(forward.cents(), 10000 + 3000 + 363);
    }

    #[test]
    fn test_has_invalid_amount() {
        assert!(LineItem::new("", "abc", "10").has_invalid_amount());
        assert!(!LineItem::new("", "", "10").has_invalid_amount());
        assert!(!LineItem::blank().has_invalid_amount());
    }

    #[test]
    fn test_line_total_limit() {
        assert_eq!(line_total("1000000000", "1"), MAX_LINE_TOTAL);
        assert_eq!(line_total("-1000000000", "1").cents(), -MAX_LINE_TOTAL.cents());
        assert!(line_total("1000000000", "1.01").is_zero());
        assert!(!LineItem::new("", "1000000000", "1").has_invalid_amount());
        assert!(LineItem::new("", "1000000000", "1.01").has_invalid_amount());
    }

    #[test]
    fn test_huge_rows_do_not_overflow_totals() {
        let rows = items(&[("90000000000000000", "1"), ("90000000000000000", "1")]);
        assert!(rows.iter().all(|row| row.total.is_zero()));
        assert!(rows.iter().all(LineItem::has_invalid_amount));

        let t = totals(&rows, DocumentKind::Invoice);
        assert!(t.grand_total.is_zero());
    }

    #[test]
    fn test_max_rows_at_limit_stay_exact() {
        let rows = vec![LineItem::new("", "1000000000", "1"); MAX_DOCUMENT_ITEMS];
        let t = totals(&rows, DocumentKind::Invoice);
        let count = MAX_DOCUMENT_ITEMS as i64;
        assert_eq!(t.subtotal.cents(), MAX_LINE_TOTAL.cents() * count);
        assert_eq!(t.grand_total.cents(), MAX_LINE_TOTAL.cents() * count * 12 / 10);
    }

    #[test]
    fn test_line_total_matches_rounded_product() {
        // Sweep a grid of non-negative quantities and prices.
        for q in 0..40u32 {
            for p in [0u32, 1, 5, 99, 333, 1999, 10000] {
                let quantity = Decimal::new(q as i64 * 25, 2); // 0.00, 0.25, ...
                let price = Decimal::new(p as i64, 2);
                let expected = Money::from_decimal(quantity * price).unwrap();
                let got = line_total(&quantity.to_string(), &price.to_string());
                assert_eq!(got, expected, "q={quantity} p={price}");
            }
        }
    }
}
