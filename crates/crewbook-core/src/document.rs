//! # Document Form
//!
//! The single form session behind the quote, invoice and order-bond screens.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Document Form Lifecycle                              │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────────┐   │
//! │  │   New    │────►│ Editing  │────►│ Validate │────►│ Confirmation │   │
//! │  │ (1 row)  │     │          │     │          │     │   (alert)    │   │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────────┘   │
//! │                     │     ▲            │                                │
//! │              update_item  │       missing fields?                       │
//! │              add_item     │       bad amounts?                          │
//! │              remove_item  └────────────┘                                │
//! │                                                                         │
//! │  Totals are recomputed on every edit; validation never blocks editing.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculator::{self, DocumentTotals, ItemField, LineItem};
use crate::error::ValidationError;
use crate::i18n::{self, Language};
use crate::money::Money;
use crate::types::DocumentKind;
use crate::validation::{self, ValidationResult};

// =============================================================================
// Form Session
// =============================================================================

/// In-memory state of one quote/invoice/order-bond being edited.
///
/// ## Invariants
/// - `items` is never empty
/// - every item's `total` matches its quantity and unit price
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentForm {
    kind: DocumentKind,
    party_name: String,
    date: String,
    notes: Option<String>,
    items: Vec<LineItem>,
}

impl DocumentForm {
    /// A fresh form with one blank row.
    pub fn new(kind: DocumentKind) -> Self {
        DocumentForm {
            kind,
            party_name: String::new(),
            date: String::new(),
            notes: None,
            items: vec![LineItem::blank()],
        }
    }

    /// Rebuilds a form from rows submitted by a client, recomputing every
    /// total. An empty row list yields the single blank row.
    pub fn from_parts(
        kind: DocumentKind,
        party_name: impl Into<String>,
        date: impl Into<String>,
        items: Vec<LineItem>,
    ) -> Self {
        let mut items = items;
        for item in &mut items {
            item.recompute_total();
        }
        if items.is_empty() {
            items.push(LineItem::blank());
        }

        DocumentForm {
            kind,
            party_name: party_name.into(),
            date: date.into(),
            notes: None,
            items,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn party_name(&self) -> &str {
        &self.party_name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn set_party_name(&mut self, name: impl Into<String>) {
        self.party_name = name.into();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    pub fn update_item(&mut self, index: usize, field: ItemField, value: impl Into<String>) {
        calculator::update_item(&mut self.items, index, field, value);
    }

    pub fn add_item(&mut self) {
        calculator::add_item(&mut self.items);
    }

    pub fn remove_item(&mut self, index: usize) -> bool {
        calculator::remove_item(&mut self.items, index)
    }

    pub fn totals(&self) -> DocumentTotals {
        calculator::totals(&self.items, self.kind)
    }

    /// Translation key of the party field for this kind of document.
    pub fn party_field_key(&self) -> &'static str {
        if self.kind.is_supplier_facing() {
            "field.supplier_name"
        } else {
            "field.client_name"
        }
    }

    /// Checks the form right before generation.
    ///
    /// Missing required fields are reported together in one
    /// [`ValidationError::MissingFields`] (labels in `language`). Once those
    /// are present, rows with non-numeric or out-of-range amounts are
    /// reported as [`ValidationError::InvalidAmounts`].
    ///
    /// The returned [`ValidatedDocument`] carries the parsed date, so the
    /// caller can pick a number for it without validating again.
    pub fn validate_for_generation(&self, language: Language) -> ValidationResult<ValidatedDocument> {
        let mut missing = Vec::new();

        if self.party_name.trim().is_empty() {
            missing.push(i18n::translate(language, self.party_field_key()).to_string());
        }

        let date = validation::validate_date("date", &self.date).ok();
        if date.is_none() {
            missing.push(i18n::translate(language, "field.date").to_string());
        }

        let date = match date {
            Some(date) if missing.is_empty() => date,
            _ => return Err(ValidationError::MissingFields { fields: missing }),
        };

        validation::validate_party_name(&self.party_name)?;

        let bad_rows: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.has_invalid_amount())
            .map(|(i, _)| i + 1)
            .collect();
        if !bad_rows.is_empty() {
            return Err(ValidationError::InvalidAmounts { rows: bad_rows });
        }

        Ok(ValidatedDocument {
            kind: self.kind,
            party_name: self.party_name.trim().to_string(),
            date,
            notes: self.notes.as_ref().map(|n| n.trim().to_string()),
            totals: self.totals(),
            item_count: self.items.len(),
        })
    }

    /// Validates and freezes the form into a generated document.
    pub fn generate(
        &self,
        number: impl Into<String>,
        language: Language,
    ) -> ValidationResult<GeneratedDocument> {
        Ok(self.validate_for_generation(language)?.numbered(number))
    }
}

// =============================================================================
// Generation Output
// =============================================================================

/// A form that passed [`DocumentForm::validate_for_generation`] and is
/// waiting for its number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDocument {
    kind: DocumentKind,
    party_name: String,
    date: NaiveDate,
    notes: Option<String>,
    totals: DocumentTotals,
    item_count: usize,
}

impl ValidatedDocument {
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Assigns the document number.
    pub fn numbered(self, number: impl Into<String>) -> GeneratedDocument {
        GeneratedDocument {
            number: number.into(),
            kind: self.kind,
            party_name: self.party_name,
            date: self.date,
            notes: self.notes,
            totals: self.totals,
            item_count: self.item_count,
        }
    }
}

/// A document after successful generation: header plus frozen totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeneratedDocument {
    pub number: String,
    pub kind: DocumentKind,
    pub party_name: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub totals: DocumentTotals,
    pub item_count: usize,
}

impl GeneratedDocument {
    /// What the confirmation alert receives.
    pub fn confirmation(&self) -> Confirmation {
        Confirmation {
            document_number: self.number.clone(),
            party_name: self.party_name.clone(),
            grand_total: self.totals.grand_total,
        }
    }
}

/// Payload for the confirmation alert shown after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Confirmation {
    pub document_number: String,
    pub party_name: String,
    pub grand_total: Money,
}

impl Confirmation {
    /// Localized one-line message, e.g.
    /// `"Invoice INV-20261015-0001 generated for ACME. Total: 156.00 MAD"`.
    /// An empty `currency_symbol` prints the bare amount.
    pub fn message(&self, kind: DocumentKind, language: Language, currency_symbol: &str) -> String {
        let document = i18n::translate(language, document_label_key(kind));
        let total = self.grand_total.format_with_symbol(currency_symbol);
        i18n::render(
            language,
            "message.document_generated",
            &[
                ("document", document),
                ("number", self.document_number.as_str()),
                ("party", self.party_name.as_str()),
                ("total", total.as_str()),
            ],
        )
    }
}

/// Translation key of a document kind's display name.
pub const fn document_label_key(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Quote => "document.quote",
        DocumentKind::Invoice => "document.invoice",
        DocumentKind::OrderBond => "document.order_bond",
    }
}

/// Formats a document number: `{PREFIX}-{YYYYMMDD}-{sequence:04}`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use crewbook_core::document::document_number;
/// use crewbook_core::DocumentKind;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
/// assert_eq!(document_number(DocumentKind::Invoice, date, 7), "INV-20261015-0007");
/// ```
pub fn document_number(kind: DocumentKind, date: NaiveDate, sequence: u32) -> String {
    format!(
        "{}-{}-{:04}",
        kind.number_prefix(),
        date.format("%Y%m%d"),
        sequence
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
