//! # Translations
//!
//! Static key lookup for the handful of messages the backend renders itself
//! (generation confirmations, missing-field alerts, document labels).
//!
//! There is no runtime catalog: every string lives in the tables below, and
//! the language is always passed in explicitly by the caller.
//!
//! ```rust
//! use crewbook_core::i18n::{translate, Language};
//!
//! assert_eq!(translate(Language::Fr, "document.invoice"), "Facture");
//! assert_eq!(translate(Language::Fr, "no.such.key"), "no.such.key");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Language {
    #[default]
    En,
    Fr,
    Ar,
}

impl Language {
    /// Parses a language tag such as `fr`, `fr-FR` or an `Accept-Language`
    /// header value (`"ar-MA,ar;q=0.9,en;q=0.8"`). Only the first tag is
    /// considered; anything unknown is English.
    pub fn from_tag(tag: &str) -> Self {
        let first = tag.split(',').next().unwrap_or("");
        let primary = first
            .split(';')
            .next()
            .unwrap_or("")
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match primary.as_str() {
            "fr" => Language::Fr,
            "ar" => Language::Ar,
            _ => Language::En,
        }
    }

    pub const fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Ar => "ar",
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("document.quote", "Quote"),
    ("document.invoice", "Invoice"),
    ("document.order_bond", "Purchase order"),
    ("field.client_name", "client name"),
    ("field.supplier_name", "supplier name"),
    ("field.date", "date"),
    ("message.missing_fields", "Please fill in: {fields}"),
    ("message.invalid_amounts", "Check quantity and unit price on rows: {rows}"),
    ("message.document_generated", "{document} {number} generated for {party}. Total: {total}"),
];

const FR: &[(&str, &str)] = &[
    ("document.quote", "Devis"),
    ("document.invoice", "Facture"),
    ("document.order_bond", "Bon de commande"),
    ("field.client_name", "nom du client"),
    ("field.supplier_name", "nom du fournisseur"),
    ("field.date", "date"),
    ("message.missing_fields", "Veuillez renseigner : {fields}"),
    ("message.invalid_amounts", "Vérifiez la quantité et le prix unitaire des lignes : {rows}"),
    ("message.document_generated", "{document} {number} généré(e) pour {party}. Total : {total}"),
];

const AR: &[(&str, &str)] = &[
    ("document.quote", "عرض سعر"),
    ("document.invoice", "فاتورة"),
    ("document.order_bond", "سند طلب"),
    ("field.client_name", "اسم العميل"),
    ("field.supplier_name", "اسم المورد"),
    ("field.date", "التاريخ"),
    ("message.missing_fields", "يرجى ملء: {fields}"),
    ("message.invalid_amounts", "تحقق من الكمية وسعر الوحدة في الأسطر: {rows}"),
    ("message.document_generated", "تم إنشاء {document} {number} لـ {party}. المجموع: {total}"),
];

fn table(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::En => EN,
        Language::Fr => FR,
        Language::Ar => AR,
    }
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    table(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Looks up `key` in the given language, falling back to English and then
/// to the key itself.
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    lookup(language, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
}

/// Translates `key` and substitutes `{name}` placeholders.
///
/// The template is scanned once, so braces inside a substituted value are
/// copied as typed. Unknown placeholders are left in place.
pub fn render(language: Language, key: &str, args: &[(&str, &str)]) -> String {
    let template = translate(language, key);
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };

        let name = &after[..close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
