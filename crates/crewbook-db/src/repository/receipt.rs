//! # Receipt Repository
//!
//! A receipt is the only trace a generated document leaves: number, kind,
//! party, date, notes and totals. Line items are not stored.
//!
//! ## Numbering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  INV-20261015-0003                                                      │
//! │  ─┬─ ───┬──── ─┬──                                                      │
//! │   │     │      └── next_sequence(kind, date): highest sequence already  │
//! │   │     │          stored for that kind and day, plus one               │
//! │   │     └── document date                                               │
//! │   └── kind prefix (QUO / INV / BON)                                     │
//! │                                                                         │
//! │  The UNIQUE index on document_number rejects a concurrent duplicate.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crewbook_core::{DocumentKind, GeneratedDocument, Receipt};

const RECEIPT_COLUMNS: &str = r#"
    id, document_number, kind, party_name, document_date,
    subtotal_cents, tax_cents, grand_total_cents, item_count,
    notes, created_by, created_at
"#;

/// Length of `"INV-20261015-"`; the sequence starts right after it.
const SEQUENCE_OFFSET: i64 = 13;

#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Next free sequence number for documents of `kind` dated `date`.
    ///
    /// Deleting a receipt never causes its successor's number to be reused,
    /// since the highest stored sequence is taken rather than the count.
    pub async fn next_sequence(&self, kind: DocumentKind, date: NaiveDate) -> DbResult<u32> {
        let highest: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(MAX(CAST(substr(document_number, ?3) AS INTEGER)), 0)
            FROM receipts
            WHERE kind = ?1 AND document_date = ?2
            "#,
        )
        .bind(kind)
        .bind(date)
        .bind(SEQUENCE_OFFSET + 1)
        .fetch_one(&self.pool)
        .await?;

        u32::try_from(highest + 1)
            .map_err(|_| DbError::Internal(format!("sequence out of range: {highest}")))
    }

    /// Stores the header and totals of a generated document.
    pub async fn insert_generated(
        &self,
        document: &GeneratedDocument,
        created_by: Option<&str>,
    ) -> DbResult<Receipt> {
        let receipt = Receipt {
            id: Uuid::new_v4().to_string(),
            document_number: document.number.clone(),
            kind: document.kind,
            party_name: document.party_name.clone(),
            document_date: document.date,
            subtotal_cents: document.totals.subtotal.cents(),
            tax_cents: document.totals.tax.cents(),
            grand_total_cents: document.totals.grand_total.cents(),
            item_count: document.item_count as i64,
            notes: document.notes.clone(),
            created_by: created_by.map(str::to_string),
            created_at: Utc::now(),
        };

        debug!(
            number = %receipt.document_number,
            total = receipt.grand_total_cents,
            "Inserting receipt"
        );

        sqlx::query(
            r#"
            INSERT INTO receipts (
                id, document_number, kind, party_name, document_date,
                subtotal_cents, tax_cents, grand_total_cents, item_count,
                notes, created_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&receipt.id)
        .bind(&receipt.document_number)
        .bind(receipt.kind)
        .bind(&receipt.party_name)
        .bind(receipt.document_date)
        .bind(receipt.subtotal_cents)
        .bind(receipt.tax_cents)
        .bind(receipt.grand_total_cents)
        .bind(receipt.item_count)
        .bind(&receipt.notes)
        .bind(&receipt.created_by)
        .bind(receipt.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => {
                DbError::duplicate(field, &receipt.document_number)
            }
            other => other,
        })?;

        Ok(receipt)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Receipt>> {
        let receipt = sqlx::query_as::<_, Receipt>(&format!(
            "SELECT {RECEIPT_COLUMNS} FROM receipts WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    /// Newest first, optionally restricted to one kind.
    pub async fn list(&self, kind: Option<DocumentKind>, limit: u32) -> DbResult<Vec<Receipt>> {
        let receipts = match kind {
            Some(kind) => {
                sqlx::query_as::<_, Receipt>(&format!(
                    "SELECT {RECEIPT_COLUMNS} FROM receipts WHERE kind = ?1 ORDER BY created_at DESC LIMIT ?2"
                ))
                .bind(kind)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Receipt>(&format!(
                    "SELECT {RECEIPT_COLUMNS} FROM receipts ORDER BY created_at DESC LIMIT ?1"
                ))
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(kind = ?kind, count = receipts.len(), "Listed receipts");
        Ok(receipts)
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting receipt");

        let result = sqlx::query("DELETE FROM receipts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Receipt", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use crewbook_core::document::document_number;
    use crewbook_core::{DocumentForm, ItemField, Language};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn generated(kind: DocumentKind, sequence: u32) -> GeneratedDocument {
        let mut form = DocumentForm::new(kind);
        form.set_party_name("ACME");
        form.set_date("2026-10-15");
        form.update_item(0, ItemField::Quantity, "2");
        form.update_item(0, ItemField::UnitPrice, "50");
        form.generate(document_number(kind, date(), sequence), Language::En)
            .unwrap()
    }

    #[tokio::test]
    async fn test_sequence_starts_at_one_per_kind_and_day() {
        let repo = memory_db().await.receipts();
        assert_eq!(repo.next_sequence(DocumentKind::Invoice, date()).await.unwrap(), 1);

        repo.insert_generated(&generated(DocumentKind::Invoice, 1), None)
            .await
            .unwrap();

        assert_eq!(repo.next_sequence(DocumentKind::Invoice, date()).await.unwrap(), 2);
        assert_eq!(repo.next_sequence(DocumentKind::Quote, date()).await.unwrap(), 1);
        let tomorrow = date().succ_opt().unwrap();
        assert_eq!(repo.next_sequence(DocumentKind::Invoice, tomorrow).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sequence_skips_past_deleted_receipts() {
        let repo = memory_db().await.receipts();
        let first = repo
            .insert_generated(&generated(DocumentKind::Quote, 1), None)
            .await
            .unwrap();
        repo.insert_generated(&generated(DocumentKind::Quote, 2), None)
            .await
            .unwrap();
        repo.delete(&first.id).await.unwrap();

        assert_eq!(repo.next_sequence(DocumentKind::Quote, date()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_insert_stores_totals() {
        let repo = memory_db().await.receipts();
        let receipt = repo
            .insert_generated(&generated(DocumentKind::Invoice, 1), Some("admin-1"))
            .await
            .unwrap();

        let loaded = repo.get_by_id(&receipt.id).await.unwrap().unwrap();
        assert_eq!(loaded.document_number, "INV-20261015-0001");
        assert_eq!(loaded.kind, DocumentKind::Invoice);
        assert_eq!(loaded.subtotal_cents, 10000);
        assert_eq!(loaded.tax_cents, 2000);
        assert_eq!(loaded.grand_total_cents, 12000);
        assert_eq!(loaded.item_count, 1);
        assert_eq!(loaded.notes, None);
        assert_eq!(loaded.created_by.as_deref(), Some("admin-1"));
    }

    #[tokio::test]
    async fn test_notes_are_stored() {
        let repo = memory_db().await.receipts();
        let mut form = DocumentForm::new(DocumentKind::Quote);
        form.set_party_name("ACME");
        form.set_date("2026-10-15");
        form.set_notes(Some("Valid for 15 days".to_string()));
        let doc = form
            .generate(document_number(DocumentKind::Quote, date(), 1), Language::En)
            .unwrap();

        let receipt = repo.insert_generated(&doc, None).await.unwrap();
        assert_eq!(receipt.notes.as_deref(), Some("Valid for 15 days"));

        let loaded = repo.get_by_id(&receipt.id).await.unwrap().unwrap();
        assert_eq!(loaded.notes.as_deref(), Some("Valid for 15 days"));
    }

    #[tokio::test]
    async fn test_duplicate_number_is_rejected() {
        let repo = memory_db().await.receipts();
        let doc = generated(DocumentKind::OrderBond, 1);
        repo.insert_generated(&doc, None).await.unwrap();

        assert!(matches!(
            repo.insert_generated(&doc, None).await,
            Err(DbError::UniqueViolation { value, .. }) if value == "BON-20261015-0001"
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_kind() {
        let repo = memory_db().await.receipts();
        repo.insert_generated(&generated(DocumentKind::Quote, 1), None)
            .await
            .unwrap();
        repo.insert_generated(&generated(DocumentKind::Invoice, 1), None)
            .await
            .unwrap();

        assert_eq!(repo.list(None, 50).await.unwrap().len(), 2);
        let invoices = repo.list(Some(DocumentKind::Invoice), 50).await.unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].kind, DocumentKind::Invoice);
    }

    #[tokio::test]
    async fn test_delete_missing_receipt() {
        let repo = memory_db().await.receipts();
        assert!(matches!(
            repo.delete("nope").await,
            Err(DbError::NotFound { .. })
        ));
    }
}
