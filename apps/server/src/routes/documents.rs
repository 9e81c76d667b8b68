//! # Document Endpoints
//!
//! The mobile form keeps its rows locally and calls `preview` after edits it
//! wants server totals for; `generate` runs the pre-generation checks,
//! assigns the next number and stores the receipt.
//!
//! ```text
//!   POST /documents/generate
//!        │
//!        ├── item count within bounds?              no ──► 400
//!        ├── validate_for_generation(language)       ──► 400 "Please fill in: ..."
//!        ├── next_sequence(kind, date)
//!        ├── numbered(document_number(...))
//!        ├── insert_generated(...)                   dup ──► 409
//!        └── 201 { receipt, document, confirmation, message }
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crewbook_core::document::document_number;
use crewbook_core::i18n::{self, Language};
use crewbook_core::validation::validate_item_count;
use crewbook_core::{
    Confirmation, DocumentForm, DocumentKind, DocumentTotals, GeneratedDocument, LineItem,
    Receipt, ValidationError,
};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, SessionContext};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/preview", post(preview))
        .route("/generate", post(generate))
}

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub kind: DocumentKind,
    #[serde(default)]
    pub party_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl DocumentRequest {
    fn into_form(self) -> ApiResult<DocumentForm> {
        // An empty list becomes one blank row.
        validate_item_count(self.items.len().max(1))?;
        let mut form = DocumentForm::from_parts(self.kind, self.party_name, self.date, self.items);
        form.set_notes(self.notes);
        Ok(form)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub items: Vec<LineItem>,
    pub totals: DocumentTotals,
    /// Trimmed notes, `None` when blank.
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub receipt: Receipt,
    pub document: GeneratedDocument,
    pub confirmation: Confirmation,
    /// Localized confirmation text for the alert.
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Recomputes every row total and the document totals.
pub async fn preview(Json(body): Json<DocumentRequest>) -> ApiResult<Json<PreviewResponse>> {
    let form = body.into_form()?;
    debug!(kind = ?form.kind(), rows = form.items().len(), "Document preview");

    Ok(Json(PreviewResponse {
        totals: form.totals(),
        items: form.items().to_vec(),
        notes: form.notes().map(|n| n.trim().to_string()),
    }))
}

pub async fn generate(
    State(state): State<AppState>,
    ctx: SessionContext,
    Json(body): Json<DocumentRequest>,
) -> ApiResult<(StatusCode, Json<GenerateResponse>)> {
    let form = body.into_form()?;
    let kind = form.kind();

    let validated = form
        .validate_for_generation(ctx.language)
        .map_err(|e| localized(e, ctx.language))?;
    let date = validated.date();

    let receipts = state.db.receipts();
    let sequence = receipts.next_sequence(kind, date).await?;
    let document = validated.numbered(document_number(kind, date, sequence));

    let receipt = receipts
        .insert_generated(&document, ctx.admin_id.as_deref())
        .await?;

    let confirmation = document.confirmation();
    let message = confirmation.message(kind, ctx.language, &state.config.currency_symbol);

    info!(
        number = %document.number,
        total = %document.totals.grand_total,
        admin = ?ctx.admin_id,
        "Document generated"
    );

    Ok((
        StatusCode::CREATED,
        Json(GenerateResponse {
            receipt,
            document,
            confirmation,
            message,
        }),
    ))
}

/// Renders the pre-generation errors in the caller's language.
fn localized(err: ValidationError, language: Language) -> ApiError {
    match err {
        ValidationError::MissingFields { fields } => {
            let fields = fields.join(", ");
            ApiError::validation(i18n::render(
                language,
                "message.missing_fields",
                &[("fields", fields.as_str())],
            ))
        }
        ValidationError::InvalidAmounts { rows } => {
            let rows = rows
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            ApiError::validation(i18n::render(
                language,
                "message.invalid_amounts",
                &[("rows", rows.as_str())],
            ))
        }
        other => other.into(),
    }
}
