use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crewbook_core::{DocumentKind, Receipt, ValidationError};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 500;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_receipts))
        .route("/:id", get(get_receipt).delete(delete_receipt))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub kind: Option<String>,
    pub limit: Option<u32>,
}

pub async fn list_receipts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Receipt>>> {
    let kind = match query.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        None => None,
        Some(raw) => Some(DocumentKind::parse(raw).ok_or_else(|| ValidationError::NotAllowed {
            field: "kind".to_string(),
            allowed: vec![
                DocumentKind::Quote.as_str().to_string(),
                DocumentKind::Invoice.as_str().to_string(),
                DocumentKind::OrderBond.as_str().to_string(),
            ],
        })?),
    };
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    Ok(Json(state.db.receipts().list(kind, limit).await?))
}

pub async fn get_receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Receipt>> {
    state
        .db
        .receipts()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Receipt", &id))
}

pub async fn delete_receipt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.receipts().delete(&id).await?;
    tracing::info!(id = %id, "Receipt deleted");
    Ok(StatusCode::NO_CONTENT)
}
