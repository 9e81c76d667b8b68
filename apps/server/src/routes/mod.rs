//! HTTP routes, one file per resource.
//!
//! ```text
//! GET    /health
//! POST   /documents/preview            recompute rows + totals
//! POST   /documents/generate           validate, number, store receipt
//! GET    /receipts[?kind=&limit=]
//! GET    /receipts/:id
//! DELETE /receipts/:id
//! POST   /workers                      GET /workers
//! GET    /workers/:id                  PUT /workers/:id    DELETE /workers/:id
//! POST   /workers/:id/attendance       GET /workers/:id/attendance?start=&end=
//! GET    /workers/:id/pay?start=&end=
//! POST   /admins                       POST /admins/login
//! ```

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub mod admins;
pub mod documents;
pub mod health;
pub mod receipts;
pub mod workers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .nest("/documents", documents::router())
        .nest("/receipts", receipts::router())
        .nest("/workers", workers::router())
        .nest("/admins", admins::router())
}
