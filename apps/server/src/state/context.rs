//! # Session Context
//!
//! The display language and the acting admin travel with each request
//! instead of living in process-wide state.
//!
//! ```text
//!   Accept-Language: fr-FR,fr;q=0.9   ──►  language = Fr
//!   (absent)                           ──►  language = config default
//!   X-Admin-Id: 3b0c...                ──►  admin_id = Some("3b0c...")
//! ```
//!
//! The admin id is taken at face value and only recorded on the rows a
//! request writes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;

use crewbook_core::Language;

use super::AppState;

pub const ADMIN_ID_HEADER: &str = "x-admin-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub language: Language,
    pub admin_id: Option<String>,
}

impl SessionContext {
    pub fn from_headers(headers: &HeaderMap, default_language: Language) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        SessionContext {
            language: header(axum::http::header::ACCEPT_LANGUAGE.as_str())
                .map(Language::from_tag)
                .unwrap_or(default_language),
            admin_id: header(ADMIN_ID_HEADER).map(str::to_string),
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(SessionContext::from_headers(
            &parts.headers,
            state.config.default_language,
        ))
    }
}
