use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crewbook_core::validation::{validate_password, validate_username};
use crewbook_core::{Admin, Language, ValidationError};
use crewbook_db::NewAdmin;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_admin))
        .route("/login", post(login))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub username: String,
    pub display_name: String,
    pub password: String,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn create_admin(
    State(state): State<AppState>,
    Json(body): Json<CreateAdminRequest>,
) -> ApiResult<(StatusCode, Json<Admin>)> {
    validate_username(&body.username)?;
    validate_password(&body.password)?;
    if body.display_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "display name".to_string(),
        }
        .into());
    }

    let language = body.language.unwrap_or(state.config.default_language);
    let admin = state
        .db
        .admins()
        .create(&NewAdmin {
            username: &body.username,
            display_name: &body.display_name,
            password: &body.password,
            language: language.tag(),
        })
        .await?;

    info!(id = %admin.id, username = %admin.username, "Admin created");
    Ok((StatusCode::CREATED, Json(admin)))
}

/// Checks credentials. The same 401 covers unknown usernames and wrong
/// passwords.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<Admin>> {
    state
        .db
        .admins()
        .verify_credentials(&body.username, &body.password)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))
}
