//! # Worker Endpoints
//!
//! Roster management, daily attendance and pay over a period.
//!
//! Deleting a worker only deactivates it: past attendance and pay stay
//! readable by id, while edits and new attendance require an active worker.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crewbook_core::validation::{
    parse_amount_strict, validate_daily_rate_cents, validate_date, validate_phone,
    validate_worker_name,
};
use crewbook_core::{
    AttendanceRecord, AttendanceStatus, Money, PayPeriod, PaySummary, ValidationError, Worker,
};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, SessionContext};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workers).post(create_worker))
        .route(
            "/:id",
            get(get_worker).put(update_worker).delete(delete_worker),
        )
        .route(
            "/:id/attendance",
            get(list_attendance).post(record_attendance),
        )
        .route("/:id/pay", get(worker_pay))
}

// =============================================================================
// DTOs
// =============================================================================

/// Body of create and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerInput {
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Decimal amount as typed, e.g. `"150"` or `"150,50"`.
    pub daily_rate: String,
}

/// Fields of [`WorkerInput`] after validation.
struct WorkerFields {
    full_name: String,
    phone: Option<String>,
    role: Option<String>,
    daily_rate_cents: i64,
}

impl WorkerInput {
    fn validate(self) -> ApiResult<WorkerFields> {
        validate_worker_name(&self.full_name)?;
        let phone = non_blank(self.phone);
        if let Some(phone) = &phone {
            validate_phone(phone)?;
        }

        let rate = parse_amount_strict("daily rate", &self.daily_rate)?;
        let daily_rate_cents = Money::from_decimal(rate)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "daily rate".to_string(),
                reason: "amount is too large".to_string(),
            })?
            .cents();
        validate_daily_rate_cents(daily_rate_cents)?;

        Ok(WorkerFields {
            full_name: self.full_name.trim().to_string(),
            phone,
            role: non_blank(self.role),
            daily_rate_cents,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AttendanceInput {
    pub date: String,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`, both required.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl PeriodQuery {
    fn period(&self) -> ApiResult<PayPeriod> {
        let start = validate_date("start", self.start.as_deref().unwrap_or_default())?;
        let end = validate_date("end", self.end.as_deref().unwrap_or_default())?;
        Ok(PayPeriod::new(start, end)?)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Roster
// =============================================================================

pub async fn list_workers(State(state): State<AppState>) -> ApiResult<Json<Vec<Worker>>> {
    Ok(Json(state.db.workers().list_active().await?))
}

pub async fn create_worker(
    State(state): State<AppState>,
    Json(body): Json<WorkerInput>,
) -> ApiResult<(StatusCode, Json<Worker>)> {
    let fields = body.validate()?;
    let now = Utc::now();

    let worker = Worker {
        id: Uuid::new_v4().to_string(),
        full_name: fields.full_name,
        phone: fields.phone,
        role: fields.role,
        daily_rate_cents: fields.daily_rate_cents,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    state.db.workers().insert(&worker).await?;

    info!(id = %worker.id, name = %worker.full_name, "Worker created");
    Ok((StatusCode::CREATED, Json(worker)))
}

pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Worker>> {
    Ok(Json(state.db.workers().get_active(&id).await?))
}

pub async fn update_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<WorkerInput>,
) -> ApiResult<Json<Worker>> {
    let fields = body.validate()?;
    let workers = state.db.workers();

    let mut worker = workers.get_active(&id).await?;
    worker.full_name = fields.full_name;
    worker.phone = fields.phone;
    worker.role = fields.role;
    worker.daily_rate_cents = fields.daily_rate_cents;
    workers.update(&worker).await?;

    Ok(Json(workers.get_active(&id).await?))
}

pub async fn delete_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.workers().deactivate(&id).await?;
    info!(id = %id, "Worker deactivated");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Attendance & Pay
// =============================================================================

/// Records or replaces the mark for one day.
pub async fn record_attendance(
    State(state): State<AppState>,
    ctx: SessionContext,
    Path(id): Path<String>,
    Json(body): Json<AttendanceInput>,
) -> ApiResult<Json<AttendanceRecord>> {
    let work_date = validate_date("date", &body.date)?;
    let worker = find_worker(&state, &id).await?;
    worker.ensure_active()?;

    let record = AttendanceRecord {
        id: Uuid::new_v4().to_string(),
        worker_id: worker.id,
        work_date,
        status: body.status,
        recorded_by: ctx.admin_id,
        note: non_blank(body.note),
        created_at: Utc::now(),
    };

    Ok(Json(state.db.attendance().record(&record).await?))
}

pub async fn list_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<AttendanceRecord>>> {
    let period = query.period()?;
    let worker = find_worker(&state, &id).await?;

    Ok(Json(
        state
            .db
            .attendance()
            .list_for_worker(&worker.id, period.start, period.end)
            .await?,
    ))
}

pub async fn worker_pay(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<PaySummary>> {
    let period = query.period()?;
    let worker = find_worker(&state, &id).await?;
    let records = state
        .db
        .attendance()
        .list_for_worker(&worker.id, period.start, period.end)
        .await?;

    Ok(Json(PaySummary::build(
        worker.id.clone(),
        worker.daily_rate(),
        period,
        &records,
    )))
}

/// Active or not; history stays readable after deactivation.
async fn find_worker(state: &AppState, id: &str) -> ApiResult<Worker> {
    state
        .db
        .workers()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Worker", id))
}
