//! # Worker Repository
//!
//! Workers are never hard-deleted: attendance and pay history keep pointing
//! at them. Deleting a worker clears `is_active`, which hides it from
//! [`WorkerRepository::list_active`] and [`WorkerRepository::get_active`].

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crewbook_core::Worker;

const WORKER_COLUMNS: &str = r#"
    id, full_name, phone, role, daily_rate_cents, is_active, created_at, updated_at
"#;

/// Repository for worker database operations.
#[derive(Debug, Clone)]
pub struct WorkerRepository {
    pool: SqlitePool,
}

impl WorkerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        WorkerRepository { pool }
    }

    pub async fn insert(&self, worker: &Worker) -> DbResult<()> {
        debug!(id = %worker.id, name = %worker.full_name, "Inserting worker");

        sqlx::query(
            r#"
            INSERT INTO workers (
                id, full_name, phone, role, daily_rate_cents,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&worker.id)
        .bind(&worker.full_name)
        .bind(&worker.phone)
        .bind(&worker.role)
        .bind(worker.daily_rate_cents)
        .bind(worker.is_active)
        .bind(worker.created_at)
        .bind(worker.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a worker by id, active or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Worker>> {
        let worker = sqlx::query_as::<_, Worker>(&format!(
            "SELECT {WORKER_COLUMNS} FROM workers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(worker)
    }

    /// Gets an active worker, or [`DbError::NotFound`].
    pub async fn get_active(&self, id: &str) -> DbResult<Worker> {
        match self.get_by_id(id).await? {
            Some(worker) if worker.is_active => Ok(worker),
            _ => Err(DbError::not_found("Worker", id)),
        }
    }

    /// Active workers, sorted by name.
    pub async fn list_active(&self) -> DbResult<Vec<Worker>> {
        let workers = sqlx::query_as::<_, Worker>(&format!(
            "SELECT {WORKER_COLUMNS} FROM workers WHERE is_active = 1 ORDER BY full_name COLLATE NOCASE"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = workers.len(), "Listed active workers");
        Ok(workers)
    }

    /// Overwrites the editable fields of an active worker and bumps
    /// `updated_at`.
    pub async fn update(&self, worker: &Worker) -> DbResult<()> {
        debug!(id = %worker.id, "Updating worker");

        let result = sqlx::query(
            r#"
            UPDATE workers SET
                full_name = ?2,
                phone = ?3,
                role = ?4,
                daily_rate_cents = ?5,
                updated_at = ?6
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(&worker.id)
        .bind(&worker.full_name)
        .bind(&worker.phone)
        .bind(&worker.role)
        .bind(worker.daily_rate_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Worker", &worker.id));
        }

        Ok(())
    }

    /// Soft-deletes a worker.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating worker");

        let result = sqlx::query(
            "UPDATE workers SET is_active = 0, updated_at = ?2 WHERE id = ?1 AND is_active = 1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Worker", id));
        }

        Ok(())
    }

    pub async fn count_active(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM workers WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
