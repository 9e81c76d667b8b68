//! # Attendance Repository
//!
//! One row per (worker, day), enforced by a UNIQUE index. Recording a day a
//! second time overwrites status, note and recorder but keeps the row id.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crewbook_core::AttendanceRecord;

const ATTENDANCE_COLUMNS: &str = r#"
    id, worker_id, work_date, status, recorded_by, note, created_at
"#;

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
}

impl AttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AttendanceRepository { pool }
    }

    /// Inserts or replaces the entry for `record.worker_id` on
    /// `record.work_date` and returns the stored row.
    pub async fn record(&self, record: &AttendanceRecord) -> DbResult<AttendanceRecord> {
        debug!(
            worker_id = %record.worker_id,
            date = %record.work_date,
            status = ?record.status,
            "Recording attendance"
        );

        sqlx::query(
            r#"
            INSERT INTO attendance (
                id, worker_id, work_date, status, recorded_by, note, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (worker_id, work_date) DO UPDATE SET
                status = excluded.status,
                recorded_by = excluded.recorded_by,
                note = excluded.note
            "#,
        )
        .bind(&record.id)
        .bind(&record.worker_id)
        .bind(record.work_date)
        .bind(record.status)
        .bind(&record.recorded_by)
        .bind(&record.note)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        let stored = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE worker_id = ?1 AND work_date = ?2"
        ))
        .bind(&record.worker_id)
        .bind(record.work_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Entries of one worker between `start` and `end` inclusive, oldest
    /// first.
    pub async fn list_for_worker(
        &self,
        worker_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<AttendanceRecord>> {
        let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            SELECT {ATTENDANCE_COLUMNS} FROM attendance
            WHERE worker_id = ?1 AND work_date BETWEEN ?2 AND ?3
            ORDER BY work_date
            "#
        ))
        .bind(worker_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        debug!(worker_id = %worker_id, count = records.len(), "Listed attendance");
        Ok(records)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
