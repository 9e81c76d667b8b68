//! Fixtures shared by the repository tests.

use chrono::Utc;
use crewbook_core::Worker;
use uuid::Uuid;

use crate::{Database, DbConfig};

pub async fn memory_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

pub fn sample_worker(name: &str, rate_cents: i64) -> Worker {
    let now = Utc::now();
    Worker {
        id: Uuid::new_v4().to_string(),
        full_name: name.to_string(),
        phone: Some("+212 600 000000".to_string()),
        role: Some("Mason".to_string()),
        daily_rate_cents: rate_cents,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
