//! # Admin Repository
//!
//! Back-office accounts. Passwords are stored as PHC-format argon2id hashes
//! and only ever compared through [`AdminRepository::verify_credentials`].

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crewbook_core::Admin;

const ADMIN_COLUMNS: &str = r#"
    id, username, display_name, password_hash, language, created_at
"#;

/// Input for [`AdminRepository::create`].
#[derive(Debug, Clone)]
pub struct NewAdmin<'a> {
    pub username: &'a str,
    pub display_name: &'a str,
    pub password: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AdminRepository { pool }
    }

    /// Creates an admin. Usernames are stored trimmed and must be unique.
    pub async fn create(&self, new: &NewAdmin<'_>) -> DbResult<Admin> {
        let username = new.username.trim();
        debug!(username = %username, "Creating admin");

        let admin = Admin {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            display_name: new.display_name.trim().to_string(),
            password_hash: hash_password(new.password)?,
            language: new.language.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO admins (id, username, display_name, password_hash, language, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&admin.id)
        .bind(&admin.username)
        .bind(&admin.display_name)
        .bind(&admin.password_hash)
        .bind(&admin.language)
        .bind(admin.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("username", username),
            other => other,
        })?;

        Ok(admin)
    }

    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE username = ?1"
        ))
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Returns the admin when `password` matches, `None` for an unknown
    /// username or a wrong password.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> DbResult<Option<Admin>> {
        let Some(admin) = self.find_by_username(username).await? else {
            debug!(username = %username.trim(), "Login for unknown username");
            return Ok(None);
        };

        if verify_password(password, &admin.password_hash) {
            Ok(Some(admin))
        } else {
            warn!(username = %admin.username, "Login with wrong password");
            Ok(None)
        }
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
