//! Session repository implementation.
//!
//! Sessions are bearer tokens: the raw token is returned to the caller once
//! and only its SHA-256 digest is stored, alongside an expiry timestamp.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use memo_core::{defaults, Error, Result, SessionRepository, User};
use memo_crypto::{generate_token, hash_token};

/// SQLite implementation of [`SessionRepository`].
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: SqlitePool,
    ttl_days: i64,
}

impl SqliteSessionRepository {
    /// Create a new SqliteSessionRepository with the default session TTL.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            ttl_days: defaults::SESSION_TTL_DAYS,
        }
    }

    /// Override the session lifetime in days.
    pub fn with_ttl_days(mut self, days: i64) -> Self {
        self.ttl_days = days;
        self
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, user_id: Uuid) -> Result<String> {
        let token = generate_token(defaults::SESSION_TOKEN_LENGTH);
        let now = Utc::now();
        let expires_at = now + Duration::days(self.ttl_days);

        sqlx::query(
            "INSERT INTO session (token_hash, user_id, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(hash_token(&token))
        .bind(user_id)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT s.expires_at,
                    u.id, u.username, u.email, u.password_hash, u.created_at
             FROM session s
             JOIN app_user u ON u.id = s.user_id
             WHERE s.token_hash = ?1",
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let expires_at: DateTime<Utc> = row.get("expires_at");
        if expires_at <= Utc::now() {
            return Ok(None);
        }

        Ok(Some(User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
        }))
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM session WHERE token_hash = ?1")
            .bind(hash_token(token))
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
