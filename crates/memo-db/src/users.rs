//! Identity repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use memo_core::{new_v7, CreateUserRequest, Error, Result, User, UserRepository};

/// SQLite implementation of [`UserRepository`].
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new SqliteUserRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_row_to_user(row: sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, req: CreateUserRequest) -> Result<User> {
        // Explicit pre-checks so the two conflict causes get distinct
        // messages; the unique indexes remain the backstop under races.
        let username_taken =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM app_user WHERE username = ?1")
                .bind(&req.username)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;
        if username_taken > 0 {
            return Err(Error::Conflict("Username already exists".to_string()));
        }

        let email_taken =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM app_user WHERE email = ?1")
                .bind(&req.email)
                .fetch_one(&self.pool)
                .await
                .map_err(Error::Database)?;
        if email_taken > 0 {
            return Err(Error::Conflict("Email already registered".to_string()));
        }

        let user = User {
            id: new_v7(),
            username: req.username,
            email: req.email,
            password_hash: req.password_hash,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO app_user (id, username, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict("Username or email already registered".to_string())
            }
            _ => Error::Database(e),
        })?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM app_user WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(map_row_to_user))
    }

    async fn fetch(&self, id: Uuid) -> Result<User> {
        let row = sqlx::query("SELECT * FROM app_user WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(map_row_to_user)
            .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))
    }
}
