//! # memo-db
//!
//! SQLite database layer for memo.
//!
//! This crate provides:
//! - Connection pool management
//! - Idempotent embedded schema migration
//! - Repository implementations for identities, sessions, and notes
//!
//! ## Example
//!
//! ```rust,ignore
//! use memo_db::Database;
//! use memo_core::{CreateNoteRequest, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://memo.db").await?;
//!
//!     let note = db.notes.insert(owner_id, CreateNoteRequest {
//!         title: "Trip".to_string(),
//!         content: "Plan the trip to Kyoto".to_string(),
//!         category: None,
//!         summary: None,
//!     }).await?;
//!
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;
pub mod sessions;
pub mod users;

// Re-export core types
pub use memo_core::*;

// Re-export repository implementations
pub use notes::{SqliteNoteRepository, DEFAULT_CATEGORY};
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use sessions::SqliteSessionRepository;
pub use users::SqliteUserRepository;

/// Embedded schema, applied on startup.
const SCHEMA: &str = include_str!("schema.sql");

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::SqlitePool,
    /// Identity repository.
    pub users: SqliteUserRepository,
    /// Session repository.
    pub sessions: SqliteSessionRepository,
    /// Note repository for CRUD, search, and reordering.
    pub notes: SqliteNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            users: SqliteUserRepository::new(pool.clone()),
            sessions: SqliteSessionRepository::new(pool.clone()),
            notes: SqliteNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Connect to a private in-memory database. Intended for tests.
    pub async fn connect_in_memory() -> Result<Self> {
        let db = Self::connect("sqlite::memory:").await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Override the session lifetime in days.
    pub fn with_session_ttl_days(mut self, days: i64) -> Self {
        self.sessions = self.sessions.with_ttl_days(days);
        self
    }

    /// Apply the embedded schema. Safe to call repeatedly.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
