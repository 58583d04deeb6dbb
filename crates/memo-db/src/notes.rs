//! Note repository implementation.
//!
//! Every query is scoped by `owner_id`; a note owned by another identity is
//! indistinguishable from an absent one (`Error::NoteNotFound`).

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use memo_core::{
    new_v7, CreateNoteRequest, Error, Note, NoteRepository, Result, SummaryPatch,
    UpdateNoteRequest,
};

use crate::escape_like;

/// Category assigned when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// SQLite implementation of [`NoteRepository`].
#[derive(Clone)]
pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_scoped(&self, owner: Uuid, id: Uuid) -> Result<Note> {
        let row = sqlx::query("SELECT * FROM note WHERE id = ?1 AND owner_id = ?2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(map_row_to_note).ok_or(Error::NoteNotFound(id))
    }
}

fn map_row_to_note(row: sqlx::sqlite::SqliteRow) -> Note {
    Note {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        title: row.get("title"),
        content: row.get("content"),
        category: row.get("category"),
        summary: row.get("summary"),
        sort_order: row.get("sort_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Apply the list ordering rule.
///
/// When at least one note carries a rank, ranked notes sort by rank
/// ascending and unranked notes keep their recency position ahead of them
/// (the sort is stable over a `created_at` descending input). With no ranks
/// at all the input order (recency) stands.
fn sort_for_list(notes: &mut [Note]) {
    if notes.iter().any(|n| n.sort_order.is_some()) {
        notes.sort_by(|a, b| match (a.sort_order, b.sort_order) {
            (Some(x), Some(y)) => x.cmp(&y),
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn insert(&self, owner: Uuid, req: CreateNoteRequest) -> Result<Note> {
        let now = Utc::now();
        let note = Note {
            id: new_v7(),
            owner_id: owner,
            title: req.title,
            content: req.content,
            category: req
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            summary: req.summary,
            sort_order: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO note (id, owner_id, title, content, category, summary, sort_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7, ?8)",
        )
        .bind(note.id)
        .bind(note.owner_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.category)
        .bind(&note.summary)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(note)
    }

    async fn fetch(&self, owner: Uuid, id: Uuid) -> Result<Note> {
        self.fetch_scoped(owner, id).await
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<Note>> {
        let rows = sqlx::query(
            "SELECT * FROM note WHERE owner_id = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut notes: Vec<Note> = rows.into_iter().map(map_row_to_note).collect();
        sort_for_list(&mut notes);
        Ok(notes)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        req: UpdateNoteRequest,
        summary: SummaryPatch,
    ) -> Result<Note> {
        let existing = self.fetch_scoped(owner, id).await?;

        let updated = Note {
            title: req.title,
            content: req.content,
            category: req.category.unwrap_or(existing.category),
            summary: match summary {
                SummaryPatch::Keep => existing.summary,
                SummaryPatch::Replace(s) => s,
            },
            updated_at: Utc::now(),
            ..existing
        };

        sqlx::query(
            "UPDATE note SET title = ?1, content = ?2, category = ?3, summary = ?4, updated_at = ?5
             WHERE id = ?6 AND owner_id = ?7",
        )
        .bind(&updated.title)
        .bind(&updated.content)
        .bind(&updated.category)
        .bind(&updated.summary)
        .bind(updated.updated_at)
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(updated)
    }

    async fn set_summary(&self, owner: Uuid, id: Uuid, summary: Option<String>) -> Result<Note> {
        let existing = self.fetch_scoped(owner, id).await?;

        let updated = Note {
            summary,
            updated_at: Utc::now(),
            ..existing
        };

        sqlx::query(
            "UPDATE note SET summary = ?1, updated_at = ?2 WHERE id = ?3 AND owner_id = ?4",
        )
        .bind(&updated.summary)
        .bind(updated.updated_at)
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(updated)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM note WHERE id = ?1 AND owner_id = ?2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }

    async fn reorder(&self, owner: Uuid, ids: &[Uuid]) -> Result<()> {
        // Deliberately not transactional: a crash mid-way leaves a partial
        // order, which the data model accepts. `updated_at` is untouched.
        let mut applied = 0u64;
        for (position, id) in ids.iter().enumerate() {
            let result =
                sqlx::query("UPDATE note SET sort_order = ?1 WHERE id = ?2 AND owner_id = ?3")
                    .bind(position as i64)
                    .bind(id)
                    .bind(owner)
                    .execute(&self.pool)
                    .await
                    .map_err(Error::Database)?;
            applied += result.rows_affected();
        }

        debug!(
            subsystem = "db",
            component = "notes",
            op = "reorder",
            requested = ids.len(),
            applied,
            "Reorder applied"
        );
        Ok(())
    }

    async fn search(&self, owner: Uuid, query: &str) -> Result<Vec<Note>> {
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));

        let rows = sqlx::query(
            "SELECT * FROM note
             WHERE owner_id = ?1
               AND (lower(title) LIKE ?2 ESCAPE '\\'
                    OR lower(content) LIKE ?2 ESCAPE '\\'
                    OR lower(coalesce(summary, '')) LIKE ?2 ESCAPE '\\')
             ORDER BY created_at DESC, id DESC",
        )
        .bind(owner)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.into_iter().map(map_row_to_note).collect())
    }
}
