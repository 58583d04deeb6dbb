//! Core data models for the memo note service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp pattern used for externally serialized note timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A registered identity.
///
/// `password_hash` is an Argon2id PHC string and never leaves the service;
/// use [`User::to_view`] for anything caller-facing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-facing representation of a [`User`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl User {
    /// Strip credentials for external serialization.
    pub fn to_view(&self) -> UserView {
        UserView {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Request for creating a new identity. The password is already hashed
/// by the time it reaches the repository.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// A note owned by exactly one identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    /// Owning identity. Immutable after creation, never serialized to callers.
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    /// Best-effort cache of the summarizer's output over `content`.
    pub summary: Option<String>,
    /// Caller-assigned relative rank. Null until the first reorder.
    pub sort_order: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// External representation of a [`Note`].
///
/// `owner_id` and `sort_order` are internal and deliberately absent.
/// Timestamps use the fixed [`TIMESTAMP_FORMAT`] pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub summary: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Note {
    /// Build the caller-facing representation.
    pub fn to_view(&self) -> NoteView {
        NoteView {
            id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
            summary: self.summary.clone(),
            created_at: self.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: self.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    /// Defaults to "uncategorized" when absent.
    pub category: Option<String>,
    /// Summary computed by the orchestrator before insertion (may be None
    /// when the summarizer failed or was unavailable).
    pub summary: Option<String>,
}

/// Request for updating an existing note.
#[derive(Debug, Clone)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: String,
    /// When None the stored category is kept.
    pub category: Option<String>,
}

/// How an update call affects the cached summary.
///
/// The caller (not the repository) decides whether the content changed and
/// therefore whether a fresh summary was computed.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryPatch {
    /// Content is byte-identical to the stored content; keep the cache.
    Keep,
    /// Content changed; replace the cache with the orchestrator's result.
    Replace(Option<String>),
}

/// An authenticated session resolved from a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
