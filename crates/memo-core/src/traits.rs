//! Core traits for memo abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// IDENTITY REPOSITORY TRAITS
// =============================================================================

/// Repository for identity records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new identity.
    ///
    /// Fails with `Error::Conflict` when the username or email is already
    /// registered.
    async fn create(&self, req: CreateUserRequest) -> Result<User>;

    /// Look up an identity by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Fetch an identity by id. Fails with `Error::NotFound` when absent.
    async fn fetch(&self, id: Uuid) -> Result<User>;
}

/// Repository for bearer-token sessions.
///
/// Only a hash of the token is persisted; the raw token is handed to the
/// caller exactly once at creation.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Establish a session for an identity, returning the raw token.
    async fn create(&self, user_id: Uuid) -> Result<String>;

    /// Resolve a raw token to its identity.
    ///
    /// Returns `None` for unknown, revoked, or expired tokens. Resolution
    /// failure is terminal for the request; there is no retry boundary here.
    async fn resolve(&self, token: &str) -> Result<Option<User>>;

    /// Revoke a session. Revoking an unknown token is a no-op.
    async fn revoke(&self, token: &str) -> Result<()>;
}

// =============================================================================
// NOTE REPOSITORY TRAIT
// =============================================================================

/// Repository for note CRUD, search, and reordering.
///
/// Every operation is explicitly parameterized by the acting identity and
/// scoped to that identity's own notes. A note that exists but belongs to
/// someone else is reported as `Error::NoteNotFound`, never as a
/// permission failure, to avoid existence leakage.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note with `sort_order` unset.
    async fn insert(&self, owner: Uuid, req: CreateNoteRequest) -> Result<Note>;

    /// Fetch a single owned note.
    async fn fetch(&self, owner: Uuid, id: Uuid) -> Result<Note>;

    /// List all owned notes.
    ///
    /// Sorted by `sort_order` ascending when any owned note carries a
    /// non-null `sort_order`, otherwise by `created_at` descending.
    async fn list(&self, owner: Uuid) -> Result<Vec<Note>>;

    /// Overwrite title/content (and category when provided) and bump
    /// `updated_at`. The summary cache is patched per `summary`.
    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        req: UpdateNoteRequest,
        summary: SummaryPatch,
    ) -> Result<Note>;

    /// Replace the cached summary regardless of content changes.
    async fn set_summary(&self, owner: Uuid, id: Uuid, summary: Option<String>) -> Result<Note>;

    /// Permanently remove an owned note.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<()>;

    /// Assign `sort_order = position` for each owned id in `ids`.
    ///
    /// Unknown or unowned ids are silently skipped; ids absent from the
    /// sequence keep their previous rank. Best-effort, not transactional.
    async fn reorder(&self, owner: Uuid, ids: &[Uuid]) -> Result<()>;

    /// Case-insensitive substring search over title, content, and summary,
    /// sorted by `created_at` descending. An empty query matches all owned
    /// notes.
    async fn search(&self, owner: Uuid, query: &str) -> Result<Vec<Note>>;
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Text generation backend (summarization).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
