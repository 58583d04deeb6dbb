//! Note CRUD, search, reordering, and summarization endpoints.
//!
//! Every operation is scoped to the authenticated user. A note owned by
//! someone else is indistinguishable from a missing note (404).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use memo_core::{CreateNoteRequest, NoteRepository, NoteView, SummaryPatch, UpdateNoteRequest};

use crate::middleware::session::CurrentUser;
use crate::{ApiError, AppState};

#[derive(Deserialize)]
pub struct CreateNotePayload {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateNotePayload {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<Uuid>,
}

fn validate_note_fields(title: &str, content: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }
    if content.trim().is_empty() {
        return Err(ApiError::BadRequest("Content is required".to_string()));
    }
    Ok(())
}

pub async fn list_notes(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<NoteView>>, ApiError> {
    let notes = state.db.notes.list(user.id).await?;
    Ok(Json(notes.iter().map(|n| n.to_view()).collect()))
}

pub async fn create_note(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateNotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    validate_note_fields(&payload.title, &payload.content)?;

    // Best-effort: a backend failure stores the note with a null summary.
    let summary = state.summaries.summarize(&payload.content).await;

    let note = state
        .db
        .notes
        .insert(
            user.id,
            CreateNoteRequest {
                title: payload.title,
                content: payload.content,
                category: payload.category,
                summary,
            },
        )
        .await?;

    info!(note_id = %note.id, user_id = %user.id, "Note created");

    Ok((StatusCode::CREATED, Json(note.to_view())))
}

pub async fn get_note(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<NoteView>, ApiError> {
    let note = state.db.notes.fetch(user.id, id).await?;
    Ok(Json(note.to_view()))
}

pub async fn update_note(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNotePayload>,
) -> Result<Json<NoteView>, ApiError> {
    validate_note_fields(&payload.title, &payload.content)?;

    let existing = state.db.notes.fetch(user.id, id).await?;

    // Re-summarize only when the content actually changed. Title and
    // category edits keep the stored summary as-is.
    let summary = if payload.content != existing.content {
        SummaryPatch::Replace(state.summaries.summarize(&payload.content).await)
    } else {
        SummaryPatch::Keep
    };

    let note = state
        .db
        .notes
        .update(
            user.id,
            id,
            UpdateNoteRequest {
                title: payload.title,
                content: payload.content,
                category: payload.category,
            },
            summary,
        )
        .await?;

    Ok(Json(note.to_view()))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.notes.delete(user.id, id).await?;
    info!(note_id = %id, user_id = %user.id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn search_notes(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<NoteView>>, ApiError> {
    let notes = state.db.notes.search(user.id, &params.q).await?;
    debug!(
        user_id = %user.id,
        query_len = params.q.len(),
        result_count = notes.len(),
        "Search complete"
    );
    Ok(Json(notes.iter().map(|n| n.to_view()).collect()))
}

pub async fn summarize_note(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<NoteView>, ApiError> {
    let existing = state.db.notes.fetch(user.id, id).await?;

    // A failed regeneration clears the stored summary rather than keeping
    // a stale one.
    let summary = state.summaries.summarize(&existing.content).await;
    let note = state.db.notes.set_summary(user.id, id, summary).await?;

    Ok(Json(note.to_view()))
}

pub async fn reorder_notes(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.db.notes.reorder(user.id, &req.order).await?;
    info!(user_id = %user.id, count = req.order.len(), "Notes reordered");
    Ok(Json(serde_json::json!({ "status": "success" })))
}
