//! Registration, login, and logout.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use tracing::info;

use memo_core::{CreateUserRequest, SessionRepository, UserRepository};

use crate::middleware::session::SessionToken;
use crate::{ApiError, AppState};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Credential failures share one message so usernames cannot be probed.
const BAD_CREDENTIALS: &str = "Invalid username or password";

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = req.username.trim();
    let email = req.email.trim();
    if username.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username, email, and password are required".to_string(),
        ));
    }

    let password_hash = memo_crypto::hash_password(&req.password)
        .map_err(|e| ApiError::Database(memo_core::Error::Internal(e.to_string())))?;

    let user = state
        .db
        .users
        .create(CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    let token = state.db.sessions.create(user.id).await?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "user": user.to_view(),
            "token": token,
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .users
        .find_by_username(req.username.trim())
        .await?
        .ok_or_else(|| ApiError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    let valid = memo_crypto::verify_password(&user.password_hash, &req.password)
        .map_err(|e| ApiError::Database(memo_core::Error::Internal(e.to_string())))?;
    if !valid {
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    let token = state.db.sessions.create(user.id).await?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(serde_json::json!({
        "user": user.to_view(),
        "token": token,
    })))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.sessions.revoke(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
