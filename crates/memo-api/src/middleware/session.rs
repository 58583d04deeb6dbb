//! Bearer-token session middleware.
//!
//! Extracts `Authorization: Bearer <token>`, resolves it against the
//! session store, and injects the authenticated user into request
//! extensions. Requests without a valid, unexpired token get 401.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use memo_core::{SessionRepository, User};

use crate::{ApiError, AppState};

/// The authenticated user for the current request.
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// The raw bearer token that authenticated the current request.
///
/// Kept around so logout can revoke exactly the session it was called with.
#[derive(Clone)]
pub struct SessionToken(pub String);

pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Some(token) => token.to_string(),
        None => {
            return ApiError::Unauthorized("Missing bearer token".to_string()).into_response();
        }
    };

    match state.db.sessions.resolve(&token).await {
        Ok(Some(user)) => {
            debug!(user_id = %user.id, "Session resolved");
            request.extensions_mut().insert(CurrentUser(user));
            request.extensions_mut().insert(SessionToken(token));
            next.run(request).await
        }
        Ok(None) => {
            ApiError::Unauthorized("Invalid or expired session".to_string()).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    let header_value = request.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
