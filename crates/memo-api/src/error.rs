//! API error type and HTTP status mapping.

use axum::{http::StatusCode, response::IntoResponse, Json};

/// Errors surfaced to API clients as `{"error": message}` JSON bodies.
#[derive(Debug)]
pub enum ApiError {
    Database(memo_core::Error),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl From<memo_core::Error> for ApiError {
    fn from(err: memo_core::Error) -> Self {
        match &err {
            memo_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            memo_core::Error::NoteNotFound(_) => ApiError::NotFound(err.to_string()),
            memo_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            memo_core::Error::Unauthorized(msg) => ApiError::Unauthorized(msg.clone()),
            memo_core::Error::Conflict(msg) => ApiError::Conflict(msg.clone()),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_note_not_found_maps_to_404() {
        let id = Uuid::nil();
        let api_err: ApiError = memo_core::Error::NoteNotFound(id).into();
        assert!(matches!(api_err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let api_err: ApiError =
            memo_core::Error::Conflict("Username already exists".to_string()).into();
        match api_err {
            ApiError::Conflict(msg) => assert_eq!(msg, "Username already exists"),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let api_err: ApiError =
            memo_core::Error::InvalidInput("Title is required".to_string()).into();
        assert!(matches!(api_err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_inference_error_is_internal() {
        let api_err: ApiError = memo_core::Error::Inference("boom".to_string()).into();
        assert!(matches!(api_err, ApiError::Database(_)));
    }
}
