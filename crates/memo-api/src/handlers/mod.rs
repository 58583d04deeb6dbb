pub mod auth;
pub mod notes;

use axum::Json;

/// Liveness probe. No authentication, no database access.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "memo-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
