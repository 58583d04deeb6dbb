//! End-to-end tests for registration, login, and logout over HTTP.

use std::sync::Arc;

use memo_api::{build_router, AppState};
use memo_db::Database;
use memo_inference::mock::MockGenerationBackend;

async fn spawn_app() -> String {
    let db = Database::connect_in_memory().await.unwrap();
    let state = AppState::new(db, Arc::new(MockGenerationBackend::new()));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn register(base: &str, client: &reqwest::Client, username: &str) -> serde_json::Value {
    let response = client
        .post(format!("{}/api/v1/auth/register", base))
        .json(&serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "correct horse",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_register_returns_user_and_token() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let body = register(&base, &client, "alice").await;

    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["token"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_register_rejects_missing_fields() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/v1/auth/register", base))
        .json(&serde_json::json!({
            "username": "  ",
            "email": "a@example.com",
            "password": "pw",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    register(&base, &client, "alice").await;

    let response = client
        .post(format!("{}/api/v1/auth/register", base))
        .json(&serde_json::json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "pw",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn test_login_returns_fresh_token() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let registered = register(&base, &client, "alice").await;

    let response = client
        .post(format!("{}/api/v1/auth/login", base))
        .json(&serde_json::json!({
            "username": "alice",
            "password": "correct horse",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user"]["username"], "alice");
    assert_ne!(body["token"], registered["token"]);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    register(&base, &client, "alice").await;

    let wrong_password = client
        .post(format!("{}/api/v1/auth/login", base))
        .json(&serde_json::json!({"username": "alice", "password": "nope"}))
        .send()
        .await
        .unwrap();
    let unknown_user = client
        .post(format!("{}/api/v1/auth/login", base))
        .json(&serde_json::json!({"username": "mallory", "password": "nope"}))
        .send()
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_user.status(), 401);

    let a: serde_json::Value = wrong_password.json().await.unwrap();
    let b: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(a["error"], b["error"], "responses must not leak which part failed");
}

#[tokio::test]
async fn test_logout_revokes_the_session() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let body = register(&base, &client, "alice").await;
    let token = body["token"].as_str().unwrap();

    let response = client
        .post(format!("{}/api/v1/auth/logout", base))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    // The revoked token no longer opens protected routes.
    let response = client
        .get(format!("{}/api/v1/notes", base))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_protected_routes_require_a_token() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/v1/notes", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = client
        .get(format!("{}/api/v1/notes", base))
        .bearer_auth("forged-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_health_is_public() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}
