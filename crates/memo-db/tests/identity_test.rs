//! Integration tests for user registration and bearer-token sessions.

use memo_db::{CreateUserRequest, Database, Error, SessionRepository, UserRepository};

async fn test_db() -> Database {
    Database::connect_in_memory()
        .await
        .expect("in-memory database should connect")
}

fn alice_request() -> CreateUserRequest {
    CreateUserRequest {
        username: "alice".into(),
        email: "alice@example.com".into(),
        password_hash: memo_crypto::hash_password("correct horse").unwrap(),
    }
}

#[tokio::test]
async fn test_create_and_find_user() {
    let db = test_db().await;

    let created = db.users.create(alice_request()).await.unwrap();
    assert_eq!(created.username, "alice");
    assert_eq!(created.email, "alice@example.com");

    let found = db
        .users
        .find_by_username("alice")
        .await
        .unwrap()
        .expect("user should be found by username");
    assert_eq!(found.id, created.id);
    assert!(memo_crypto::verify_password(&found.password_hash, "correct horse").unwrap());

    assert!(db.users.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let db = test_db().await;
    db.users.create(alice_request()).await.unwrap();

    let err = db
        .users
        .create(CreateUserRequest {
            username: "alice".into(),
            email: "alice2@example.com".into(),
            password_hash: memo_crypto::hash_password("pw").unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(msg) if msg.contains("Username")));
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let db = test_db().await;
    db.users.create(alice_request()).await.unwrap();

    let err = db
        .users
        .create(CreateUserRequest {
            username: "alice2".into(),
            email: "alice@example.com".into(),
            password_hash: memo_crypto::hash_password("pw").unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(msg) if msg.contains("Email")));
}

#[tokio::test]
async fn test_session_create_resolve_revoke() {
    let db = test_db().await;
    let user = db.users.create(alice_request()).await.unwrap();

    let token = db.sessions.create(user.id).await.unwrap();
    assert_eq!(token.len(), 64);

    let resolved = db
        .sessions
        .resolve(&token)
        .await
        .unwrap()
        .expect("fresh token should resolve");
    assert_eq!(resolved.id, user.id);
    assert_eq!(resolved.username, "alice");

    db.sessions.revoke(&token).await.unwrap();
    assert!(db.sessions.resolve(&token).await.unwrap().is_none());

    // Revoking again is a no-op.
    db.sessions.revoke(&token).await.unwrap();
}

#[tokio::test]
async fn test_unknown_token_does_not_resolve() {
    let db = test_db().await;
    assert!(db
        .sessions
        .resolve("not-a-real-token")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_expired_session_does_not_resolve() {
    let db = test_db().await;
    let user = db.users.create(alice_request()).await.unwrap();

    // Zero TTL expires the session at creation time.
    let sessions = db.sessions.clone().with_ttl_days(0);
    let token = sessions.create(user.id).await.unwrap();

    assert!(sessions.resolve(&token).await.unwrap().is_none());
}

#[tokio::test]
async fn test_tokens_are_unique_per_login() {
    let db = test_db().await;
    let user = db.users.create(alice_request()).await.unwrap();

    let a = db.sessions.create(user.id).await.unwrap();
    let b = db.sessions.create(user.id).await.unwrap();
    assert_ne!(a, b);

    // Both remain valid until revoked.
    assert!(db.sessions.resolve(&a).await.unwrap().is_some());
    assert!(db.sessions.resolve(&b).await.unwrap().is_some());

    db.sessions.revoke(&a).await.unwrap();
    assert!(db.sessions.resolve(&a).await.unwrap().is_none());
    assert!(db.sessions.resolve(&b).await.unwrap().is_some());
}
