//! API Integration Tests
//!
//! Each test starts its own server on a loopback port with an in-memory
//! credential store, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, test_token_service, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["credential_store"], "ok");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Signup Tests
// ============================================================================

#[tokio::test]
async fn test_signup() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/signup", &Credentials::new("alice", "pw1"))
        .await
        .unwrap();
    let body: SignupResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(body.message, "signup successful");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let server = TestServer::start().await.expect("Failed to start server");
    let alice = Credentials::new("alice", "pw1");

    let response = server.post("/signup", &alice).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/signup", &alice).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error, "user exists");
}

#[tokio::test]
async fn test_concurrent_signups_single_winner() {
    let server = TestServer::start().await.expect("Failed to start server");
    let carol = Credentials::new("carol", "pw1");

    let (first, second) = tokio::join!(
        server.post("/signup", &carol),
        server.post("/signup", &carol)
    );

    let mut statuses = [first.unwrap().status(), second.unwrap().status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn test_signup_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post_raw("/signup", "{\"username\":").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_raw("/signup", r#"{"username":"alice"}"#)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_signup_empty_password() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/signup", &Credentials::new("alice", ""))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_signup_nul_in_username() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_raw("/signup", r#"{"username":"al\u0000ice","password":"pw1"}"#)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.code, "VALIDATION_ERROR");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_signup_then_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let alice = Credentials::new("alice", "pw1");

    let response = server.post("/signup", &alice).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/login", &alice).await.unwrap();
    let body: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message, "login successful");

    let claims = test_token_service()
        .unwrap()
        .validate(&body.token)
        .expect("token should validate with the shared secret");
    assert_eq!(claims.subject(), "alice");
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/signup", &Credentials::new("alice", "pw1"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/login", &Credentials::new("alice", "wrong"))
        .await
        .unwrap();
    let wrong_password: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    let response = server
        .post("/login", &Credentials::new("bob", "pw1"))
        .await
        .unwrap();
    let unknown_user: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password.error, "invalid credentials");
}

#[tokio::test]
async fn test_login_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post_raw("/login", "not json").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.code, "INVALID_BODY");
}
