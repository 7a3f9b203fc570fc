//! Integration tests for registration and session tokens.

mod helpers;

use axum::http::StatusCode;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_returns_login() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({ "login": "alice0001", "pswd": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["response"]["login"], "alice0001");
}

#[tokio::test]
async fn test_register_rejects_bad_login_before_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({ "login": "bad", "pswd": "weak" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], 400);
    assert_eq!(response.error_text(), "Login length must be between 8 and 20.");
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({ "login": "alice0001", "pswd": "alllowercase1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.error_text().starts_with("Password must be"));
}

#[tokio::test]
async fn test_register_duplicate_login() {
    let app = TestApp::new();
    app.register("alice0001").await;

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({ "login": "alice0001", "pswd": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_text(), "Login already taken.");
}

#[tokio::test]
async fn test_register_with_wrong_admin_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/register",
            Some(serde_json::json!({ "login": "mallory01", "pswd": PASSWORD, "token": "guess" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.register("alice0001").await;

    let response = app
        .request(
            "POST",
            "/api/auth",
            Some(serde_json::json!({ "login": "alice0001", "pswd": "Wr0ng!Pass" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_text(), "Wrong credentials.");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth",
            Some(serde_json::json!({ "login": "nobody001", "pswd": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/auth", Some(serde_json::json!({ "login": 5 })), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_second_login_supersedes_first_token() {
    let app = TestApp::new();
    app.register("alice0001").await;

    let first = app.login("alice0001").await;
    let second = app.login("alice0001").await;
    assert_ne!(first, second);
    assert_eq!(app.db.token_count().await, 1);

    let stale = app.request("GET", "/api/docs", None, Some(&first)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let fresh = app.request("GET", "/api/docs", None, Some(&second)).await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new();
    let token = app.user("alice0001").await;

    let response = app
        .request("DELETE", &format!("/api/auth/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["response"][token.as_str()], true);

    let after = app.request("GET", "/api/docs", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    let again = app
        .request("DELETE", &format!("/api/auth/{token}"), None, None)
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_accepted_as_query_parameter() {
    let app = TestApp::new();
    let token = app.user("alice0001").await;

    let response = app
        .request("GET", &format!("/api/docs?token={token}"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
