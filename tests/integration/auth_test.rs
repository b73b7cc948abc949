//! Integration tests for registration, login and the session gate.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use helpers::TestApp;

#[tokio::test]
async fn test_register_sets_session_cookie() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "alice",
                "email": "alice@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/user/username"), Some("alice"));
    assert_eq!(response.str_at("/user/email"), Some("alice@test.com"));
    assert!(response.body.pointer("/user/id").is_some());
    assert!(response.body.pointer("/user/password_hash").is_none());

    let cookie = response.set_cookie("auth_token").expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": "alice", "password": "p" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.str_at("/error"),
        Some("Username, email, and password are required")
    );
    assert_eq!(response.str_at("/code"), Some("VALIDATION"));
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::new();

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_username_or_email() {
    let app = TestApp::new();
    app.register("alice", "password123").await;

    let same_name = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "alice",
                "email": "other@test.com",
                "password": "x",
            })),
            None,
        )
        .await;
    assert_eq!(same_name.status, StatusCode::CONFLICT);
    assert_eq!(
        same_name.str_at("/error"),
        Some("Username or email already exists")
    );

    let same_email = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "bob",
                "email": "alice@test.com",
                "password": "x",
            })),
            None,
        )
        .await;
    assert_eq!(same_email.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_by_username_and_email() {
    let app = TestApp::new();
    app.register("alice", "password123").await;

    for login in ["alice", "alice@test.com"] {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "username": login, "password": "password123" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login as {login}");
        assert_eq!(response.str_at("/user/username"), Some("alice"));
        assert!(response.session_cookie("auth_token").is_some());
    }
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::new();
    app.register("alice", "password123").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "alice", "password": "nope" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "nobody", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.str_at("/error"), Some("Invalid credentials"));
    assert_eq!(wrong_password.body, unknown_user.body);
    assert!(wrong_password.set_cookie("auth_token").is_none());
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "alice" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.str_at("/error"),
        Some("Username and password are required")
    );
}

#[tokio::test]
async fn test_check_before_and_after_login() {
    let app = TestApp::new();

    let anonymous = app.request("GET", "/api/auth/check", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body, serde_json::json!({ "authenticated": false }));

    let cookie = app.register("alice", "password123").await;
    let checked = app
        .request("GET", "/api/auth/check", None, Some(&cookie))
        .await;
    assert_eq!(checked.status, StatusCode::OK);
    assert_eq!(checked.body["authenticated"], true);
    assert_eq!(checked.str_at("/user/username"), Some("alice"));
}

#[tokio::test]
async fn test_me_requires_session() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password123").await;

    let me = app.request("GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.str_at("/user/username"), Some("alice"));

    let anonymous = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.str_at("/error"), Some("Authentication required"));

    let forged = app
        .request("GET", "/api/auth/me", None, Some("auth_token=not.a.token"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged.body, anonymous.body);
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password123").await;
    let token = cookie.trim_start_matches("auth_token=");

    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "alice",
                "email": "alice@test.com",
                "password": "password123",
            })),
            None,
        )
        .await;
    let cookie = response.session_cookie("auth_token").unwrap();
    let user_id = response.str_at("/user/id").unwrap().parse().unwrap();

    assert!(app.catalog.remove_user(user_id).await);

    let me = app.request("GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let mut config = cloudbox_core::config::AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.session_ttl_days = -1;
    let app = TestApp::with_config(config);

    let cookie = app.register("alice", "password123").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&cookie)).await;

    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password123").await;

    let mut other_config = cloudbox_core::config::AppConfig::default();
    other_config.auth.jwt_secret = "a-different-secret".to_string();
    let other = TestApp::with_config(other_config);

    let me = other.request("GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    let cookie = app.register("alice", "password123").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "success": true }));

    let cleared = response.set_cookie("auth_token").expect("removal cookie");
    assert!(cleared.starts_with("auth_token=;"));
    assert!(cleared.contains("Max-Age=0"));

    let anonymous = app.request("POST", "/api/auth/logout", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert!(anonymous.set_cookie("auth_token").is_some());
}

#[tokio::test]
async fn test_health_reports_backends() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/status"), Some("ok"));
    assert_eq!(response.str_at("/database"), Some("memory"));
    assert_eq!(response.str_at("/storage"), Some("available"));
    assert!(response.str_at("/version").is_some());
}
