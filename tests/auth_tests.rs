mod common;

use axum::http::{Method, StatusCode, header};
use common::{get, send, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_register_returns_user_without_password() {
    let (_, app) = spawn_app().await;

    let response = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({
            "name": "Ann",
            "email": "ann@example.com",
            "password": "secret1",
            "role": "admin",
        })),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "User registered successfully");

    let user = &response.body["data"];
    assert_eq!(user["email"], "ann@example.com");
    assert_eq!(user["name"], "Ann");
    assert_eq!(user["role"], "user");
    assert!(user["id"].is_string());
    assert!(user.get("password").is_none());
    assert!(!response.body.to_string().contains("$argon2"));
}

#[tokio::test]
async fn test_register_duplicate_email_is_rejected() {
    let (_, app) = spawn_app().await;
    let body = json!({"name": "Ann", "email": "ann@example.com", "password": "secret1"});

    let first = send(&app, Method::POST, "/api/auth/register", Some(body), None).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"name": "Other", "email": "ann@example.com", "password": "different"})),
        None,
    )
    .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["success"], false);
    assert_eq!(second.body["error"], "User with this email already exists");
}

#[tokio::test]
async fn test_register_validation() {
    let (_, app) = spawn_app().await;

    let response = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"name": "Ann", "email": "ann@example.com", "password": "12345"})),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Password must be at least 6 characters");

    let response = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"email": "ann@example.com", "password": "123456"})),
        None,
    )
    .await;
    assert_eq!(response.body["error"], "Name is required");
}

#[tokio::test]
async fn test_login_failures_share_message() {
    let (_, app) = spawn_app().await;

    send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"name": "Ann", "email": "ann@example.com", "password": "secret1"})),
        None,
    )
    .await;

    let wrong_password = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "ann@example.com", "password": "wrong-password"})),
        None,
    )
    .await;
    let unknown_email = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "nobody@example.com", "password": "secret1"})),
        None,
    )
    .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["error"], "Invalid email or password");
    assert_eq!(wrong_password.body["error"], unknown_email.body["error"]);
    assert!(wrong_password.headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_login_sets_cookie_and_token_authenticates() {
    let (_, app) = spawn_app().await;

    send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"name": "Ann", "email": "ann@example.com", "password": "secret1"})),
        None,
    )
    .await;

    let response = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": "ann@example.com", "password": "secret1"})),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login successful");
    assert!(response.body["data"]["user"].get("password").is_none());

    let token = response.body["data"]["token"].as_str().unwrap().to_string();
    let cookie = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with(&format!("token={token}")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(!cookie.contains("Secure"));

    let me = send(&app, Method::GET, "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["email"], "ann@example.com");
    assert_eq!(me.body["data"]["role"], "user");
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let (_, app) = spawn_app().await;

    let response = get(&app, "/api/auth/me").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);

    let response = send(&app, Method::GET, "/api/auth/me", None, Some("not-a-jwt")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (_, app) = spawn_app().await;

    let response = send(&app, Method::POST, "/api/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let cookie = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
}
