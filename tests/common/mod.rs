#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use lettuce::api::AppState;
use lettuce::config::{Config, SecurityConfig};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// In-memory store with cheap Argon2 parameters.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.database.elevated_key = Some("test-elevated-key".to_string());
    config.database.max_connections = 1;
    config.database.min_connections = 1;
    config.auth.jwt_secret = Some("test-secret".to_string());
    config.observability.metrics_enabled = false;
    config.security = SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };
    config
}

pub async fn spawn_app_with(config: Config) -> (Arc<AppState>, Router) {
    let state = lettuce::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");
    let router = lettuce::api::router(state.clone());
    (state, router)
}

pub async fn spawn_app() -> (Arc<AppState>, Router) {
    spawn_app_with(test_config()).await
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None, None).await
}

/// Registers an account and returns a session token for it.
pub async fn login_token(app: &Router) -> String {
    let email = format!("{}@example.com", uuid::Uuid::new_v4());
    let response = send(
        app,
        Method::POST,
        "/api/auth/register",
        Some(json!({"name": "Tester", "email": email, "password": "secret123"})),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = send(
        app,
        Method::POST,
        "/api/auth/login",
        Some(json!({"email": email, "password": "secret123"})),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    response.body["data"]["token"]
        .as_str()
        .expect("login returns a token")
        .to_string()
}

pub fn recipe_body(entry_number: i64, slug: &str) -> Value {
    json!({
        "entry_number": entry_number,
        "title": format!("Day {entry_number}"),
        "slug": slug,
        "date": "2024-01-01",
        "ingredients": ["kale", "lemon", "olive oil"],
        "steps": ["Wash the kale", "Massage with lemon and oil"],
    })
}
