#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use todo_core::auth::jwt::JwtConfig;
use tower::ServiceExt;

use todo_api::config::ServerConfig;
use todo_api::router::build_app_router;
use todo_api::state::AppState;

pub const TEST_PASSWORD: &str = "correct-horse";

/// Build a test `ServerConfig` with safe defaults and the in-memory backend.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "api-test-secret-at-least-32-bytes-long".to_string(),
        },
        session_ttl_hours: 24,
        case_insensitive_emails: true,
        secure_cookies: false,
        database_url: None,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState::new(config.clone(), None);
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, empty_request("GET", uri, None)).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("GET", uri, Some(token))).await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn post_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("POST", uri, Some(token))).await
}

pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(app, empty_request("DELETE", uri, Some(token))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register `email` with [`TEST_PASSWORD`] and return the session token.
pub async fn register_and_login(app: &Router, email: &str) -> String {
    let body = serde_json::json!({
        "email": email,
        "password": TEST_PASSWORD,
        "name": "Test User",
        "timezone": "UTC",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a tag and return its id.
pub async fn create_tag(app: &Router, token: &str, name: &str) -> String {
    let response = post_json_auth(
        app,
        "/api/v1/tags",
        token,
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}
