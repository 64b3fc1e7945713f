//! Shared fixtures: an in-memory SQLite database with migrations applied.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database as SeaDatabase};
use serde_json::Value;
use tower::ServiceExt;

use user_auth_api::api::{create_router, AppState};
use user_auth_api::config::Config;
use user_auth_api::infra::Database;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "APP_ENV" => Some("test".to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "JWT_SECRET_KEY" => Some(TEST_SECRET.to_string()),
        _ => None,
    })
    .unwrap()
}

/// Single-connection pool: every SQLite `:memory:` connection is its own database.
pub async fn test_database() -> Arc<Database> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let database = Database::from_connection(SeaDatabase::connect(options).await.unwrap());
    database.run_migrations().await.unwrap();
    Arc::new(database)
}

pub async fn test_app() -> Router {
    let config = test_config();
    let state = AppState::from_config(test_database().await, &config);
    create_router(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn token_request(username: &str, password: &str) -> Request<Body> {
    let form = format!(
        "grant_type=password&username={}&password={}",
        encode(username),
        encode(password)
    );
    Request::builder()
        .method("POST")
        .uri("/api/v1/auth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap()
}

pub fn bearer_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Percent-encode the characters our fixtures use that are special in forms.
fn encode(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('+', "%2B")
        .replace('@', "%40")
        .replace('&', "%26")
        .replace('=', "%3D")
        .replace(' ', "+")
}
