#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use linkportal_api::auth::cookie::SESSION_COOKIE_NAME;
use linkportal_api::auth::session::SessionConfig;
use linkportal_api::config::ServerConfig;
use linkportal_api::router::build_app_router;
use linkportal_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        session: SessionConfig::default(),
    }
}

/// Build the full application router using the given database pool.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone()).expect("app state should build");
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request with an optional JSON body and optional `Cookie` header.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    send(app, Method::GET, uri, None, Some(cookie)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_with_cookie(app: Router, uri: &str, body: Value, cookie: &str) -> Response {
    send(app, Method::POST, uri, Some(body), Some(cookie)).await
}

pub async fn put_json_with_cookie(app: Router, uri: &str, body: Value, cookie: &str) -> Response {
    send(app, Method::PUT, uri, Some(body), Some(cookie)).await
}

pub async fn delete_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    send(app, Method::DELETE, uri, None, Some(cookie)).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn send_raw_json(
    app: Router,
    method: Method,
    uri: &str,
    raw: &'static str,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.oneshot(builder.body(Body::from(raw)).unwrap())
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The raw `Set-Cookie` header for the session cookie, if one was set.
pub fn set_cookie_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(str::to_owned)
}

/// `name=value` pair suitable for a `Cookie` request header.
pub fn session_cookie_from(response: &Response) -> String {
    let header = set_cookie_header(response).expect("response should set the session cookie");
    header
        .split(';')
        .next()
        .expect("Set-Cookie has a name=value pair")
        .to_string()
}

// ---------------------------------------------------------------------------
// Flow helpers
// ---------------------------------------------------------------------------

/// Register `username` through the API and return its session cookie.
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app.clone(), "/api/register", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie_from(&response)
}

/// Log in through the API and return the new session cookie.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app.clone(), "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie_from(&response)
}
