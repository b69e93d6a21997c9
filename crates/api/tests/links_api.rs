//! HTTP-level integration tests for the `/api/links` resource.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, delete_with_cookie, get, get_with_cookie, login, post_json, post_json_with_cookie,
    put_json_with_cookie, register, send, send_raw_json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a link through the API and return its JSON representation.
async fn create_link(app: &axum::Router, cookie: &str, body: Value) -> Value {
    let response = post_json_with_cookie(app.clone(), "/api/links", body, cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn list_links(app: &axum::Router, cookie: &str) -> Vec<Value> {
    let response = get_with_cookie(app.clone(), "/api/links", cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response)
        .await
        .as_array()
        .cloned()
        .expect("list should be a JSON array")
}

// ---------------------------------------------------------------------------
// End-to-end flow
// ---------------------------------------------------------------------------

/// Register, create a link, log out, log back in and find the link again.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_links_survive_logout_and_login(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/register",
        json!({ "username": "alice", "password": "pw123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = common::session_cookie_from(&response);
    assert_eq!(body_json(response).await, json!({ "id": 1, "username": "alice" }));

    let link = create_link(
        &app,
        &cookie,
        json!({ "url": "example.com", "title": "Example" }),
    )
    .await;
    assert_eq!(link["url"], "https://example.com");
    assert_eq!(link["title"], "Example");
    assert_eq!(link["ownerId"], 1);

    let response = send(
        app.clone(),
        Method::POST,
        "/api/logout",
        None,
        Some(cookie.as_str()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_with_cookie(app.clone(), "/api/user", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = login(&app, "alice", "pw123").await;
    let links = list_links(&app, &cookie).await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["id"], link["id"]);
    assert_eq!(links[0]["url"], "https://example.com");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_link_response_shape(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let cookie = register(&app, "alice", "pw123").await;

    let link = create_link(
        &app,
        &cookie,
        json!({ "url": "https://rust-lang.org", "title": "Rust" }),
    )
    .await;

    assert!(link["id"].is_number());
    assert_eq!(link["url"], "https://rust-lang.org");
    assert!(link["createdAt"].is_string());
    assert!(link["updatedAt"].is_string());
    assert!(link.get("owner_id").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_link_normalizes_url(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let cookie = register(&app, "alice", "pw123").await;

    for (input, stored) in [
        ("example.com", "https://example.com"),
        ("http://example.com", "http://example.com"),
        ("https://example.com/a?b=c", "https://example.com/a?b=c"),
    ] {
        let link = create_link(&app, &cookie, json!({ "url": input })).await;
        assert_eq!(link["url"], stored, "input: {input}");
    }
}

/// A missing or blank title is stored as null.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_link_without_title(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let cookie = register(&app, "alice", "pw123").await;

    let untitled = create_link(&app, &cookie, json!({ "url": "example.com" })).await;
    assert!(untitled["title"].is_null());

    let blank = create_link(&app, &cookie, json!({ "url": "example.com", "title": "  " })).await;
    assert!(blank["title"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_link_requires_url(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let cookie = register(&app, "alice", "pw123").await;

    for body in [json!({ "title": "No url" }), json!({ "url": "   " })] {
        let response = post_json_with_cookie(app.clone(), "/api/links", body, &cookie).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "URL is required");
    }

    assert!(list_links(&app, &cookie).await.is_empty());
}

// ---------------------------------------------------------------------------
// Authentication gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_link_routes_require_session(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let responses = [
        get(app.clone(), "/api/links").await,
        post_json(app.clone(), "/api/links", json!({ "url": "example.com" })).await,
        send(
            app.clone(),
            Method::PUT,
            "/api/links/1",
            Some(json!({ "url": "example.com" })),
            None,
        )
        .await,
        send(app.clone(), Method::DELETE, "/api/links/1", None, None).await,
        get_with_cookie(app.clone(), "/api/links", "portal_session=forged").await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Not authenticated");
    }
}

/// The session check runs before the body is parsed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unauthenticated_malformed_body_is_401(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = send_raw_json(app, Method::POST, "/api/links", "{oops", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_only_returns_own_links(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice", "pw123").await;
    let bob = register(&app, "bob", "hunter2").await;

    create_link(&app, &alice, json!({ "url": "a.example" })).await;
    create_link(&app, &bob, json!({ "url": "b.example" })).await;
    create_link(&app, &alice, json!({ "url": "c.example" })).await;

    let links = list_links(&app, &alice).await;
    let urls: Vec<&str> = links.iter().map(|l| l["url"].as_str().unwrap()).collect();
    assert_eq!(urls, ["https://a.example", "https://c.example"]);

    let links = list_links(&app, &bob).await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["ownerId"], 2);
}

/// Another user's link is reported exactly like a missing one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_foreign_link_is_not_found(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let alice = register(&app, "alice", "pw123").await;
    let bob = register(&app, "bob", "hunter2").await;

    let link = create_link(&app, &alice, json!({ "url": "a.example", "title": "A" })).await;
    let id = link["id"].as_i64().unwrap();
    let uri = format!("/api/links/{id}");

    let response = put_json_with_cookie(
        app.clone(),
        &uri,
        json!({ "url": "evil.example" }),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let foreign = body_json(response).await;
    assert_eq!(foreign["error"], format!("Link with id {id} not found"));

    let response = delete_with_cookie(app.clone(), &uri, &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let links = list_links(&app, &alice).await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["url"], "https://a.example");
    assert_eq!(links[0]["title"], "A");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_link(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let cookie = register(&app, "alice", "pw123").await;
    let link = create_link(&app, &cookie, json!({ "url": "old.example", "title": "Old" })).await;
    let uri = format!("/api/links/{}", link["id"]);

    let response = put_json_with_cookie(
        app.clone(),
        &uri,
        json!({ "url": "new.example", "title": "New" }),
        &cookie,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["id"], link["id"]);
    assert_eq!(updated["url"], "https://new.example");
    assert_eq!(updated["title"], "New");
    assert_eq!(updated["ownerId"], link["ownerId"]);
    assert_eq!(updated["createdAt"], link["createdAt"]);
}

/// PUT replaces the title; omitting it clears the old one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_link_clears_omitted_title(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let cookie = register(&app, "alice", "pw123").await;
    let link = create_link(&app, &cookie, json!({ "url": "a.example", "title": "A" })).await;
    let uri = format!("/api/links/{}", link["id"]);

    let response =
        put_json_with_cookie(app.clone(), &uri, json!({ "url": "a.example" }), &cookie).await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert!(updated["title"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_link_validation(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let cookie = register(&app, "alice", "pw123").await;
    let link = create_link(&app, &cookie, json!({ "url": "a.example" })).await;
    let uri = format!("/api/links/{}", link["id"]);

    let response = put_json_with_cookie(app.clone(), &uri, json!({ "title": "x" }), &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "URL is required");

    let response = put_json_with_cookie(
        app.clone(),
        "/api/links/999",
        json!({ "url": "a.example" }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_numeric_id_is_bad_request(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let cookie = register(&app, "alice", "pw123").await;

    let response = delete_with_cookie(app, "/api/links/abc", &cookie).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_link(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let cookie = register(&app, "alice", "pw123").await;
    let link = create_link(&app, &cookie, json!({ "url": "a.example" })).await;
    let uri = format!("/api/links/{}", link["id"]);

    let response = delete_with_cookie(app.clone(), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    assert!(list_links(&app, &cookie).await.is_empty());

    let response = delete_with_cookie(app.clone(), &uri, &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
