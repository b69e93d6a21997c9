pub mod auth;
pub mod health;
pub mod links;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                 create account + session (public)
/// /login                    start session (public)
/// /logout                   end session (public, idempotent)
/// /user                     current user (session required)
///
/// /links                    list, create (session required)
/// /links/{id}               update, delete (session required, owner only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Account and session routes.
        .merge(auth::router())
        // Owner-scoped link management.
        .nest("/links", links::router())
}
