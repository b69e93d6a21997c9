//! Route definitions for the `/links` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::links;
use crate::state::AppState;

/// Routes mounted at `/links`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(links::list).post(links::create))
        .route("/{id}", put(links::update).delete(links::delete))
}
