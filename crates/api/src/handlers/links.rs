//! Handlers for the caller's links.
//!
//! Every handler takes [`AuthUser`], so the session gate runs before any
//! body is parsed. Lookups are scoped to the caller inside the repository:
//! another user's link produces the same 404 as a missing one.

use axum::extract::State;
use axum::Json;
use linkportal_core::error::CoreError;
use linkportal_core::links::require_url;
use linkportal_core::types::DbId;
use linkportal_db::models::link::{CreateLink, Link, UpdateLink};
use linkportal_db::repositories::LinkRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for creating or replacing a link.
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl LinkRequest {
    /// Split into `(url, title)` after the URL presence check.
    fn into_parts(self) -> AppResult<(String, Option<String>)> {
        let url = self.url.unwrap_or_default();
        require_url(&url)?;
        Ok((url, self.title))
    }
}

/// Body returned by `DELETE /links/{id}`.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// GET /api/links
pub async fn list(user: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Link>>> {
    let links = LinkRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(links))
}

/// POST /api/links
///
/// The URL is stored with an `https://` prefix if it has no scheme.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<LinkRequest>,
) -> AppResult<Json<Link>> {
    let (url, title) = input.into_parts()?;
    let link = LinkRepo::create(&state.pool, user.user_id, &CreateLink { url, title }).await?;

    tracing::info!(user_id = user.user_id, link_id = link.id, "Link created");
    Ok(Json(link))
}

/// PUT /api/links/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<LinkRequest>,
) -> AppResult<Json<Link>> {
    let (url, title) = input.into_parts()?;
    let link = LinkRepo::update(&state.pool, user.user_id, id, &UpdateLink { url, title })
        .await?
        .ok_or(CoreError::NotFound { entity: "Link", id })?;

    tracing::info!(user_id = user.user_id, link_id = id, "Link updated");
    Ok(Json(link))
}

/// DELETE /api/links/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !LinkRepo::delete(&state.pool, user.user_id, id).await? {
        return Err(CoreError::NotFound { entity: "Link", id }.into());
    }

    tracing::info!(user_id = user.user_id, link_id = id, "Link deleted");
    Ok(Json(SuccessResponse { success: true }))
}
