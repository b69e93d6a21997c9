//! Handlers for registration, login, logout and the current-user endpoint.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use linkportal_core::error::CoreError;
use linkportal_db::models::user::UserResponse;
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{removal_cookie, session_cookie, session_token};
use crate::auth::service::Authenticated;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register` and `POST /login`.
///
/// Fields are optional at the serde level; absent or null values reach the
/// presence check and get the usual `Missing fields` error.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

/// Body returned by `POST /logout`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/register
///
/// Create an account and start a session for it.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<CredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    let auth = state
        .auth()
        .register(input.username(), input.password())
        .await?;
    Ok(session_response(&state, auth))
}

/// POST /api/login
///
/// Authenticate with username + password and start a session.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<CredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    let auth = state
        .auth()
        .login(input.username(), input.password())
        .await?;
    Ok(session_response(&state, auth))
}

/// POST /api/logout
///
/// Destroy the caller's session, if any, and clear the cookie. Always 200.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    state
        .auth()
        .logout(session_token(&headers).as_deref())
        .await?;

    Ok((
        [(SET_COOKIE, removal_cookie(&state.config.session))],
        Json(MessageResponse {
            message: "Logged out",
        }),
    ))
}

/// GET /api/user
///
/// Return the logged-in user, or 401 when there is no live session.
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .auth()
        .current_user(session_token(&headers).as_deref())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Not logged in".into())))?;

    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `{id, username}` plus the `Set-Cookie` header carrying the new session.
fn session_response(state: &AppState, auth: Authenticated) -> impl IntoResponse {
    let cookie = session_cookie(&auth.token, &state.config.session);
    ([(SET_COOKIE, cookie)], Json(UserResponse::from(&auth.user)))
}
