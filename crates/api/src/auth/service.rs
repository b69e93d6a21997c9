//! Registration, login, logout and caller resolution.
//!
//! Argon2 work runs on the blocking pool.

use linkportal_core::credentials::require_credentials;
use linkportal_core::error::CoreError;
use linkportal_db::models::user::{CreateUser, User};
use linkportal_db::repositories::UserRepo;
use linkportal_db::DbPool;

use super::password::{hash_password, verify_password};
use super::session::SessionManager;
use crate::error::{AppError, AppResult};

/// A user together with the token of the session just opened for them.
#[derive(Debug)]
pub struct Authenticated {
    pub user: User,
    pub token: String,
}

/// Credential checks and session lifecycle for the current caller.
///
/// Borrowed from [`AppState`](crate::state::AppState) per request via
/// [`AppState::auth`](crate::state::AppState::auth).
pub struct AuthService<'a> {
    pool: &'a DbPool,
    sessions: &'a SessionManager,
    dummy_hash: &'a str,
}

impl<'a> AuthService<'a> {
    /// `dummy_hash` must be a valid Argon2 hash, computed once at startup
    /// (see [`dummy_hash`](super::password::dummy_hash)).
    pub fn new(pool: &'a DbPool, sessions: &'a SessionManager, dummy_hash: &'a str) -> Self {
        Self {
            pool,
            sessions,
            dummy_hash,
        }
    }

    /// Create an account and log it in.
    ///
    /// Fails with [`CoreError::Validation`] on missing fields and with
    /// [`CoreError::DuplicateUsername`] when the username is taken. The
    /// uniqueness check is the insert itself, so a failed registration
    /// writes nothing.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<Authenticated> {
        require_credentials(username, password)?;

        let password_hash = hash_blocking(password.to_owned()).await?;
        let input = CreateUser {
            username: username.to_owned(),
            password_hash,
        };

        let user = match UserRepo::create(self.pool, &input).await {
            Ok(user) => user,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::info!("Registration rejected: username taken");
                return Err(CoreError::DuplicateUsername(input.username).into());
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.sessions.create(user.id).await?;
        tracing::info!(user_id = user.id, "User registered");

        Ok(Authenticated { user, token })
    }

    /// Check a username/password pair and open a new session.
    ///
    /// An unknown username and a wrong password both yield
    /// [`CoreError::InvalidCredentials`]. When the user does not exist the
    /// password is still verified against a throwaway hash so both paths
    /// cost about the same.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Authenticated> {
        require_credentials(username, password)?;

        let Some(user) = UserRepo::find_by_username(self.pool, username).await? else {
            let dummy = self.dummy_hash.to_owned();
            if let Err(e) = verify_blocking(password.to_owned(), dummy).await {
                tracing::error!(error = %e, "Dummy password verification failed");
            }
            tracing::info!("Login failed");
            return Err(CoreError::InvalidCredentials.into());
        };

        if !verify_blocking(password.to_owned(), user.password_hash.clone()).await? {
            tracing::info!("Login failed");
            return Err(CoreError::InvalidCredentials.into());
        }

        let token = self.sessions.create(user.id).await?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok(Authenticated { user, token })
    }

    /// Destroy the caller's session. Succeeds whether or not a live session
    /// was attached.
    pub async fn logout(&self, token: Option<&str>) -> AppResult<()> {
        if let Some(token) = token {
            self.sessions.destroy(token).await?;
        }
        Ok(())
    }

    /// Resolve the caller's session to a user, or `None` if there is no
    /// live session.
    pub async fn current_user(&self, token: Option<&str>) -> AppResult<Option<User>> {
        let Some(token) = token else {
            return Ok(None);
        };
        let Some(user_id) = self.sessions.resolve(token).await? else {
            return Ok(None);
        };
        Ok(UserRepo::find_by_id(self.pool, user_id).await?)
    }
}

async fn hash_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

async fn verify_blocking(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}
