use std::sync::Arc;

use linkportal_db::DbPool;

use crate::auth::password::dummy_hash;
use crate::auth::service::AuthService;
use crate::auth::session::SessionManager;
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration (cookie settings are read by the auth handlers).
    pub config: Arc<ServerConfig>,
    /// Server-side session store.
    pub sessions: Arc<SessionManager>,
    /// Argon2 hash verified against when a login names an unknown user.
    pub dummy_hash: Arc<str>,
}

impl AppState {
    /// Wire up state from a connected pool. The session manager and the
    /// login dummy hash are created here, once, and shared by every request.
    ///
    /// Hashing runs synchronously; call this during startup, before serving.
    pub fn new(pool: DbPool, config: ServerConfig) -> AppResult<Self> {
        let dummy_hash = dummy_hash()
            .map_err(|e| AppError::InternalError(format!("Failed to prepare dummy hash: {e}")))?;
        let sessions = Arc::new(SessionManager::new(pool.clone(), &config.session));

        Ok(Self {
            pool,
            config: Arc::new(config),
            sessions,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Auth operations bound to this state's pool, session store and dummy hash.
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.pool, &self.sessions, &self.dummy_hash)
    }
}
