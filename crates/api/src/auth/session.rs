//! Server-side session management.
//!
//! A session token is 32 bytes from the OS-seeded CSPRNG, hex encoded. The
//! plaintext goes to the client in an HTTP-only cookie; only its SHA-256
//! digest is persisted.

use chrono::Utc;
use linkportal_core::types::DbId;
use linkportal_db::models::session::CreateSession;
use linkportal_db::repositories::SessionRepo;
use linkportal_db::DbPool;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::config::{env_or, ConfigError};

/// Number of random bytes in a session token (64 hex characters).
const TOKEN_BYTES: usize = 32;

/// Default session lifetime in hours.
const DEFAULT_TTL_HOURS: i64 = 24;

/// Default interval between expired-session sweeps.
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 900;

/// Session lifetime and cookie configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session lifetime in hours; also used as the cookie `Max-Age`.
    pub ttl_hours: i64,
    /// Seconds between background sweeps of expired sessions.
    pub cleanup_interval_secs: u64,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: DEFAULT_TTL_HOURS,
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
            cookie_secure: false,
        }
    }
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                         | Default |
    /// |---------------------------------|---------|
    /// | `SESSION_TTL_HOURS`             | `24`    |
    /// | `SESSION_CLEANUP_INTERVAL_SECS` | `900`   |
    /// | `COOKIE_SECURE`                 | `false` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let ttl_hours: i64 = env_or("SESSION_TTL_HOURS", DEFAULT_TTL_HOURS)?;
        if ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                var: "SESSION_TTL_HOURS",
                value: ttl_hours.to_string(),
            });
        }

        let cleanup_interval_secs: u64 =
            env_or("SESSION_CLEANUP_INTERVAL_SECS", DEFAULT_CLEANUP_INTERVAL_SECS)?;
        if cleanup_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SESSION_CLEANUP_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            ttl_hours,
            cleanup_interval_secs,
            cookie_secure: env_or("COOKIE_SECURE", false)?,
        })
    }
}

/// Generate a fresh opaque session token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Compute the SHA-256 hex digest of a session token.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Issues, resolves and destroys sessions against the `sessions` table.
///
/// Built once at startup and shared through [`AppState`](crate::state::AppState).
#[derive(Debug, Clone)]
pub struct SessionManager {
    pool: DbPool,
    ttl: chrono::Duration,
}

impl SessionManager {
    pub fn new(pool: DbPool, config: &SessionConfig) -> Self {
        Self {
            pool,
            ttl: chrono::Duration::hours(config.ttl_hours),
        }
    }

    /// Start a session for `user_id` and return the plaintext token.
    ///
    /// Every call creates an independent session; existing sessions for the
    /// same user stay valid.
    pub async fn create(&self, user_id: DbId) -> Result<String, sqlx::Error> {
        let token = generate_token();
        let input = CreateSession {
            user_id,
            token_hash: hash_token(&token),
            expires_at: Utc::now() + self.ttl,
        };
        SessionRepo::create(&self.pool, &input).await?;
        tracing::debug!(user_id, "Session created");
        Ok(token)
    }

    /// Resolve a token to the owning user id, or `None` if it is unknown,
    /// destroyed or expired.
    pub async fn resolve(&self, token: &str) -> Result<Option<DbId>, sqlx::Error> {
        SessionRepo::find_active_user_id(&self.pool, &hash_token(token), Utc::now()).await
    }

    /// Destroy the session behind `token`. Unknown tokens are ignored.
    pub async fn destroy(&self, token: &str) -> Result<(), sqlx::Error> {
        let removed = SessionRepo::delete_by_token_hash(&self.pool, &hash_token(token)).await?;
        tracing::debug!(removed, "Session destroyed");
        Ok(())
    }

    /// Delete every expired session. Returns the number removed.
    pub async fn purge_expired(&self) -> Result<u64, sqlx::Error> {
        SessionRepo::delete_expired(&self.pool, Utc::now()).await
    }
}
