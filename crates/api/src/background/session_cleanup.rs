//! Periodic removal of expired sessions.
//!
//! Expired sessions are already rejected on lookup; this job only keeps the
//! `sessions` table from growing without bound.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::auth::session::SessionManager;

/// Run the session cleanup loop until `cancel` is triggered.
///
/// The first sweep happens immediately, then once per `interval`.
pub async fn run(sessions: Arc<SessionManager>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Session cleanup job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session cleanup job stopping");
                break;
            }
            _ = ticker.tick() => {
                match sessions.purge_expired().await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session cleanup: purged expired sessions");
                    }
                    Ok(_) => {
                        tracing::debug!("Session cleanup: nothing to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session cleanup: sweep failed");
                    }
                }
            }
        }
    }
}
