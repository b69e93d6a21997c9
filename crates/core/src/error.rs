use crate::types::DbId;

/// Domain-level failures surfaced by the auth and link operations.
///
/// The API crate maps each variant to an HTTP status and a JSON error body.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Registration hit the unique constraint on `users.username`.
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Login failed. Deliberately carries no detail about which check failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
