//! Link entity model and DTOs.

use linkportal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A bookmarked URL owned by exactly one user.
///
/// Serialized in camelCase (`ownerId`, `createdAt`, `updatedAt`) as the
/// client expects.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: DbId,
    pub url: String,
    pub title: Option<String>,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a link. `url` is normalized by the repository.
#[derive(Debug)]
pub struct CreateLink {
    pub url: String,
    pub title: Option<String>,
}

/// DTO for replacing a link's url and title. The owner never changes.
#[derive(Debug)]
pub struct UpdateLink {
    pub url: String,
    pub title: Option<String>,
}
