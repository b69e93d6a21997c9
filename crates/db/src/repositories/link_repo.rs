//! Repository for the `links` table.
//!
//! Every method takes the caller's user id and folds it into the SQL
//! `WHERE` clause. A link owned by someone else is therefore
//! indistinguishable from one that does not exist.

use linkportal_core::links::{normalize_title, normalize_url};
use linkportal_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::link::{CreateLink, Link, UpdateLink};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, url, title, owner_id, created_at, updated_at";

/// Provides owner-scoped CRUD operations for links.
pub struct LinkRepo;

impl LinkRepo {
    /// List the owner's links in insertion order.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        owner_id: DbId,
    ) -> Result<Vec<Link>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM links WHERE owner_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Link>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a link for `owner_id`, normalizing the URL scheme first.
    pub async fn create(
        pool: &SqlitePool,
        owner_id: DbId,
        input: &CreateLink,
    ) -> Result<Link, sqlx::Error> {
        let query = format!(
            "INSERT INTO links (owner_id, url, title)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(owner_id)
            .bind(normalize_url(&input.url))
            .bind(normalize_title(input.title.as_deref()))
            .fetch_one(pool)
            .await
    }

    /// Replace the url and title of a link owned by `owner_id`.
    ///
    /// Returns `None` if no link with `id` is owned by `owner_id`.
    pub async fn update(
        pool: &SqlitePool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateLink,
    ) -> Result<Option<Link>, sqlx::Error> {
        let query = format!(
            "UPDATE links SET
                url = $3,
                title = $4,
                updated_at = CURRENT_TIMESTAMP
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Link>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(normalize_url(&input.url))
            .bind(normalize_title(input.title.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a link owned by `owner_id`. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
