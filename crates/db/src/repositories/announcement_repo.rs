//! Repository for the `announcements` table.

use precinct_core::types::DbId;
use sqlx::PgPool;

use crate::models::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};

/// Column list for announcements queries.
const ANNOUNCEMENT_COLUMNS: &str =
    "id, title, content, pinned, author_id, created_at, updated_at";

/// Provides CRUD operations for announcements.
pub struct AnnouncementRepo;

impl AnnouncementRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements (title, content, author_id)
             VALUES ($1, $2, $3)
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.author_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements WHERE id = $1");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all announcements, pinned first, then newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM announcements
             ORDER BY pinned DESC, created_at DESC"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .fetch_all(pool)
            .await
    }

    /// Patch an announcement's title/content. Returns the updated row, or
    /// `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncement,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements
             SET title = COALESCE($2, title),
                 content = COALESCE($3, content),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the pinned flag. Returns the updated row, or `None`
    /// if the announcement does not exist.
    pub async fn set_pinned(
        pool: &PgPool,
        id: DbId,
        pinned: bool,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET pinned = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(pinned)
            .fetch_optional(pool)
            .await
    }

    /// Delete an announcement. Returns false if it does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
