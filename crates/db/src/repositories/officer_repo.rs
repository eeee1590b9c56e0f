//! Repository for the `officers` table.
//!
//! Every method that reads or mutates takes the registry's division and
//! filters on it; the per-division registries are disjoint and a profile
//! is never visible through another division's queries.

use precinct_core::types::DbId;
use sqlx::PgPool;

use crate::models::officer::{CreateOfficer, Officer, UpdateOfficer};

/// Column list for officers queries.
const OFFICER_COLUMNS: &str =
    "id, division, full_name, badge_number, rank, created_at, updated_at";

/// Provides CRUD operations for sanction-subject officer profiles.
pub struct OfficerRepo;

impl OfficerRepo {
    /// Insert a new officer profile into its division's registry.
    pub async fn create(pool: &PgPool, input: &CreateOfficer) -> Result<Officer, sqlx::Error> {
        let query = format!(
            "INSERT INTO officers (division, full_name, badge_number, rank)
             VALUES ($1, $2, $3, $4)
             RETURNING {OFFICER_COLUMNS}"
        );
        sqlx::query_as::<_, Officer>(&query)
            .bind(&input.division)
            .bind(&input.full_name)
            .bind(&input.badge_number)
            .bind(&input.rank)
            .fetch_one(pool)
            .await
    }

    /// Find an officer within one division's registry. A profile in a
    /// different division is not found.
    pub async fn find_in_division(
        pool: &PgPool,
        division: &str,
        id: DbId,
    ) -> Result<Option<Officer>, sqlx::Error> {
        let query = format!(
            "SELECT {OFFICER_COLUMNS} FROM officers WHERE id = $1 AND division = $2"
        );
        sqlx::query_as::<_, Officer>(&query)
            .bind(id)
            .bind(division)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Officer>, sqlx::Error> {
        let query = format!("SELECT {OFFICER_COLUMNS} FROM officers WHERE id = $1");
        sqlx::query_as::<_, Officer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one division's registry, ordered by name.
    pub async fn list_division(pool: &PgPool, division: &str) -> Result<Vec<Officer>, sqlx::Error> {
        let query = format!(
            "SELECT {OFFICER_COLUMNS} FROM officers
             WHERE division = $1
             ORDER BY full_name ASC"
        );
        sqlx::query_as::<_, Officer>(&query)
            .bind(division)
            .fetch_all(pool)
            .await
    }

    /// Patch an officer profile. Returns the updated row, or `None` if the
    /// officer does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOfficer,
    ) -> Result<Option<Officer>, sqlx::Error> {
        let query = format!(
            "UPDATE officers
             SET full_name = COALESCE($2, full_name),
                 badge_number = COALESCE($3, badge_number),
                 rank = COALESCE($4, rank),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {OFFICER_COLUMNS}"
        );
        sqlx::query_as::<_, Officer>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.badge_number)
            .bind(&input.rank)
            .fetch_optional(pool)
            .await
    }

    /// Delete an officer profile. The sanctions FK cascade removes their
    /// sanction history in the same statement, so the deletion is atomic
    /// from the caller's perspective. Returns false if the officer does
    /// not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM officers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
