//! Repository for the `sanctions` table.

use precinct_core::types::DbId;
use sqlx::PgPool;

use crate::models::sanction::{CreateSanction, Sanction, UpdateSanction};

/// Column list for sanctions queries.
const SANCTION_COLUMNS: &str = "id, officer_id, severity, description, incident_date, case_id, \
    created_by, created_at, updated_at";

/// Provides CRUD operations for disciplinary sanctions.
pub struct SanctionRepo;

impl SanctionRepo {
    pub async fn create(pool: &PgPool, input: &CreateSanction) -> Result<Sanction, sqlx::Error> {
        let query = format!(
            "INSERT INTO sanctions
                (officer_id, severity, description, incident_date, case_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {SANCTION_COLUMNS}"
        );
        sqlx::query_as::<_, Sanction>(&query)
            .bind(input.officer_id)
            .bind(&input.severity)
            .bind(&input.description)
            .bind(input.incident_date)
            .bind(input.case_id)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sanction>, sqlx::Error> {
        let query = format!("SELECT {SANCTION_COLUMNS} FROM sanctions WHERE id = $1");
        sqlx::query_as::<_, Sanction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an officer's sanction history, newest incident first.
    pub async fn list_for_officer(
        pool: &PgPool,
        officer_id: DbId,
    ) -> Result<Vec<Sanction>, sqlx::Error> {
        let query = format!(
            "SELECT {SANCTION_COLUMNS} FROM sanctions
             WHERE officer_id = $1
             ORDER BY incident_date DESC"
        );
        sqlx::query_as::<_, Sanction>(&query)
            .bind(officer_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a sanction. Returns the updated row, or `None` if the
    /// sanction does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSanction,
    ) -> Result<Option<Sanction>, sqlx::Error> {
        let query = format!(
            "UPDATE sanctions
             SET severity = COALESCE($2, severity),
                 description = COALESCE($3, description),
                 incident_date = COALESCE($4, incident_date),
                 case_id = COALESCE($5, case_id),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {SANCTION_COLUMNS}"
        );
        sqlx::query_as::<_, Sanction>(&query)
            .bind(id)
            .bind(&input.severity)
            .bind(&input.description)
            .bind(input.incident_date)
            .bind(input.case_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a sanction. Returns false if it does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sanctions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
