//! Repository for the `cases`, `case_assignments`, and `case_counters`
//! tables.
//!
//! Status changes go through [`CaseRepo::update_status`], a compare-and-swap
//! against the current status string; zero rows affected means another
//! writer won the race (or the row is gone) and the caller must re-read.

use precinct_core::types::DbId;
use sqlx::PgPool;

use crate::models::case::{Case, CreateCase};

/// Column list for cases queries.
const CASE_COLUMNS: &str = "id, kind, case_number, title, location, description, occurred_at, \
    status, evidence_image_path, created_by, created_at, updated_at";

/// Provides CRUD operations for case files.
pub struct CaseRepo;

impl CaseRepo {
    /// Insert a new case, assigning the next display number for its kind
    /// and recording assignments, all in one transaction.
    ///
    /// The counter row is updated first; the row lock it takes serializes
    /// concurrent creations of the same kind, so numbers are unique and
    /// monotonic. Numbers consumed by a transaction that later aborts are
    /// simply gaps.
    pub async fn create(pool: &PgPool, input: &CreateCase) -> Result<Case, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (case_number,): (i64,) = sqlx::query_as(
            "UPDATE case_counters SET next_number = next_number + 1
             WHERE kind = $1
             RETURNING next_number - 1",
        )
        .bind(&input.kind)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO cases
                (kind, case_number, title, location, description, occurred_at,
                 evidence_image_path, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {CASE_COLUMNS}"
        );
        let case = sqlx::query_as::<_, Case>(&query)
            .bind(&input.kind)
            .bind(case_number)
            .bind(&input.title)
            .bind(&input.location)
            .bind(&input.description)
            .bind(input.occurred_at)
            .bind(&input.evidence_image_path)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        for user_id in &input.assignee_ids {
            sqlx::query("INSERT INTO case_assignments (case_id, user_id) VALUES ($1, $2)")
                .bind(case.id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(case)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Case>, sqlx::Error> {
        let query = format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = $1");
        sqlx::query_as::<_, Case>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List cases restricted to the given kinds, newest first.
    ///
    /// `kinds` is the caller's visibility filter (already narrowed to the
    /// divisions the actor may see). When `status` is `None`, archived
    /// cases are excluded; they are only listable under an explicit
    /// `archived` filter.
    pub async fn list(
        pool: &PgPool,
        kinds: &[String],
        status: Option<&str>,
    ) -> Result<Vec<Case>, sqlx::Error> {
        let query = format!(
            "SELECT {CASE_COLUMNS} FROM cases
             WHERE kind = ANY($1)
               AND (($2::text IS NULL AND status <> 'archived') OR status = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Case>(&query)
            .bind(kinds)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Compare-and-swap status update. Returns true iff the row still had
    /// `expected_status` and was updated.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        expected_status: &str,
        new_status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cases SET status = $3, updated_at = NOW()
             WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(expected_status)
        .bind(new_status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assigned user ids for a case.
    pub async fn list_assignees(pool: &PgPool, case_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM case_assignments WHERE case_id = $1 ORDER BY user_id ASC",
        )
        .bind(case_id)
        .fetch_all(pool)
        .await
    }

    /// Whether the user is assigned to the case.
    pub async fn is_assigned(
        pool: &PgPool,
        case_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM case_assignments WHERE case_id = $1 AND user_id = $2
             )",
        )
        .bind(case_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Delete a case. Assignments cascade; the display number is never
    /// reused. Returns false if the case does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cases WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
