//! Repository for the `warrants` table.
//!
//! Review is a compare-and-swap against `status = 'pending'` that writes
//! the terminal status, reviewer, and review timestamp in one statement,
//! so two concurrent reviews resolve to exactly one winner.

use precinct_core::types::DbId;
use sqlx::PgPool;

use crate::models::warrant::{CreateWarrant, Warrant};

/// Column list for warrants queries.
const WARRANT_COLUMNS: &str = "id, kind, target, location, reasoning, status, requested_by, \
    reviewed_by, reviewed_at, created_at, updated_at";

/// Provides CRUD operations for warrant requests.
pub struct WarrantRepo;

impl WarrantRepo {
    /// File a new warrant request in the Pending state.
    pub async fn create(pool: &PgPool, input: &CreateWarrant) -> Result<Warrant, sqlx::Error> {
        let query = format!(
            "INSERT INTO warrants (kind, target, location, reasoning, requested_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {WARRANT_COLUMNS}"
        );
        sqlx::query_as::<_, Warrant>(&query)
            .bind(&input.kind)
            .bind(&input.target)
            .bind(&input.location)
            .bind(&input.reasoning)
            .bind(input.requested_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Warrant>, sqlx::Error> {
        let query = format!("SELECT {WARRANT_COLUMNS} FROM warrants WHERE id = $1");
        sqlx::query_as::<_, Warrant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List warrant requests, optionally filtered by status, newest first.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Warrant>, sqlx::Error> {
        let query = format!(
            "SELECT {WARRANT_COLUMNS} FROM warrants
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Warrant>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Resolve a pending request. Compare-and-swap: returns the updated
    /// row iff the request was still in `expected_status`; `None` means
    /// this call lost the race (or the row is gone) and the caller must
    /// re-read to classify the failure.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        expected_status: &str,
        new_status: &str,
        reviewer_id: DbId,
    ) -> Result<Option<Warrant>, sqlx::Error> {
        let query = format!(
            "UPDATE warrants
             SET status = $3, reviewed_by = $4, reviewed_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING {WARRANT_COLUMNS}"
        );
        sqlx::query_as::<_, Warrant>(&query)
            .bind(id)
            .bind(expected_status)
            .bind(new_status)
            .bind(reviewer_id)
            .fetch_optional(pool)
            .await
    }
}
