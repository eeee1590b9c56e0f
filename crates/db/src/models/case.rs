//! Case file model and DTOs.

use precinct_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cases` table. `kind` and `status` hold the stable
/// string forms of the core enums.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Case {
    pub id: DbId,
    pub kind: String,
    /// Display sequence number, monotonic per kind, never reused.
    pub case_number: i64,
    pub title: String,
    pub location: String,
    pub description: String,
    pub occurred_at: Timestamp,
    pub status: String,
    pub evidence_image_path: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new case. The case number is assigned inside the
/// insert transaction, not supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCase {
    pub kind: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub occurred_at: Timestamp,
    pub evidence_image_path: Option<String>,
    pub created_by: DbId,
    pub assignee_ids: Vec<DbId>,
}

/// A case together with its assigned actor ids, as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct CaseWithAssignees {
    #[serde(flatten)]
    pub case: Case,
    pub assignee_ids: Vec<DbId>,
}
