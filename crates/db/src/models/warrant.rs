//! Warrant request model and DTOs.

use precinct_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `warrants` table. `reviewed_by` and `reviewed_at` are
/// set atomically with the terminal status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Warrant {
    pub id: DbId,
    pub kind: String,
    pub target: String,
    pub location: Option<String>,
    pub reasoning: String,
    pub status: String,
    pub requested_by: DbId,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a new warrant request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWarrant {
    pub kind: String,
    pub target: String,
    pub location: Option<String>,
    pub reasoning: String,
    pub requested_by: DbId,
}
