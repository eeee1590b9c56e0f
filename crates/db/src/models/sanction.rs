//! Disciplinary sanction model and DTOs.

use precinct_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sanctions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sanction {
    pub id: DbId,
    pub officer_id: DbId,
    pub severity: String,
    pub description: String,
    pub incident_date: Timestamp,
    pub case_id: Option<DbId>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new sanction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSanction {
    pub officer_id: DbId,
    pub severity: String,
    pub description: String,
    pub incident_date: Timestamp,
    pub case_id: Option<DbId>,
    pub created_by: DbId,
}

/// DTO for updating a sanction. All fields are optional; the subject
/// officer cannot be changed after creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSanction {
    pub severity: Option<String>,
    pub description: Option<String>,
    pub incident_date: Option<Timestamp>,
    pub case_id: Option<DbId>,
}
