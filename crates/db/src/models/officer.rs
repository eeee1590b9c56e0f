//! Sanction-subject officer profile model and DTOs.
//!
//! These are lightweight personnel records, distinct from user accounts;
//! a disciplined officer need not be able to log in.

use precinct_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `officers` table, scoped to one division's registry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Officer {
    pub id: DbId,
    pub division: String,
    pub full_name: String,
    pub badge_number: Option<String>,
    pub rank: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new officer profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOfficer {
    pub division: String,
    pub full_name: String,
    pub badge_number: Option<String>,
    pub rank: Option<String>,
}

/// DTO for updating an officer profile. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOfficer {
    pub full_name: Option<String>,
    pub badge_number: Option<String>,
    pub rank: Option<String>,
}
