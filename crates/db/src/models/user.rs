//! User account model and DTOs.

use precinct_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table. The password hash never leaves the API
/// layer; handlers project into a public shape before responding.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. Divisions are inserted in the same
/// transaction as the account row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub divisions: Vec<String>,
}

/// DTO for updating a user's role and division memberships.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserAccess {
    pub role: Option<String>,
    pub divisions: Option<Vec<String>>,
}
