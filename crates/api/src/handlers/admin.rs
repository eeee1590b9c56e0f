//! Handlers for administrator-only user management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use precinct_core::actor::{Division, Role};
use precinct_core::error::CoreError;
use precinct_core::types::DbId;
use precinct_db::models::user::{CreateUser, User};
use precinct_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub divisions: Vec<String>,
}

/// Request body for `PUT /admin/users/{id}/access`.
#[derive(Debug, Deserialize)]
pub struct UpdateAccessRequest {
    pub role: Option<String>,
    pub divisions: Option<Vec<String>>,
}

/// A user row together with their division memberships.
#[derive(Debug, Serialize)]
pub struct UserWithDivisions {
    #[serde(flatten)]
    pub user: User,
    pub divisions: Vec<String>,
}

/// POST /api/v1/admin/users
///
/// Create an account. Role and divisions must come from the closed
/// vocabularies; anything else is rejected.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let role: Role = input.role.parse()?;
    let divisions = parse_divisions(&input.divisions)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let create = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        role: role.as_str().to_string(),
        divisions: divisions.iter().map(|d| d.as_str().to_string()).collect(),
    };
    let user = UserRepo::create(&state.pool, &create).await?;
    let divisions = UserRepo::divisions(&state.pool, user.id).await?;

    tracing::info!(
        admin_id = admin.user_id(),
        user_id = user.id,
        role = %role,
        "User created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserWithDivisions { user, divisions },
        }),
    ))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserWithDivisions>>>> {
    let users = UserRepo::list_all(&state.pool).await?;
    let mut out = Vec::with_capacity(users.len());
    for user in users {
        let divisions = UserRepo::divisions(&state.pool, user.id).await?;
        out.push(UserWithDivisions { user, divisions });
    }
    Ok(Json(DataResponse { data: out }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserWithDivisions>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let divisions = UserRepo::divisions(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: UserWithDivisions { user, divisions },
    }))
}

/// PUT /api/v1/admin/users/{id}/access
///
/// Replace a user's role and/or division memberships. Existing tokens
/// keep their old claims until they expire; the short access-token
/// lifetime bounds the window.
pub async fn update_access(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAccessRequest>,
) -> AppResult<Json<DataResponse<UserWithDivisions>>> {
    let existing = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let role: Role = input.role.as_deref().unwrap_or(&existing.role).parse()?;
    let divisions = match &input.divisions {
        Some(divisions) => parse_divisions(divisions)?
            .iter()
            .map(|d| d.as_str().to_string())
            .collect(),
        None => UserRepo::divisions(&state.pool, id).await?,
    };

    let updated = UserRepo::set_access(&state.pool, id, role.as_str(), &divisions).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(
        admin_id = admin.user_id(),
        user_id = id,
        role = %role,
        "User access updated"
    );

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    let divisions = UserRepo::divisions(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: UserWithDivisions { user, divisions },
    }))
}

/// POST /api/v1/admin/users/{id}/deactivate
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(admin_id = admin.user_id(), user_id = id, "User deactivated");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "deactivated": true }),
    }))
}

fn parse_divisions(raw: &[String]) -> Result<Vec<Division>, AppError> {
    raw.iter()
        .map(|d| d.parse::<Division>().map_err(AppError::from))
        .collect()
}
