//! Handlers for the per-division officer registries.
//!
//! Officers are sanction-subject personnel profiles, not user accounts.
//! Each profile belongs to exactly one division's registry and is only
//! reachable through actors with manage rights on that division; lookups
//! from outside mask the denial as 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use precinct_core::actor::{Actor, Division};
use precinct_core::error::CoreError;
use precinct_core::policy;
use precinct_core::sanction;
use precinct_core::types::DbId;
use precinct_db::models::officer::{CreateOfficer, Officer, UpdateOfficer};
use precinct_db::repositories::{OfficerRepo, SanctionRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::cases::parse_stored;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /officers`.
#[derive(Debug, Deserialize)]
pub struct CreateOfficerRequest {
    pub division: String,
    pub full_name: String,
    pub badge_number: Option<String>,
    pub rank: Option<String>,
}

/// Query parameters for `GET /officers`.
#[derive(Debug, Deserialize)]
pub struct ListOfficersParams {
    pub division: String,
}

/// POST /api/v1/officers
///
/// Add an officer profile to a division's registry.
pub async fn create_officer(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateOfficerRequest>,
) -> AppResult<impl IntoResponse> {
    let division: Division = input.division.parse()?;
    require_manage(&auth, division)?;
    sanction::validate_new_officer(&input.full_name)?;

    let create = CreateOfficer {
        division: division.as_str().to_string(),
        full_name: input.full_name,
        badge_number: input.badge_number,
        rank: input.rank,
    };
    let created = OfficerRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id(),
        officer_id = created.id,
        division = %division,
        "Officer profile created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/officers?division=...
///
/// List one division's registry. The division parameter is required;
/// there is no cross-registry listing.
pub async fn list_officers(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListOfficersParams>,
) -> AppResult<Json<DataResponse<Vec<Officer>>>> {
    let division: Division = params.division.parse()?;
    require_manage(&auth, division)?;

    let officers = OfficerRepo::list_division(&state.pool, division.as_str()).await?;
    Ok(Json(DataResponse { data: officers }))
}

/// GET /api/v1/officers/{id}
pub async fn get_officer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Officer>>> {
    let officer = load_visible_officer(&state.pool, &auth.actor, id).await?;
    Ok(Json(DataResponse { data: officer }))
}

/// PUT /api/v1/officers/{id}
pub async fn update_officer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOfficer>,
) -> AppResult<Json<DataResponse<Officer>>> {
    load_visible_officer(&state.pool, &auth.actor, id).await?;
    if let Some(full_name) = &input.full_name {
        sanction::validate_new_officer(full_name)?;
    }

    let updated = OfficerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "Officer",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/officers/{id}
///
/// Remove an officer profile. Their sanction history is removed in the
/// same atomic cascade.
pub async fn delete_officer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    load_visible_officer(&state.pool, &auth.actor, id).await?;

    let deleted = OfficerRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Officer",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id(), officer_id = id, "Officer profile deleted");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": true }),
    }))
}

/// GET /api/v1/officers/{id}/sanctions
///
/// An officer's sanction history, newest incident first.
pub async fn list_officer_sanctions(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<precinct_db::models::sanction::Sanction>>>> {
    load_visible_officer(&state.pool, &auth.actor, id).await?;
    let sanctions = SanctionRepo::list_for_officer(&state.pool, id).await?;
    Ok(Json(DataResponse { data: sanctions }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_manage(auth: &AuthUser, division: Division) -> Result<(), AppError> {
    if policy::can_manage_division_record(&auth.actor, division) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Managing the {division} registry requires membership"
        ))))
    }
}

/// Load an officer and enforce registry visibility. Denial and absence
/// are indistinguishable to the caller.
pub(crate) async fn load_visible_officer(
    pool: &PgPool,
    actor: &Actor,
    id: DbId,
) -> Result<Officer, AppError> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Officer",
            id,
        })
    };

    let officer = OfficerRepo::find_by_id(pool, id).await?.ok_or_else(not_found)?;
    let division: Division = parse_stored(&officer.division)?;
    if !policy::can_manage_division_record(actor, division) {
        return Err(not_found());
    }
    Ok(officer)
}
