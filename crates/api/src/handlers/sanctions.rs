//! Handlers for disciplinary sanctions.
//!
//! Sanctions have no lifecycle states; create, update, and delete are
//! each gated by manage rights on the division owning the subject
//! officer's registry. A linked case must belong to the same division.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use precinct_core::actor::Division;
use precinct_core::case::CaseKind;
use precinct_core::error::CoreError;
use precinct_core::sanction::{self, Severity};
use precinct_core::types::{DbId, Timestamp};
use precinct_db::models::sanction::{CreateSanction, Sanction, UpdateSanction};
use precinct_db::repositories::{CaseRepo, SanctionRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::cases::parse_stored;
use crate::handlers::officers::load_visible_officer;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /sanctions`.
#[derive(Debug, Deserialize)]
pub struct CreateSanctionRequest {
    pub officer_id: DbId,
    pub severity: String,
    pub description: String,
    pub incident_date: Timestamp,
    pub case_id: Option<DbId>,
}

/// Request body for `PUT /sanctions/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateSanctionRequest {
    pub severity: Option<String>,
    pub description: Option<String>,
    pub incident_date: Option<Timestamp>,
    pub case_id: Option<DbId>,
}

/// POST /api/v1/sanctions
///
/// Record a sanction against an officer in a registry the actor manages.
pub async fn create_sanction(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSanctionRequest>,
) -> AppResult<impl IntoResponse> {
    let officer = load_visible_officer(&state.pool, &auth.actor, input.officer_id).await?;
    let division: Division = parse_stored(&officer.division)?;

    let severity: Severity = input.severity.parse()?;
    sanction::validate_sanction_description(&input.description)?;
    if let Some(case_id) = input.case_id {
        validate_case_link(&state.pool, case_id, division).await?;
    }

    let create = CreateSanction {
        officer_id: officer.id,
        severity: severity.as_str().to_string(),
        description: input.description,
        incident_date: input.incident_date,
        case_id: input.case_id,
        created_by: auth.user_id(),
    };
    let created = SanctionRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id(),
        sanction_id = created.id,
        officer_id = officer.id,
        severity = %severity,
        "Sanction recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/sanctions/{id}
pub async fn get_sanction(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Sanction>>> {
    let sanction_row = load_visible_sanction(&state.pool, &auth, id).await?;
    Ok(Json(DataResponse { data: sanction_row }))
}

/// PUT /api/v1/sanctions/{id}
pub async fn update_sanction(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSanctionRequest>,
) -> AppResult<Json<DataResponse<Sanction>>> {
    let existing = load_visible_sanction(&state.pool, &auth, id).await?;

    let severity = input
        .severity
        .as_deref()
        .map(str::parse::<Severity>)
        .transpose()?;
    if let Some(description) = &input.description {
        sanction::validate_sanction_description(description)?;
    }
    if let Some(case_id) = input.case_id {
        let officer = load_visible_officer(&state.pool, &auth.actor, existing.officer_id).await?;
        let division: Division = parse_stored(&officer.division)?;
        validate_case_link(&state.pool, case_id, division).await?;
    }

    let update = UpdateSanction {
        severity: severity.map(|s| s.as_str().to_string()),
        description: input.description,
        incident_date: input.incident_date,
        case_id: input.case_id,
    };
    let updated = SanctionRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "Sanction",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/sanctions/{id}
pub async fn delete_sanction(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    load_visible_sanction(&state.pool, &auth, id).await?;

    let deleted = SanctionRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Sanction",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id(), sanction_id = id, "Sanction deleted");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": true }),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a sanction via its subject officer's registry gate. Denial and
/// absence are indistinguishable to the caller.
async fn load_visible_sanction(
    pool: &PgPool,
    auth: &AuthUser,
    id: DbId,
) -> Result<Sanction, AppError> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Sanction",
            id,
        })
    };

    let sanction_row = SanctionRepo::find_by_id(pool, id).await?.ok_or_else(not_found)?;
    // Visibility follows the subject officer's registry.
    load_visible_officer(pool, &auth.actor, sanction_row.officer_id)
        .await
        .map_err(|_| not_found())?;
    Ok(sanction_row)
}

/// A linked case must exist and belong to the same division as the
/// officer's registry.
async fn validate_case_link(
    pool: &PgPool,
    case_id: DbId,
    division: Division,
) -> Result<(), AppError> {
    let case_row = CaseRepo::find_by_id(pool, case_id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Linked case {case_id} does not exist"
        )))
    })?;
    let kind: CaseKind = parse_stored(&case_row.kind)?;
    if kind.owning_division() != division {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Linked case {case_id} belongs to a different division"
        ))));
    }
    Ok(())
}
