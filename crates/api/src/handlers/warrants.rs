//! Handlers for warrant requests.
//!
//! Filing is open to every authenticated actor except helpers. Review
//! resolves a pending request exactly once: the reviewer identity and
//! timestamp are written in the same compare-and-swap as the terminal
//! status, and a re-review (or a lost race) surfaces as 409.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use precinct_core::error::CoreError;
use precinct_core::policy;
use precinct_core::types::DbId;
use precinct_core::warrant::{self, ReviewDecision, WarrantKind, WarrantStatus};
use precinct_core::workflow::{apply_transition, StateMachine};
use precinct_db::models::warrant::{CreateWarrant, Warrant};
use precinct_db::repositories::WarrantRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::cases::parse_stored;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /warrants`.
#[derive(Debug, Deserialize)]
pub struct CreateWarrantRequest {
    pub kind: String,
    pub target: String,
    pub location: Option<String>,
    pub reasoning: String,
}

/// Query parameters for `GET /warrants`.
#[derive(Debug, Deserialize)]
pub struct ListWarrantsParams {
    pub status: Option<String>,
}

/// Request body for `POST /warrants/{id}/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewWarrantRequest {
    pub decision: ReviewDecision,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/warrants
///
/// File a new warrant request. Helpers may not file.
pub async fn create_warrant(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWarrantRequest>,
) -> AppResult<impl IntoResponse> {
    if !policy::can_create_warrant(&auth.actor) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Helpers may not file warrant requests".into(),
        )));
    }

    let kind: WarrantKind = input.kind.parse()?;
    warrant::validate_new_warrant(&input.target, &input.reasoning)?;

    let create = CreateWarrant {
        kind: kind.as_str().to_string(),
        target: input.target,
        location: input.location,
        reasoning: input.reasoning,
        requested_by: auth.user_id(),
    };
    let created = WarrantRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id(),
        warrant_id = created.id,
        kind = %kind,
        "Warrant request filed"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/warrants
///
/// List warrant requests, optionally filtered by status.
pub async fn list_warrants(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListWarrantsParams>,
) -> AppResult<Json<DataResponse<Vec<Warrant>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<WarrantStatus>)
        .transpose()?;
    let warrants = WarrantRepo::list(&state.pool, status.map(StateMachine::as_str)).await?;
    Ok(Json(DataResponse { data: warrants }))
}

/// GET /api/v1/warrants/{id}
pub async fn get_warrant(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Warrant>>> {
    let warrant_row = WarrantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "Warrant",
            id,
        }))?;
    Ok(Json(DataResponse { data: warrant_row }))
}

/// POST /api/v1/warrants/{id}/review
///
/// Approve or reject a pending request. Reviewing an already-resolved
/// request is an invalid transition, not a silent no-op; losing a
/// concurrent race is a conflict.
pub async fn review_warrant(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewWarrantRequest>,
) -> AppResult<Json<DataResponse<Warrant>>> {
    if !policy::can_review_warrant(&auth.actor) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Warrant review requires a reviewing rank".into(),
        )));
    }

    let warrant_row = WarrantRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "Warrant",
            id,
        }))?;

    let current: WarrantStatus = parse_stored(&warrant_row.status)?;
    let new_status = apply_transition(current, input.decision.target_status())?;

    let reviewed = WarrantRepo::review(
        &state.pool,
        id,
        StateMachine::as_str(current),
        StateMachine::as_str(new_status),
        auth.user_id(),
    )
    .await?;

    let Some(updated) = reviewed else {
        // The compare-and-swap found a different status than the snapshot
        // this request validated against: another reviewer won the race.
        return match WarrantRepo::find_by_id(&state.pool, id).await? {
            None => Err(AppError::Core(CoreError::NotFound {
                entity: "Warrant",
                id,
            })),
            Some(_) => Err(AppError::Core(CoreError::Conflict(
                "Warrant was reviewed concurrently".to_string(),
            ))),
        };
    };

    tracing::info!(
        user_id = auth.user_id(),
        warrant_id = id,
        decision = StateMachine::as_str(new_status),
        "Warrant reviewed"
    );

    Ok(Json(DataResponse { data: updated }))
}
