//! Handlers for case files (criminal and internal affairs).
//!
//! Every read masks division-visibility denials as 404 so the existence
//! of other-division cases does not leak. Transitions run the full
//! sequence: visibility, edge validity, transition authorization, then a
//! compare-and-swap write; a lost race surfaces as 409.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use precinct_core::actor::{Actor, Division, Role};
use precinct_core::case::{self, CaseKind, CaseStatus};
use precinct_core::error::CoreError;
use precinct_core::policy;
use precinct_core::types::{DbId, Timestamp};
use precinct_core::workflow::{apply_transition, StateMachine};
use precinct_db::models::case::{Case, CaseWithAssignees, CreateCase};
use precinct_db::repositories::{CaseRepo, UserRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /cases`.
#[derive(Debug, Deserialize)]
pub struct CreateCaseRequest {
    pub kind: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub occurred_at: Timestamp,
    pub evidence_image_path: Option<String>,
    #[serde(default)]
    pub assignee_ids: Vec<DbId>,
}

/// Query parameters for `GET /cases`.
#[derive(Debug, Deserialize)]
pub struct ListCasesParams {
    pub kind: Option<String>,
    pub status: Option<String>,
}

/// Request body for `POST /cases/{id}/transition`.
#[derive(Debug, Deserialize)]
pub struct TransitionCaseRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/cases
///
/// Open a new case file in the kind's registry. The display number is
/// assigned inside the insert transaction; assignees must belong to the
/// owning division (or be administrators).
pub async fn create_case(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCaseRequest>,
) -> AppResult<impl IntoResponse> {
    let kind: CaseKind = input.kind.parse()?;

    if !policy::can_manage_division_record(&auth.actor, kind.owning_division()) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Creating {kind} cases requires {} membership",
            kind.owning_division()
        ))));
    }

    case::validate_new_case(&input.title, &input.location, &input.description)?;

    for assignee_id in &input.assignee_ids {
        let assignee = load_actor(&state.pool, *assignee_id).await?.ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Assignee {assignee_id} does not exist"
            )))
        })?;
        case::validate_assignee(&assignee, kind)?;
    }

    let create = CreateCase {
        kind: kind.as_str().to_string(),
        title: input.title,
        location: input.location,
        description: input.description,
        occurred_at: input.occurred_at,
        evidence_image_path: input.evidence_image_path,
        created_by: auth.user_id(),
        assignee_ids: input.assignee_ids,
    };

    let created = CaseRepo::create(&state.pool, &create).await?;
    let assignee_ids = CaseRepo::list_assignees(&state.pool, created.id).await?;

    tracing::info!(
        user_id = auth.user_id(),
        case_id = created.id,
        kind = %kind,
        case_number = created.case_number,
        "Case created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CaseWithAssignees {
                case: created,
                assignee_ids,
            },
        }),
    ))
}

/// GET /api/v1/cases
///
/// List case files, restricted to the kinds the actor's divisions admit.
/// Archived cases appear only under an explicit `?status=archived`.
pub async fn list_cases(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListCasesParams>,
) -> AppResult<Json<DataResponse<Vec<Case>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<CaseStatus>)
        .transpose()?;

    let mut kinds: Vec<CaseKind> = case::ALL_CASE_KINDS
        .iter()
        .copied()
        .filter(|k| case::can_view_case(&auth.actor, *k))
        .collect();
    if let Some(requested) = params.kind.as_deref() {
        let requested: CaseKind = requested.parse()?;
        kinds.retain(|k| *k == requested);
    }

    if kinds.is_empty() {
        return Ok(Json(DataResponse { data: Vec::new() }));
    }

    let kind_strings: Vec<String> = kinds.iter().map(|k| k.as_str().to_string()).collect();
    let cases = CaseRepo::list(
        &state.pool,
        &kind_strings,
        status.map(StateMachine::as_str),
    )
    .await?;
    Ok(Json(DataResponse { data: cases }))
}

/// GET /api/v1/cases/{id}
pub async fn get_case(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CaseWithAssignees>>> {
    let case_row = load_visible_case(&state.pool, &auth.actor, id).await?;
    let assignee_ids = CaseRepo::list_assignees(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: CaseWithAssignees {
            case: case_row,
            assignee_ids,
        },
    }))
}

/// POST /api/v1/cases/{id}/transition
///
/// Move a case through its lifecycle. Exactly one of two concurrent
/// transitions against the same case succeeds; the loser observes 409.
pub async fn transition_case(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionCaseRequest>,
) -> AppResult<Json<DataResponse<Case>>> {
    let target: CaseStatus = input.status.parse()?;

    let case_row = load_visible_case(&state.pool, &auth.actor, id).await?;
    let kind: CaseKind = parse_stored(&case_row.kind)?;
    let current: CaseStatus = parse_stored(&case_row.status)?;

    let new_status = apply_transition(current, target)?;

    let is_assigned = CaseRepo::is_assigned(&state.pool, id, auth.user_id()).await?;
    if !case::can_transition_case(&auth.actor, kind, is_assigned, current, new_status) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Not permitted to move this case from {} to {}",
            StateMachine::as_str(current),
            StateMachine::as_str(new_status)
        ))));
    }

    let swapped = CaseRepo::update_status(
        &state.pool,
        id,
        StateMachine::as_str(current),
        StateMachine::as_str(new_status),
    )
    .await?;
    if !swapped {
        // Lost the single-writer race (or the case vanished). Re-read to
        // classify; the snapshot this request validated against is stale
        // either way.
        return match CaseRepo::find_by_id(&state.pool, id).await? {
            None => Err(AppError::Core(CoreError::NotFound {
                entity: "Case",
                id,
            })),
            Some(_) => Err(AppError::Core(CoreError::Conflict(
                "Case was modified concurrently; re-read and retry".to_string(),
            ))),
        };
    }

    tracing::info!(
        user_id = auth.user_id(),
        case_id = id,
        from = StateMachine::as_str(current),
        to = StateMachine::as_str(new_status),
        "Case transitioned"
    );

    let updated = CaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Case", id }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/cases/{id}
///
/// Delete a case file and its assignments. The display number is never
/// reused.
pub async fn delete_case(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    load_visible_case(&state.pool, &auth.actor, id).await?;

    let deleted = CaseRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Case", id }));
    }

    tracing::info!(user_id = auth.user_id(), case_id = id, "Case deleted");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": true }),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a case and enforce division visibility. Denial and absence are
/// deliberately indistinguishable to the caller.
async fn load_visible_case(pool: &PgPool, actor: &Actor, id: DbId) -> Result<Case, AppError> {
    let not_found = || AppError::Core(CoreError::NotFound { entity: "Case", id });

    let case_row = CaseRepo::find_by_id(pool, id).await?.ok_or_else(not_found)?;
    let kind: CaseKind = parse_stored(&case_row.kind)?;
    if !case::can_view_case(actor, kind) {
        return Err(not_found());
    }
    Ok(case_row)
}

/// Build the policy-actor view of a stored user, for assignee validation.
pub(crate) async fn load_actor(pool: &PgPool, user_id: DbId) -> Result<Option<Actor>, AppError> {
    let Some(user) = UserRepo::find_by_id(pool, user_id).await? else {
        return Ok(None);
    };
    let role: Role = parse_stored(&user.role)?;
    let divisions = UserRepo::divisions(pool, user_id)
        .await?
        .iter()
        .map(|d| parse_stored::<Division>(d))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(Actor::new(user.id, role, divisions)))
}

/// Parse a stored enum string. Stored values are written from the closed
/// vocabularies, so a failure here is data corruption, not caller error.
pub(crate) fn parse_stored<T>(value: &str) -> Result<T, AppError>
where
    T: std::str::FromStr<Err = CoreError>,
{
    value
        .parse()
        .map_err(|e: CoreError| AppError::InternalError(e.to_string()))
}
