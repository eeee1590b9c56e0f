//! Handlers for feature navigation and policy checks.
//!
//! `GET /features` drives the navigation shell: it returns exactly the
//! catalog entries the actor's divisions (or administrator role) admit.
//! `GET /policy/check` exposes the policy evaluator for UI affordances
//! (e.g. hiding a pin button); unknown actions deny.

use axum::extract::{Query, State};
use axum::Json;
use precinct_core::actor::Division;
use precinct_core::policy::{self, Action, Decision};
use precinct_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/features
///
/// The feature keys visible to the authenticated actor, in catalog order.
pub async fn visible_features(
    auth: AuthUser,
    State(_state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<&'static str>>>> {
    let features = policy::visible_features(&auth.actor);
    Ok(Json(DataResponse { data: features }))
}

/// Query parameters for `GET /policy/check`.
#[derive(Debug, Deserialize)]
pub struct PolicyCheckParams {
    pub action: String,
    pub feature: Option<String>,
    pub division: Option<String>,
    pub author_id: Option<DbId>,
}

/// Response payload for `GET /policy/check`.
#[derive(Debug, Serialize)]
pub struct PolicyCheckResponse {
    pub decision: Decision,
}

/// GET /api/v1/policy/check
///
/// Evaluate a single policy action for the authenticated actor. Malformed
/// or unknown action parameters resolve to Deny, never to an error that
/// could be mistaken for Allow.
pub async fn check_policy(
    auth: AuthUser,
    State(_state): State<AppState>,
    Query(params): Query<PolicyCheckParams>,
) -> AppResult<Json<DataResponse<PolicyCheckResponse>>> {
    let decision = match params.action.as_str() {
        "access_feature" => match params.feature.as_deref() {
            Some(key) => policy::evaluate(&auth.actor, Action::AccessFeature(key)),
            None => Decision::Deny,
        },
        "post" => policy::evaluate(&auth.actor, Action::Post),
        "pin" => policy::evaluate(&auth.actor, Action::Pin),
        "create_warrant" => policy::evaluate(&auth.actor, Action::CreateWarrant),
        "review_warrant" => policy::evaluate(&auth.actor, Action::ReviewWarrant),
        "delete_announcement" => match params.author_id {
            Some(author_id) => {
                policy::evaluate(&auth.actor, Action::DeleteAnnouncement { author_id })
            }
            None => Decision::Deny,
        },
        "manage_division_record" => {
            match params.division.as_deref().map(str::parse::<Division>) {
                Some(Ok(division)) => {
                    policy::evaluate(&auth.actor, Action::ManageDivisionRecord(division))
                }
                // Unknown division string: fail closed.
                _ => Decision::Deny,
            }
        }
        // Unknown action: fail closed.
        _ => Decision::Deny,
    };

    Ok(Json(DataResponse {
        data: PolicyCheckResponse { decision },
    }))
}
