//! Handlers for org-wide announcements.
//!
//! Announcements are visible to everyone; posting, editing, deleting,
//! and pinning are role-gated through the policy evaluator rather than
//! by division.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use precinct_core::announcement::validate_announcement;
use precinct_core::error::CoreError;
use precinct_core::policy;
use precinct_core::types::DbId;
use precinct_db::models::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};
use precinct_db::repositories::AnnouncementRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /announcements`.
#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
}

/// POST /api/v1/announcements
pub async fn create_announcement(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAnnouncementRequest>,
) -> AppResult<impl IntoResponse> {
    if !policy::can_post(&auth.actor) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Posting announcements requires a posting rank".into(),
        )));
    }
    validate_announcement(&input.title, &input.content)?;

    let create = CreateAnnouncement {
        title: input.title,
        content: input.content,
        author_id: auth.user_id(),
    };
    let created = AnnouncementRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id(),
        announcement_id = created.id,
        "Announcement posted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/announcements
///
/// All announcements, pinned first.
pub async fn list_announcements(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Announcement>>>> {
    let announcements = AnnouncementRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: announcements }))
}

/// GET /api/v1/announcements/{id}
pub async fn get_announcement(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Announcement>>> {
    let announcement = find_announcement(&state, id).await?;
    Ok(Json(DataResponse { data: announcement }))
}

/// PUT /api/v1/announcements/{id}
///
/// Edit an announcement: the author, or the elevated pin set.
pub async fn update_announcement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnouncement>,
) -> AppResult<Json<DataResponse<Announcement>>> {
    let existing = find_announcement(&state, id).await?;
    if !policy::can_delete_announcement(&auth.actor, existing.author_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an elevated rank may edit this announcement".into(),
        )));
    }

    let title = input.title.as_deref().unwrap_or(&existing.title);
    let content = input.content.as_deref().unwrap_or(&existing.content);
    validate_announcement(title, content)?;

    let updated = AnnouncementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/announcements/{id}
///
/// Delete an announcement: the author, or the elevated pin set.
pub async fn delete_announcement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let existing = find_announcement(&state, id).await?;
    if !policy::can_delete_announcement(&auth.actor, existing.author_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an elevated rank may delete this announcement".into(),
        )));
    }

    AnnouncementRepo::delete(&state.pool, id).await?;

    tracing::info!(
        user_id = auth.user_id(),
        announcement_id = id,
        "Announcement deleted"
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({ "deleted": true }),
    }))
}

/// POST /api/v1/announcements/{id}/pin
pub async fn pin_announcement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Announcement>>> {
    set_pinned(&auth, &state, id, true).await
}

/// POST /api/v1/announcements/{id}/unpin
pub async fn unpin_announcement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Announcement>>> {
    set_pinned(&auth, &state, id, false).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_announcement(state: &AppState, id: DbId) -> Result<Announcement, AppError> {
    AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Announcement",
                id,
            })
        })
}

async fn set_pinned(
    auth: &AuthUser,
    state: &AppState,
    id: DbId,
    pinned: bool,
) -> AppResult<Json<DataResponse<Announcement>>> {
    if !policy::can_pin(&auth.actor) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Pinning requires an elevated rank".into(),
        )));
    }

    let updated = AnnouncementRepo::set_pinned(&state.pool, id, pinned)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))?;

    tracing::info!(
        user_id = auth.user_id(),
        announcement_id = id,
        pinned = pinned,
        "Announcement pin state changed"
    );

    Ok(Json(DataResponse { data: updated }))
}
