//! Route definitions.
//!
//! Each submodule exposes a `router()` for one resource area; they are
//! assembled under `/api/v1` here.

pub mod admin;
pub mod announcements;
pub mod auth;
pub mod cases;
pub mod features;
pub mod health;
pub mod officers;
pub mod sanctions;
pub mod warrants;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
///
/// /features                          visible feature keys
/// /policy/check                      evaluate a policy action
///
/// /cases                             create, list
/// /cases/{id}                        get, delete
/// /cases/{id}/transition             lifecycle transition (POST)
///
/// /warrants                          create, list
/// /warrants/{id}                     get
/// /warrants/{id}/review              approve/reject (POST)
///
/// /officers                          create, list (?division=)
/// /officers/{id}                     get, update, delete
/// /officers/{id}/sanctions           sanction history
///
/// /sanctions                         create
/// /sanctions/{id}                    get, update, delete
///
/// /announcements                     create, list
/// /announcements/{id}                get, update, delete
/// /announcements/{id}/pin            pin (POST)
/// /announcements/{id}/unpin          unpin (POST)
///
/// /admin/users                       list, create (admin only)
/// /admin/users/{id}                  get
/// /admin/users/{id}/access           update role/divisions (PUT)
/// /admin/users/{id}/deactivate       deactivate (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(features::router())
        .nest("/cases", cases::router())
        .nest("/warrants", warrants::router())
        .nest("/officers", officers::router())
        .nest("/sanctions", sanctions::router())
        .nest("/announcements", announcements::router())
        .nest("/admin", admin::router())
}
