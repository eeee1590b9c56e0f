//! Route definitions for the per-division officer registries.
//!
//! ```text
//! POST   /                    create_officer
//! GET    /                    list_officers (?division=)
//! GET    /{id}                get_officer
//! PUT    /{id}                update_officer
//! DELETE /{id}                delete_officer
//! GET    /{id}/sanctions      list_officer_sanctions
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::officers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(officers::create_officer).get(officers::list_officers),
        )
        .route(
            "/{id}",
            get(officers::get_officer)
                .put(officers::update_officer)
                .delete(officers::delete_officer),
        )
        .route("/{id}/sanctions", get(officers::list_officer_sanctions))
}
