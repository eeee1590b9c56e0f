//! Route definitions for disciplinary sanctions.
//!
//! ```text
//! POST   /           create_sanction
//! GET    /{id}       get_sanction
//! PUT    /{id}       update_sanction
//! DELETE /{id}       delete_sanction
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sanctions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(sanctions::create_sanction))
        .route(
            "/{id}",
            get(sanctions::get_sanction)
                .put(sanctions::update_sanction)
                .delete(sanctions::delete_sanction),
        )
}
