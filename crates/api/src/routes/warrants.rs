//! Route definitions for warrant requests.
//!
//! ```text
//! POST   /                    create_warrant
//! GET    /                    list_warrants
//! GET    /{id}                get_warrant
//! POST   /{id}/review         review_warrant
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::warrants;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(warrants::create_warrant).get(warrants::list_warrants),
        )
        .route("/{id}", get(warrants::get_warrant))
        .route("/{id}/review", post(warrants::review_warrant))
}
