//! Route definitions for case files.
//!
//! ```text
//! POST   /                    create_case
//! GET    /                    list_cases
//! GET    /{id}                get_case
//! DELETE /{id}                delete_case
//! POST   /{id}/transition     transition_case
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::cases;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(cases::create_case).get(cases::list_cases))
        .route("/{id}", get(cases::get_case).delete(cases::delete_case))
        .route("/{id}/transition", post(cases::transition_case))
}
