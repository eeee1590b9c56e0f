//! Route definitions for administrator-only user management.
//!
//! ```text
//! POST   /users                   create_user
//! GET    /users                   list_users
//! GET    /users/{id}              get_user
//! PUT    /users/{id}/access       update_access
//! POST   /users/{id}/deactivate   deactivate_user
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(admin::create_user).get(admin::list_users))
        .route("/users/{id}", get(admin::get_user))
        .route("/users/{id}/access", put(admin::update_access))
        .route("/users/{id}/deactivate", post(admin::deactivate_user))
}
