//! Route definitions for feature navigation and policy checks.
//!
//! ```text
//! GET    /features        visible feature keys
//! GET    /policy/check    evaluate a policy action
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::features;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/features", get(features::visible_features))
        .route("/policy/check", get(features::check_policy))
}
