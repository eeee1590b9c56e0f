//! Route definitions for authentication.
//!
//! ```text
//! POST   /login       login
//! POST   /refresh     refresh
//! POST   /logout      logout
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
}
