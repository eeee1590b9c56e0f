//! Route definitions for announcements.
//!
//! ```text
//! POST   /               create_announcement
//! GET    /               list_announcements
//! GET    /{id}           get_announcement
//! PUT    /{id}           update_announcement
//! DELETE /{id}           delete_announcement
//! POST   /{id}/pin       pin_announcement
//! POST   /{id}/unpin     unpin_announcement
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::announcements;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(announcements::create_announcement).get(announcements::list_announcements),
        )
        .route(
            "/{id}",
            get(announcements::get_announcement)
                .put(announcements::update_announcement)
                .delete(announcements::delete_announcement),
        )
        .route("/{id}/pin", post(announcements::pin_announcement))
        .route("/{id}/unpin", post(announcements::unpin_announcement))
}
