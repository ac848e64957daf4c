//! Route definitions for notifications.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /            -> list_notifications
/// POST   /            -> create_notification
/// GET    /{id}        -> get_notification
/// DELETE /{id}        -> delete_notification
/// POST   /{id}/read   -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route(
            "/{id}",
            get(notifications::get_notification).delete(notifications::delete_notification),
        )
        .route("/{id}/read", post(notifications::mark_read))
}
