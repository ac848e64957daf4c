//! Route definitions for permissions.

use axum::routing::get;
use axum::Router;

use crate::handlers::permissions;
use crate::state::AppState;

/// Routes mounted at `/permissions`.
///
/// ```text
/// GET    /        -> list_permissions
/// POST   /        -> create_permission
/// GET    /{id}    -> get_permission
/// PATCH  /{id}    -> update_permission
/// DELETE /{id}    -> delete_permission
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(permissions::list_permissions).post(permissions::create_permission))
        .route(
            "/{id}",
            get(permissions::get_permission)
                .patch(permissions::update_permission)
                .delete(permissions::delete_permission),
        )
}
