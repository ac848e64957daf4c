//! Route definitions for users and bulk registration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                  -> list_users
/// POST   /                  -> create_user
/// POST   /bulk              -> bulk_register
/// GET    /{id}              -> get_user
/// PATCH  /{id}              -> update_user
/// DELETE /{id}              -> delete_user
/// GET    /{id}/permissions  -> get_user_permissions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/bulk", post(users::bulk_register))
        .route(
            "/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{id}/permissions", get(users::get_user_permissions))
}
