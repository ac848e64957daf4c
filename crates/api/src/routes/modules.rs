//! Route definitions for permission modules.
//!
//! A module groups sub-modules, each listing the permission slugs it covers.

use axum::routing::get;
use axum::Router;

use crate::handlers::modules;
use crate::state::AppState;

/// Routes mounted at `/modules`.
///
/// ```text
/// GET    /        -> list_modules
/// POST   /        -> create_module
/// GET    /{id}    -> get_module
/// PATCH  /{id}    -> update_module
/// DELETE /{id}    -> delete_module
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(modules::list_modules).post(modules::create_module))
        .route(
            "/{id}",
            get(modules::get_module)
                .patch(modules::update_module)
                .delete(modules::delete_module),
        )
}
