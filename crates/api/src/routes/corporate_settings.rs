//! Route definitions for corporate cohort settings.

use axum::routing::get;
use axum::Router;

use crate::handlers::corporate_settings;
use crate::state::AppState;

/// Routes mounted at `/corporate-settings`.
///
/// ```text
/// GET    /        -> list_settings
/// POST   /        -> create_settings
/// GET    /{id}    -> get_settings
/// PATCH  /{id}    -> update_settings
/// DELETE /{id}    -> delete_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(corporate_settings::list_settings).post(corporate_settings::create_settings),
        )
        .route(
            "/{id}",
            get(corporate_settings::get_settings)
                .patch(corporate_settings::update_settings)
                .delete(corporate_settings::delete_settings),
        )
}
