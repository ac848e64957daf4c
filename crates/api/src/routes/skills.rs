//! Route definitions for the skill catalogue.

use axum::routing::get;
use axum::Router;

use crate::handlers::skills;
use crate::state::AppState;

/// Routes mounted at `/skills`.
///
/// ```text
/// GET    /        -> list_skills
/// POST   /        -> create_skill
/// GET    /{id}    -> get_skill
/// PATCH  /{id}    -> update_skill
/// DELETE /{id}    -> delete_skill
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(skills::list_skills).post(skills::create_skill))
        .route(
            "/{id}",
            get(skills::get_skill)
                .patch(skills::update_skill)
                .delete(skills::delete_skill),
        )
}
