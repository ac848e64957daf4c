//! Route definitions for cohorts and the mentee roster upload.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::cohort;
use crate::state::AppState;

/// Largest accepted roster workbook.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Routes mounted at `/cohort`.
///
/// ```text
/// GET    /                         -> list_cohorts
/// POST   /                         -> create_cohort
/// GET    /{id}                     -> get_cohort
/// PATCH  /{id}                     -> update_cohort
/// DELETE /{id}                     -> delete_cohort
/// GET    /{id}/interactions        -> list_interactions
/// GET    /{id}/feedback-frequencies -> list_feedback_frequencies
/// GET    /{id}/mentees             -> list_mentees
/// POST   /upload/{cohort_id}       -> upload_mentees
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cohort::list_cohorts).post(cohort::create_cohort))
        .route(
            "/{id}",
            get(cohort::get_cohort)
                .patch(cohort::update_cohort)
                .delete(cohort::delete_cohort),
        )
        .route("/{id}/interactions", get(cohort::list_interactions))
        .route(
            "/{id}/feedback-frequencies",
            get(cohort::list_feedback_frequencies),
        )
        .route("/{id}/mentees", get(cohort::list_mentees))
        .route(
            "/upload/{cohort_id}",
            post(cohort::upload_mentees).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}
