pub mod cohort;
pub mod corporate_settings;
pub mod health;
pub mod modules;
pub mod notifications;
pub mod permissions;
pub mod roles;
pub mod skills;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cohort                                   list, create
/// /cohort/{id}                              get, update, delete
/// /cohort/{id}/interactions                 list interactions
/// /cohort/{id}/feedback-frequencies         list feedback rows
/// /cohort/{id}/mentees                      list enrolled mentees
/// /cohort/upload/{cohort_id}                roster upload (multipart)
///
/// /corporate-settings                       list, create
/// /corporate-settings/{id}                  get, update, delete
///
/// /users                                    list, create
/// /users/bulk                               bulk register (POST)
/// /users/{id}                               get, update, delete
/// /users/{id}/permissions                   effective permissions (GET)
///
/// /roles                                    list, create
/// /roles/{id}                               get, update, delete
///
/// /permissions                              list, create
/// /permissions/{id}                         get, update, delete
///
/// /modules                                  list, create
/// /modules/{id}                             get, update, delete
///
/// /notifications                            list (?userId, unreadOnly), create
/// /notifications/{id}                       get, delete
/// /notifications/{id}/read                  mark read (POST)
///
/// /skills                                   list, create
/// /skills/{id}                              get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cohort", cohort::router())
        .nest("/corporate-settings", corporate_settings::router())
        .nest("/users", users::router())
        .nest("/roles", roles::router())
        .nest("/permissions", permissions::router())
        .nest("/modules", modules::router())
        .nest("/notifications", notifications::router())
        .nest("/skills", skills::router())
}
