//! Request handlers, one submodule per resource.
//!
//! Plain CRUD handlers call repositories in `coachhub_db` directly;
//! transactional workflows go through [`crate::services`]. Errors map to
//! HTTP responses via [`crate::error::AppError`].

pub mod cohort;
pub mod corporate_settings;
pub mod modules;
pub mod notifications;
pub mod permissions;
pub mod roles;
pub mod skills;
pub mod users;
