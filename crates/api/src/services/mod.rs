//! Multi-step workflows that span several repositories.
//!
//! Handlers for plain CRUD talk to repositories directly; anything that has
//! to run in one transaction, or combines the database with an outbound
//! call, lives here.

pub mod cohort;
pub mod corporate_settings;
pub mod mentee_upload;
pub mod notifications;
pub mod users;
