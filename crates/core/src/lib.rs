//! Coachhub domain logic.
//!
//! Everything in this crate is pure: no database handles, no HTTP. The `db`
//! and `api` crates call into it for rule evaluation and derived values.

pub mod cohort;
pub mod corporate;
pub mod crypto;
pub mod error;
pub mod mentee_import;
pub mod notification;
pub mod rbac;
pub mod types;
pub mod validation;
