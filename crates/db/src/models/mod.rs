//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches
//!
//! The cohort tables are written from [`coachhub_core::cohort::CohortPlan`]
//! instead of a create DTO.

pub mod cohort;
pub mod corporate_settings;
pub mod enrollment;
pub mod module;
pub mod notification;
pub mod permission;
pub mod role;
pub mod skill;
pub mod user;
