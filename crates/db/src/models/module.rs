//! Permission-module rows and DTOs.

use coachhub_core::rbac::SubModule;
use coachhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: DbId,
    pub name: String,
    pub sub_modules: Json<Vec<SubModule>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateModule {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: String,
    #[serde(default)]
    pub sub_modules: Vec<SubModule>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModule {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: Option<String>,
    pub sub_modules: Option<Vec<SubModule>>,
}

impl UpdateModule {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.sub_modules.is_none()
    }
}
