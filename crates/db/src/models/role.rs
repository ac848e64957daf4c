//! Role rows and DTOs.

use coachhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `roles` table. `permissions` holds permission slugs.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub permissions: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRole {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub slug: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRole {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub slug: Option<String>,
    pub permissions: Option<Vec<String>>,
}

impl UpdateRole {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none() && self.permissions.is_none()
    }
}
