//! Corporate cohort-policy rows and DTOs.

use coachhub_core::corporate::UnlimitedPriceInput;
use coachhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `corporate_cohort_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateSettings {
    pub id: DbId,
    pub corporate_id: DbId,
    pub max_cohorts: Option<i32>,
    pub max_mentees_per_cohort: Option<i32>,
    pub min_price: f64,
    pub max_price: f64,
    pub is_unlimited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `corporate_unlimited_prices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlimitedPrice {
    pub id: DbId,
    pub corporate_id: DbId,
    pub month: i32,
    pub price: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Settings with their price tiers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateSettingsDetail {
    #[serde(flatten)]
    pub settings: CorporateSettings,
    pub unlimited_prices: Vec<UnlimitedPrice>,
}

/// DTO for creating corporate settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCorporateSettings {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub corporate_id: DbId,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub max_cohorts: Option<i32>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub max_mentees_per_cohort: Option<i32>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub min_price: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub max_price: f64,
    #[serde(default)]
    pub is_unlimited: bool,
    #[validate(nested)]
    pub unlimited_prices: Option<Vec<UnlimitedPriceInput>>,
}

/// DTO for patching corporate settings. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCorporateSettings {
    #[validate(range(min = 0, message = "must not be negative"))]
    pub max_cohorts: Option<i32>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub max_mentees_per_cohort: Option<i32>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub max_price: Option<f64>,
    pub is_unlimited: Option<bool>,
    #[validate(nested)]
    pub unlimited_prices: Option<Vec<UnlimitedPriceInput>>,
}

impl UpdateCorporateSettings {
    pub fn is_empty(&self) -> bool {
        self.max_cohorts.is_none()
            && self.max_mentees_per_cohort.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.is_unlimited.is_none()
            && self.unlimited_prices.is_none()
    }
}
