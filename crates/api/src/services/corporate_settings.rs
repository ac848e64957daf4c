//! Corporate cohort-policy workflows.
//!
//! Settings and their unlimited price tiers are always written together in
//! one transaction.

use coachhub_core::corporate::{validate_price_range, validate_unlimited_prices};
use coachhub_core::error::CoreError;
use coachhub_core::types::DbId;
use coachhub_core::validation::{ensure_non_empty_patch, validate_dto};
use coachhub_db::models::corporate_settings::{
    CorporateSettings, CorporateSettingsDetail, CreateCorporateSettings, UpdateCorporateSettings,
};
use coachhub_db::repositories::{CorporateSettingsRepo, UnlimitedPriceRepo};
use coachhub_db::DbPool;

use crate::error::{AppError, AppResult};

pub async fn create(
    pool: &DbPool,
    input: &CreateCorporateSettings,
) -> AppResult<CorporateSettingsDetail> {
    validate_dto(input)?;
    validate_price_range(input.min_price, input.max_price)?;
    validate_unlimited_prices(input.is_unlimited, input.unlimited_prices.as_deref())?;

    let mut tx = pool.begin().await?;

    if CorporateSettingsRepo::corporate_exists(&mut tx, input.corporate_id).await? {
        return Err(CoreError::Conflict(format!(
            "Settings for corporate {} already exist",
            input.corporate_id
        ))
        .into());
    }

    let settings = CorporateSettingsRepo::create(&mut tx, input).await?;
    if let Some(ref prices) = input.unlimited_prices {
        UnlimitedPriceRepo::create_many(&mut tx, settings.corporate_id, prices).await?;
    }

    tx.commit().await?;
    tracing::info!(
        settings_id = settings.id,
        corporate_id = settings.corporate_id,
        is_unlimited = settings.is_unlimited,
        "Corporate settings created"
    );

    with_prices(pool, settings).await
}

/// Patch settings, re-checking the merged price range and unlimited plan.
///
/// Switching the plan off drops the stored tiers. Switching it on requires
/// new tiers in the same request; an already unlimited plan keeps its
/// tiers unless the patch replaces them.
pub async fn update(
    pool: &DbPool,
    id: DbId,
    patch: &UpdateCorporateSettings,
) -> AppResult<CorporateSettingsDetail> {
    ensure_non_empty_patch(patch.is_empty())?;
    validate_dto(patch)?;

    let mut tx = pool.begin().await?;

    let current = CorporateSettingsRepo::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Corporate settings", id))?;

    validate_price_range(
        patch.min_price.unwrap_or(current.min_price),
        patch.max_price.unwrap_or(current.max_price),
    )?;

    let is_unlimited = patch.is_unlimited.unwrap_or(current.is_unlimited);
    match (is_unlimited, patch.unlimited_prices.as_deref()) {
        (true, None) if current.is_unlimited => {}
        (_, prices) => validate_unlimited_prices(is_unlimited, prices)?,
    }

    CorporateSettingsRepo::update(&mut tx, id, patch).await?;

    if !is_unlimited {
        UnlimitedPriceRepo::delete_by_corporate(&mut tx, current.corporate_id).await?;
    } else if let Some(ref prices) = patch.unlimited_prices {
        UnlimitedPriceRepo::replace(&mut tx, current.corporate_id, prices).await?;
    }

    tx.commit().await?;
    tracing::info!(settings_id = id, is_unlimited, "Corporate settings updated");

    let settings = find(pool, id).await?;
    with_prices(pool, settings).await
}

pub async fn remove(pool: &DbPool, id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    let current = CorporateSettingsRepo::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found("Corporate settings", id))?;

    UnlimitedPriceRepo::delete_by_corporate(&mut tx, current.corporate_id).await?;
    CorporateSettingsRepo::delete(&mut tx, id).await?;

    tx.commit().await?;
    tracing::info!(settings_id = id, corporate_id = current.corporate_id, "Corporate settings deleted");
    Ok(())
}

pub async fn find(pool: &DbPool, id: DbId) -> AppResult<CorporateSettings> {
    CorporateSettingsRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Corporate settings", id))
}

pub async fn with_prices(
    pool: &DbPool,
    settings: CorporateSettings,
) -> AppResult<CorporateSettingsDetail> {
    let unlimited_prices = UnlimitedPriceRepo::list_by_corporate(pool, settings.corporate_id).await?;
    Ok(CorporateSettingsDetail {
        settings,
        unlimited_prices,
    })
}
