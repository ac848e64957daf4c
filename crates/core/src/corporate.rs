//! Corporate cohort-policy rules.
//!
//! A corporate customer either buys cohorts at a fixed price range or is on
//! an "unlimited" plan priced per month. These checks keep the unlimited
//! flag and its price tiers consistent.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// One month/price tier of an unlimited plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnlimitedPriceInput {
    #[validate(range(min = 1, max = 120, message = "must be between 1 and 120"))]
    pub month: i32,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
}

/// Require `min <= max`.
pub fn validate_price_range(min_price: f64, max_price: f64) -> Result<(), CoreError> {
    if min_price > max_price {
        return Err(CoreError::InvalidInput(
            "minPrice must not exceed maxPrice".to_string(),
        ));
    }
    Ok(())
}

/// Check that the unlimited flag and the supplied price tiers agree.
///
/// An unlimited plan needs at least one tier; a non-unlimited plan must not
/// carry any. Months must be unique.
pub fn validate_unlimited_prices(
    is_unlimited: bool,
    prices: Option<&[UnlimitedPriceInput]>,
) -> Result<(), CoreError> {
    match (is_unlimited, prices) {
        (true, None) => Err(CoreError::InvalidInput(
            "unlimitedPrices are required when isUnlimited is set".to_string(),
        )),
        (true, Some([])) => Err(CoreError::InvalidInput(
            "unlimitedPrices must not be empty when isUnlimited is set".to_string(),
        )),
        (false, Some(list)) if !list.is_empty() => Err(CoreError::InvalidInput(
            "unlimitedPrices are only allowed when isUnlimited is set".to_string(),
        )),
        (_, Some(list)) => validate_price_tiers(list),
        (false, None) => Ok(()),
    }
}

fn validate_price_tiers(prices: &[UnlimitedPriceInput]) -> Result<(), CoreError> {
    let mut months = std::collections::HashSet::new();
    for tier in prices {
        crate::validation::validate_dto(tier)?;
        if !months.insert(tier.month) {
            return Err(CoreError::InvalidInput(format!(
                "unlimitedPrices month {} is duplicated",
                tier.month
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn tier(month: i32, price: f64) -> UnlimitedPriceInput {
        UnlimitedPriceInput { month, price }
    }

    #[test]
    fn price_range_ordering() {
        assert!(validate_price_range(10.0, 10.0).is_ok());
        assert!(validate_price_range(10.0, 20.0).is_ok());
        assert_matches!(validate_price_range(30.0, 20.0), Err(CoreError::InvalidInput(_)));
    }

    #[test]
    fn unlimited_requires_prices() {
        assert!(validate_unlimited_prices(true, None).is_err());
        assert!(validate_unlimited_prices(true, Some(&[])).is_err());
        assert!(validate_unlimited_prices(true, Some(&[tier(1, 99.0)])).is_ok());
    }

    #[test]
    fn limited_forbids_prices() {
        assert!(validate_unlimited_prices(false, None).is_ok());
        assert!(validate_unlimited_prices(false, Some(&[])).is_ok());
        assert!(validate_unlimited_prices(false, Some(&[tier(1, 99.0)])).is_err());
    }

    #[test]
    fn tiers_are_validated() {
        assert!(validate_unlimited_prices(true, Some(&[tier(0, 10.0)])).is_err());
        assert!(validate_unlimited_prices(true, Some(&[tier(1, -1.0)])).is_err());
        let dup = [tier(3, 10.0), tier(3, 12.0)];
        assert_matches!(
            validate_unlimited_prices(true, Some(&dup)),
            Err(CoreError::InvalidInput(msg)) if msg.contains("duplicated")
        );
    }
}
