//! Inbound cohort payloads.
//!
//! Clients send a few fields loosely typed: a scalar where a list is
//! expected, `0`/`1` for booleans, numbers for duration tags. The helpers
//! here accept those shapes so the planning code only sees normalised values.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::cohort::MentoringType;
use crate::corporate::UnlimitedPriceInput;
use crate::types::DbId;

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

/// A JSON scalar that should end up as a string tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Render as a tag. Whole floats lose their fractional part (`30.0` -> `"30"`).
    pub fn to_tag(&self) -> String {
        match self {
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
            Scalar::Float(f) => f.to_string(),
            Scalar::Text(s) => s.trim().to_string(),
        }
    }
}

/// Convert a list of scalars to string tags.
pub fn to_tags(values: &[Scalar]) -> Vec<String> {
    values.iter().map(Scalar::to_tag).collect()
}

/// Deserialize an optional flag sent either as a JSON boolean or as `0`/`1`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<RawFlag>::deserialize(deserializer)? {
        None => None,
        Some(RawFlag::Bool(b)) => Some(b),
        Some(RawFlag::Int(i)) => Some(i != 0),
    })
}

/// Body of `POST /cohort`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCohort {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub corporate_id: Option<DbId>,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub corporate_name: Option<String>,
    pub description: Option<String>,
    pub mentoring_type: MentoringType,
    pub group_size: Option<i32>,
    pub cohort_type: Option<OneOrMany<String>>,
    pub coach_search_type: Option<OneOrMany<String>>,
    #[validate(length(min = 1, message = "is required"))]
    pub start_date: String,
    #[validate(length(min = 1, message = "is required"))]
    pub end_date: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub allowed_mentees: i32,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub min_price: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub max_price: f64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub enable_duration: Option<bool>,
    pub session_duration: Option<OneOrMany<Scalar>>,
    #[validate(range(min = 1, max = 1000, message = "must be between 1 and 1000"))]
    pub no_of_interactions: i32,
    /// Number of feedback checkpoints to spread across the sessions when
    /// `metadata` is not supplied.
    pub feedback_frequency: Option<i32>,
    /// Explicit 1-based session numbers that require feedback.
    pub metadata: Option<Vec<Scalar>>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_ff_mandatory: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_unlimited: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub chemistry_session_status: Option<bool>,
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub no_of_chemistry_sessions: Option<i32>,
}

/// Body of `PATCH /cohort/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCohort {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub group_size: Option<i32>,
    pub cohort_type: Option<OneOrMany<String>>,
    pub coach_search_type: Option<OneOrMany<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub allowed_mentees: Option<i32>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub enable_duration: Option<bool>,
    pub session_duration: Option<OneOrMany<Scalar>>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_ff_mandatory: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_unlimited: Option<bool>,
    pub unlimited_prices: Option<Vec<UnlimitedPriceInput>>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub chemistry_session_status: Option<bool>,
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub no_of_chemistry_sessions: Option<i32>,
}

impl UpdateCohort {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.group_size.is_none()
            && self.cohort_type.is_none()
            && self.coach_search_type.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.allowed_mentees.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.enable_duration.is_none()
            && self.session_duration.is_none()
            && self.is_ff_mandatory.is_none()
            && self.is_unlimited.is_none()
            && self.unlimited_prices.is_none()
            && self.chemistry_session_status.is_none()
            && self.no_of_chemistry_sessions.is_none()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalar_and_list_both_deserialize() {
        let one: OneOrMany<String> = serde_json::from_value(json!("GROUP_COACHING")).unwrap();
        let many: OneOrMany<String> = serde_json::from_value(json!(["A", "B"])).unwrap();
        assert_eq!(one.into_vec(), vec!["GROUP_COACHING".to_string()]);
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn scalars_render_as_tags() {
        let values: Vec<Scalar> = serde_json::from_value(json!([30, "45 ", 60.0, 1.5])).unwrap();
        assert_eq!(to_tags(&values), vec!["30", "45", "60", "1.5"]);
    }

    #[test]
    fn flags_accept_numbers_and_booleans() {
        let patch: UpdateCohort =
            serde_json::from_value(json!({"isFfMandatory": 1, "isUnlimited": false})).unwrap();
        assert_eq!(patch.is_ff_mandatory, Some(true));
        assert_eq!(patch.is_unlimited, Some(false));
        assert_eq!(patch.enable_duration, None);
    }

    #[test]
    fn empty_patch_detection() {
        let patch: UpdateCohort = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
        let patch: UpdateCohort = serde_json::from_value(json!({"description": "x"})).unwrap();
        assert!(!patch.is_empty());
    }

    #[test]
    fn create_payload_uses_camel_case() {
        let body = json!({
            "mentoringType": "GROUP",
            "groupSize": 3,
            "startDate": "2024-01-01",
            "endDate": "2024-03-01",
            "allowedMentees": 10,
            "minPrice": 100.0,
            "maxPrice": 200.0,
            "noOfInteractions": 4,
            "chemistrySessionStatus": 0
        });
        let dto: CreateCohort = serde_json::from_value(body).unwrap();
        assert_eq!(dto.mentoring_type, MentoringType::Group);
        assert_eq!(dto.group_size, Some(3));
        assert_eq!(dto.chemistry_session_status, Some(false));
        assert!(dto.validate().is_ok());
    }
}
