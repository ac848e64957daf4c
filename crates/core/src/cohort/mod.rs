//! Cohort planning.
//!
//! [`plan_cohort`] turns a validated creation request into everything the
//! persistence layer has to write: the cohort row values, one interaction
//! per session window, optional chemistry sessions, and the feedback
//! checkpoint row. [`plan_update`] does the same for a partial patch against
//! an existing cohort. Neither touches the database; name uniqueness is
//! checked by the caller inside the write transaction.

pub mod feedback;
pub mod request;
pub mod rules;
pub mod schedule;

use serde::{Deserialize, Serialize};

use crate::corporate::{validate_price_range, validate_unlimited_prices, UnlimitedPriceInput};
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

pub use request::{CreateCohort, OneOrMany, Scalar, UpdateCohort};

/// Coach-search option that enables algorithmic matching (and chemistry sessions).
pub const SEARCH_ALGORITHMIC_MATCHES: &str = "ALGORITHMIC_MATCHES";

/// Coach-search option forced onto every group cohort.
pub const SEARCH_OFFLINE_MATCHES: &str = "OFFLINE_MATCHES";

/// Interaction status codes stored in `interactions.status`.
pub mod interaction_status {
    pub const PENDING: i16 = 0;
    pub const CONFIRMED: i16 = 1;
    pub const COMPLETED: i16 = 2;
    pub const CANCELLED: i16 = 3;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MentoringType {
    OneToOne,
    Group,
}

impl MentoringType {
    pub fn as_str(self) -> &'static str {
        match self {
            MentoringType::OneToOne => "ONE_TO_ONE",
            MentoringType::Group => "GROUP",
        }
    }

    /// Parse the value stored in `cohorts.mentoring_type`.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "ONE_TO_ONE" => Ok(MentoringType::OneToOne),
            "GROUP" => Ok(MentoringType::Group),
            other => Err(CoreError::Internal(format!(
                "Unknown mentoring type '{other}'"
            ))),
        }
    }
}

/// An interaction row to insert alongside a new cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedInteraction {
    pub title: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: i16,
}

/// The feedback-frequency row to insert alongside a new cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedFeedback {
    pub frequency: i32,
    pub metadata: Vec<String>,
}

/// Fully derived values for a new cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortPlan {
    pub name: String,
    pub corporate_id: Option<DbId>,
    pub description: Option<String>,
    pub mentoring_type: MentoringType,
    pub group_size: Option<i32>,
    pub cohort_type: Vec<String>,
    pub coach_search_type: Vec<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub duration_in_days: i64,
    pub min_price: f64,
    pub max_price: f64,
    pub allowed_mentees: i32,
    pub no_of_interactions: i32,
    pub enable_duration: bool,
    pub session_duration: Vec<String>,
    pub is_ff_mandatory: bool,
    pub is_unlimited: bool,
    pub chemistry_session_status: bool,
    pub no_of_chemistry_sessions: i32,
    pub interactions: Vec<PlannedInteraction>,
    pub feedback: Option<PlannedFeedback>,
}

/// Apply every creation rule and derive the rows to write.
///
/// `name` is the already-resolved (and uniqueness-checked) cohort name.
pub fn plan_cohort(request: &CreateCohort, name: String) -> Result<CohortPlan, CoreError> {
    let mentoring_type = request.mentoring_type;
    let n = request.no_of_interactions;
    if n < 1 {
        return Err(CoreError::InvalidInput(
            "noOfInteractions must be at least 1".to_string(),
        ));
    }

    rules::validate_group_size(mentoring_type, request.group_size, request.allowed_mentees)?;
    let coach_search_type = rules::resolve_coach_search_types(
        mentoring_type,
        request
            .coach_search_type
            .clone()
            .map(OneOrMany::into_vec)
            .unwrap_or_default(),
    )?;

    let start_date = schedule::parse_iso_date("startDate", &request.start_date)?;
    let end_date = schedule::parse_iso_date("endDate", &request.end_date)?;
    schedule::ensure_end_after_start(start_date, end_date)?;
    validate_price_range(request.min_price, request.max_price)?;

    let enable_duration = request.enable_duration.unwrap_or(false);
    let session_duration = request
        .session_duration
        .clone()
        .map(|d| request::to_tags(&d.into_vec()))
        .unwrap_or_default();
    rules::validate_session_duration(enable_duration, &session_duration)?;

    let chemistry_session_status = request.chemistry_session_status.unwrap_or(false);
    let no_of_chemistry_sessions = request.no_of_chemistry_sessions.unwrap_or(0);
    rules::validate_chemistry_sessions(
        mentoring_type,
        chemistry_session_status,
        no_of_chemistry_sessions,
    )?;

    let is_ff_mandatory = request.is_ff_mandatory.unwrap_or(false);
    let mut metadata = match (&request.metadata, request.feedback_frequency) {
        (Some(explicit), _) => Some(request::to_tags(explicit)),
        (None, Some(frequency)) => Some(feedback::distribute_feedback_sessions(frequency, n)?),
        (None, None) => None,
    };
    if is_ff_mandatory {
        feedback::ensure_last_interaction(metadata.get_or_insert_with(Vec::new), n);
    }
    if let Some(ref m) = metadata {
        feedback::validate_feedback_metadata(m, n)?;
    }

    let mut interactions: Vec<PlannedInteraction> =
        schedule::session_windows(start_date, end_date, n as u32)
            .into_iter()
            .enumerate()
            .map(|(i, window)| PlannedInteraction {
                title: format!("Interaction {}", i + 1),
                start_date: window.start,
                end_date: window.end,
                status: interaction_status::CONFIRMED,
            })
            .collect();

    if rules::should_generate_chemistry_sessions(
        mentoring_type,
        &coach_search_type,
        chemistry_session_status,
        no_of_chemistry_sessions,
    ) {
        interactions.extend((0..no_of_chemistry_sessions).map(|i| PlannedInteraction {
            title: format!("chemistry_session_{}", i + 1),
            start_date,
            end_date,
            status: interaction_status::CONFIRMED,
        }));
    }

    Ok(CohortPlan {
        name,
        corporate_id: request.corporate_id,
        description: request.description.clone(),
        mentoring_type,
        group_size: request.group_size,
        cohort_type: request
            .cohort_type
            .clone()
            .map(OneOrMany::into_vec)
            .unwrap_or_default(),
        coach_search_type,
        start_date,
        end_date,
        duration_in_days: schedule::duration_in_days(start_date, end_date),
        min_price: request.min_price,
        max_price: request.max_price,
        allowed_mentees: request.allowed_mentees,
        no_of_interactions: n,
        enable_duration,
        session_duration,
        is_ff_mandatory,
        is_unlimited: request.is_unlimited.unwrap_or(false),
        chemistry_session_status,
        no_of_chemistry_sessions,
        interactions,
        feedback: metadata.map(|m| PlannedFeedback {
            frequency: m.len() as i32,
            metadata: m,
        }),
    })
}

/// The persisted cohort values that a patch is validated against.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortState {
    pub corporate_id: Option<DbId>,
    pub mentoring_type: MentoringType,
    pub group_size: Option<i32>,
    pub coach_search_type: Vec<String>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub allowed_mentees: i32,
    pub min_price: f64,
    pub max_price: f64,
    pub enable_duration: bool,
    pub session_duration: Vec<String>,
    pub no_of_interactions: i32,
    pub is_ff_mandatory: bool,
    pub is_unlimited: bool,
    pub chemistry_session_status: bool,
    pub no_of_chemistry_sessions: i32,
}

/// How the "last interaction" feedback checkpoint changes with `isFfMandatory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackToggle {
    AddLast(i32),
    RemoveLast(i32),
}

/// What happens to a corporate's unlimited-price rows.
#[derive(Debug, Clone, PartialEq)]
pub enum UnlimitedPriceChange {
    Clear {
        corporate_id: DbId,
    },
    Replace {
        corporate_id: DbId,
        prices: Vec<UnlimitedPriceInput>,
    },
}

/// Column values and side effects derived from a cohort patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortUpdatePlan {
    pub name: Option<String>,
    pub description: Option<String>,
    pub group_size: Option<i32>,
    pub cohort_type: Option<Vec<String>>,
    pub coach_search_type: Option<Vec<String>>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub duration_in_days: Option<i64>,
    pub allowed_mentees: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub enable_duration: Option<bool>,
    pub session_duration: Option<Vec<String>>,
    pub is_ff_mandatory: Option<bool>,
    pub is_unlimited: Option<bool>,
    pub chemistry_session_status: Option<bool>,
    pub no_of_chemistry_sessions: Option<i32>,
    pub feedback_toggle: Option<FeedbackToggle>,
    pub unlimited_prices: Option<UnlimitedPriceChange>,
}

/// Merge `patch` over `current`, re-validate, and derive the update.
pub fn plan_update(current: &CohortState, patch: &UpdateCohort) -> Result<CohortUpdatePlan, CoreError> {
    let mut plan = CohortUpdatePlan::default();

    if let Some(ref name) = patch.name {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("name must not be blank".to_string()));
        }
        plan.name = Some(trimmed.to_string());
    }
    plan.description = patch.description.clone();

    // Group sizing.
    let allowed_mentees = patch.allowed_mentees.unwrap_or(current.allowed_mentees);
    if patch.group_size.is_some() || patch.allowed_mentees.is_some() {
        rules::validate_group_size(
            current.mentoring_type,
            patch.group_size.or(current.group_size),
            allowed_mentees,
        )?;
    }
    plan.group_size = patch.group_size;
    plan.allowed_mentees = patch.allowed_mentees;

    plan.cohort_type = patch.cohort_type.clone().map(OneOrMany::into_vec);
    plan.coach_search_type = patch
        .coach_search_type
        .clone()
        .map(|s| rules::resolve_coach_search_types(current.mentoring_type, s.into_vec()))
        .transpose()?;

    // Dates.
    if patch.start_date.is_some() || patch.end_date.is_some() {
        let start = match patch.start_date {
            Some(ref s) => schedule::parse_iso_date("startDate", s)?,
            None => current.start_date,
        };
        let end = match patch.end_date {
            Some(ref e) => schedule::parse_iso_date("endDate", e)?,
            None => current.end_date,
        };
        schedule::ensure_end_after_start(start, end)?;
        plan.start_date = patch.start_date.as_ref().map(|_| start);
        plan.end_date = patch.end_date.as_ref().map(|_| end);
        plan.duration_in_days = Some(schedule::duration_in_days(start, end));
    }

    // Prices.
    if patch.min_price.is_some() || patch.max_price.is_some() {
        validate_price_range(
            patch.min_price.unwrap_or(current.min_price),
            patch.max_price.unwrap_or(current.max_price),
        )?;
    }
    plan.min_price = patch.min_price;
    plan.max_price = patch.max_price;

    // Session durations: disabling wipes the list.
    plan.enable_duration = patch.enable_duration;
    plan.session_duration = if patch.enable_duration == Some(false) {
        Some(Vec::new())
    } else {
        patch
            .session_duration
            .clone()
            .map(|d| request::to_tags(&d.into_vec()))
    };
    rules::validate_session_duration(
        patch.enable_duration.unwrap_or(current.enable_duration),
        plan.session_duration
            .as_deref()
            .unwrap_or(&current.session_duration),
    )?;

    // Chemistry sessions.
    plan.chemistry_session_status = patch.chemistry_session_status;
    plan.no_of_chemistry_sessions = patch.no_of_chemistry_sessions;
    rules::validate_chemistry_sessions(
        current.mentoring_type,
        patch
            .chemistry_session_status
            .unwrap_or(current.chemistry_session_status),
        patch
            .no_of_chemistry_sessions
            .unwrap_or(current.no_of_chemistry_sessions),
    )?;

    // Feedback "last interaction" checkpoint follows isFfMandatory.
    plan.is_ff_mandatory = patch.is_ff_mandatory;
    plan.feedback_toggle = match patch.is_ff_mandatory {
        Some(true) if !current.is_ff_mandatory => {
            Some(FeedbackToggle::AddLast(current.no_of_interactions))
        }
        Some(false) if current.is_ff_mandatory => {
            Some(FeedbackToggle::RemoveLast(current.no_of_interactions))
        }
        _ => None,
    };

    // Unlimited pricing.
    plan.is_unlimited = patch.is_unlimited;
    plan.unlimited_prices = match (patch.is_unlimited, &patch.unlimited_prices) {
        (Some(false), Some(prices)) if !prices.is_empty() => {
            return Err(CoreError::InvalidInput(
                "unlimitedPrices are only allowed when isUnlimited is set".to_string(),
            ));
        }
        (Some(false), _) if current.is_unlimited => current
            .corporate_id
            .map(|corporate_id| UnlimitedPriceChange::Clear { corporate_id }),
        // Already limited: the corporate's tiers are not this cohort's to drop.
        (Some(false), _) => None,
        (flag, Some(prices)) => {
            validate_unlimited_prices(flag.unwrap_or(current.is_unlimited), Some(prices))?;
            let corporate_id = current.corporate_id.ok_or_else(|| {
                CoreError::InvalidInput(
                    "unlimitedPrices require the cohort to belong to a corporate".to_string(),
                )
            })?;
            Some(UnlimitedPriceChange::Replace {
                corporate_id,
                prices: prices.clone(),
            })
        }
        (_, None) => None,
    };

    Ok(plan)
}
