//! Cross-field business rules for cohorts.

use crate::cohort::{MentoringType, SEARCH_ALGORITHMIC_MATCHES, SEARCH_OFFLINE_MATCHES};
use crate::error::CoreError;
use crate::types::Timestamp;

/// Coach-search options a cohort may list.
pub const VALID_COACH_SEARCH_TYPES: &[&str] = &[
    SEARCH_ALGORITHMIC_MATCHES,
    SEARCH_OFFLINE_MATCHES,
    "SELF_SELECTION",
];

/// Pick the explicit name, or build one from the corporate name.
///
/// Generated names look like `Acme-15032024-20`: corporate name, creation
/// date (`DDMMYYYY`), allowed mentee count.
pub fn resolve_cohort_name(
    name: Option<&str>,
    corporate_name: Option<&str>,
    allowed_mentees: i32,
    now: Timestamp,
) -> Result<String, CoreError> {
    if let Some(explicit) = name.map(str::trim).filter(|n| !n.is_empty()) {
        return Ok(explicit.to_string());
    }

    let corporate = corporate_name
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            CoreError::InvalidInput(
                "corporateName is required when name is not provided".to_string(),
            )
        })?;

    Ok(format!(
        "{corporate}-{}-{allowed_mentees}",
        now.format("%d%m%Y")
    ))
}

/// Enforce the group-size rules for a mentoring type.
pub fn validate_group_size(
    mentoring_type: MentoringType,
    group_size: Option<i32>,
    allowed_mentees: i32,
) -> Result<(), CoreError> {
    match (mentoring_type, group_size) {
        (MentoringType::OneToOne, Some(_)) => Err(CoreError::InvalidInput(
            "groupSize must not be provided for ONE_TO_ONE mentoring".to_string(),
        )),
        (MentoringType::OneToOne, None) => Ok(()),
        (MentoringType::Group, None) => Err(CoreError::InvalidInput(
            "groupSize is required for GROUP mentoring".to_string(),
        )),
        (MentoringType::Group, Some(size)) if size < 2 => Err(CoreError::InvalidInput(
            "groupSize must be at least 2".to_string(),
        )),
        (MentoringType::Group, Some(size)) if size > allowed_mentees => {
            Err(CoreError::InvalidInput(format!(
                "groupSize ({size}) must not exceed allowedMentees ({allowed_mentees})"
            )))
        }
        (MentoringType::Group, Some(_)) => Ok(()),
    }
}

/// Normalise coach-search options. Group cohorts are always matched offline.
pub fn resolve_coach_search_types(
    mentoring_type: MentoringType,
    requested: Vec<String>,
) -> Result<Vec<String>, CoreError> {
    if mentoring_type == MentoringType::Group {
        return Ok(vec![SEARCH_OFFLINE_MATCHES.to_string()]);
    }

    let mut resolved: Vec<String> = Vec::with_capacity(requested.len());
    for option in requested {
        let option = option.trim().to_string();
        if !VALID_COACH_SEARCH_TYPES.contains(&option.as_str()) {
            return Err(CoreError::InvalidInput(format!(
                "coachSearchType '{option}' is not one of {}",
                VALID_COACH_SEARCH_TYPES.join(", ")
            )));
        }
        if !resolved.contains(&option) {
            resolved.push(option);
        }
    }
    Ok(resolved)
}

/// Sessions need at least one duration tag whenever durations are enabled.
pub fn validate_session_duration(
    enable_duration: bool,
    session_duration: &[String],
) -> Result<(), CoreError> {
    if enable_duration && session_duration.is_empty() {
        return Err(CoreError::InvalidInput(
            "sessionDuration is required when enableDuration is set".to_string(),
        ));
    }
    if session_duration.iter().any(|tag| tag.is_empty()) {
        return Err(CoreError::InvalidInput(
            "sessionDuration entries must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Chemistry sessions are a one-to-one feature and need a positive count.
pub fn validate_chemistry_sessions(
    mentoring_type: MentoringType,
    enabled: bool,
    count: i32,
) -> Result<(), CoreError> {
    if !enabled {
        return Ok(());
    }
    if mentoring_type != MentoringType::OneToOne {
        return Err(CoreError::InvalidInput(
            "chemistry sessions are only available for ONE_TO_ONE mentoring".to_string(),
        ));
    }
    if count < 1 {
        return Err(CoreError::InvalidInput(
            "noOfChemistrySessions must be at least 1 when chemistry sessions are enabled"
                .to_string(),
        ));
    }
    Ok(())
}

/// Whether chemistry-session interactions should be generated.
pub fn should_generate_chemistry_sessions(
    mentoring_type: MentoringType,
    coach_search_types: &[String],
    enabled: bool,
    count: i32,
) -> bool {
    mentoring_type == MentoringType::OneToOne
        && coach_search_types
            .iter()
            .any(|s| s == SEARCH_ALGORITHMIC_MATCHES)
        && enabled
        && count > 0
}
