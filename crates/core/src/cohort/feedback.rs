//! Feedback checkpoint selection.
//!
//! Feedback metadata is a list of 1-based interaction numbers, stored as
//! strings, that tell the platform which sessions ask participants for
//! feedback.

use std::collections::HashSet;

use crate::error::CoreError;

/// Spread `frequency` feedback checkpoints evenly across `total` sessions.
///
/// When every session needs feedback the result is `1..=total`. Otherwise
/// checkpoint `k` lands on session `floor(k * total / frequency) + 1`, which
/// keeps the spread even when `frequency` does not divide `total`.
pub fn distribute_feedback_sessions(frequency: i32, total: i32) -> Result<Vec<String>, CoreError> {
    if frequency <= 0 {
        return Err(CoreError::InvalidInput(
            "feedbackFrequency must be greater than zero".to_string(),
        ));
    }
    if frequency > total {
        return Err(CoreError::InvalidInput(format!(
            "feedbackFrequency ({frequency}) cannot exceed noOfInteractions ({total})"
        )));
    }

    if frequency == total {
        return Ok((1..=total).map(|i| i.to_string()).collect());
    }

    let (f, n) = (i64::from(frequency), i64::from(total));
    Ok((0..f).map(|k| (k * n / f + 1).to_string()).collect())
}

fn is_session(entry: &str, session: i32) -> bool {
    entry.trim().parse::<i32>().ok() == Some(session)
}

/// Append the final session number if it is not already listed.
///
/// Returns `true` when the list changed.
pub fn ensure_last_interaction(metadata: &mut Vec<String>, total: i32) -> bool {
    if metadata.iter().any(|m| is_session(m, total)) {
        return false;
    }
    metadata.push(total.to_string());
    true
}

/// Drop the final session number from the list.
///
/// Returns `true` when the list changed.
pub fn remove_last_interaction(metadata: &mut Vec<String>, total: i32) -> bool {
    let before = metadata.len();
    metadata.retain(|m| !is_session(m, total));
    metadata.len() != before
}

/// Check that every entry is a unique integer in `1..=total`.
pub fn validate_feedback_metadata(metadata: &[String], total: i32) -> Result<(), CoreError> {
    if metadata.is_empty() {
        return Err(CoreError::InvalidInput(
            "metadata must contain at least one session number".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(metadata.len());
    for entry in metadata {
        let session: i64 = entry.trim().parse().map_err(|_| {
            CoreError::InvalidInput(format!("metadata entry '{entry}' is not an integer"))
        })?;
        if session < 1 || session > i64::from(total) {
            return Err(CoreError::InvalidInput(format!(
                "metadata entry {session} must be between 1 and {total}"
            )));
        }
        if !seen.insert(session) {
            return Err(CoreError::InvalidInput(format!(
                "metadata entry {session} is duplicated"
            )));
        }
    }
    Ok(())
}
