//! Notification delivery rules.
//!
//! A notification without a schedule is dispatched as soon as it is
//! created. A scheduled one is stored and left alone; nothing in this
//! service polls for due notifications.

use crate::error::CoreError;
use crate::types::Timestamp;

pub const CHANNEL_IN_APP: &str = "in_app";
pub const CHANNEL_EMAIL: &str = "email";
pub const CHANNEL_SMS: &str = "sms";
pub const CHANNEL_PUSH: &str = "push";

pub const VALID_CHANNELS: &[&str] = &[CHANNEL_IN_APP, CHANNEL_EMAIL, CHANNEL_SMS, CHANNEL_PUSH];

/// When a newly created notification goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Immediate,
    Deferred(Timestamp),
}

pub fn dispatch_mode(scheduled_at: Option<Timestamp>) -> Dispatch {
    match scheduled_at {
        Some(at) => Dispatch::Deferred(at),
        None => Dispatch::Immediate,
    }
}

pub fn validate_channel(channel: &str) -> Result<(), CoreError> {
    if VALID_CHANNELS.contains(&channel) {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!(
            "channel '{channel}' is not one of {}",
            VALID_CHANNELS.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn unscheduled_is_immediate() {
        assert_eq!(dispatch_mode(None), Dispatch::Immediate);
    }

    #[test]
    fn scheduled_is_deferred() {
        let at = Utc::now();
        assert_eq!(dispatch_mode(Some(at)), Dispatch::Deferred(at));
    }

    #[test]
    fn channels() {
        assert!(validate_channel(CHANNEL_EMAIL).is_ok());
        assert!(validate_channel("pigeon").is_err());
    }
}
