//! Outbound HTTP clients.

pub mod notification_webhook;
pub mod user_service;
