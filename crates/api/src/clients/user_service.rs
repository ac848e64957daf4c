//! Client for the user service's bulk registration endpoint.
//!
//! The mentee upload forwards valid roster rows to
//! `POST {USER_SERVICE_URL}/users/bulk` and enrolls whatever ids come back.
//! A single attempt is made; failures surface to the caller.

use std::time::Duration;

use coachhub_core::mentee_import::MenteeRow;
use coachhub_db::models::user::{BulkRegisterResult, BulkRegisterUsers, CreateUser, USER_TYPE_MENTEE};
use serde::Deserialize;

/// HTTP request timeout for one registration call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Network, DNS, timeout or body decoding failure.
    #[error("User service request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The user service answered with a non-2xx status.
    #[error("User service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

pub struct UserServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl UserServiceClient {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn bulk_url(&self) -> String {
        format!("{}/users/bulk", self.base_url)
    }

    /// Register mentees in one call, returning new and pre-existing ids.
    pub async fn register_mentees(
        &self,
        mentees: &[MenteeRow],
    ) -> Result<BulkRegisterResult, UserServiceError> {
        let body = bulk_request(mentees);
        let response = self.client.post(self.bulk_url()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UserServiceError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<BulkRegisterResult> = response.json().await?;
        Ok(envelope.data)
    }
}

/// Map roster rows to the bulk registration body.
pub fn bulk_request(mentees: &[MenteeRow]) -> BulkRegisterUsers {
    BulkRegisterUsers {
        users: mentees
            .iter()
            .map(|m| CreateUser {
                first_name: m.first_name.clone(),
                last_name: m.last_name.clone(),
                email: m.email.clone(),
                phone: m.phone.clone(),
                designation: m.designation.clone(),
                department: m.department.clone(),
                user_type: USER_TYPE_MENTEE.to_string(),
                role_ids: Vec::new(),
            })
            .collect(),
    }
}
