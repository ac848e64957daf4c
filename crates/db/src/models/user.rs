//! User rows and DTOs.
//!
//! `first_name`, `last_name`, `email` and `phone` are stored as
//! [`PiiCipher`] ciphertext. [`User`] is the raw row; [`UserView`] is what
//! leaves the service.

use coachhub_core::crypto::PiiCipher;
use coachhub_core::error::CoreError;
use coachhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

pub const USER_TYPE_MENTEE: &str = "MENTEE";

/// A row from the `users` table, PII still encrypted.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub user_type: String,
    pub role_ids: Json<Vec<DbId>>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn decrypt(&self, cipher: &PiiCipher) -> Result<UserView, CoreError> {
        Ok(UserView {
            id: self.id,
            first_name: cipher.decrypt(&self.first_name)?,
            last_name: cipher.decrypt(&self.last_name)?,
            email: cipher.decrypt(&self.email)?,
            phone: cipher.decrypt_opt(self.phone.as_deref())?,
            designation: self.designation.clone(),
            department: self.department.clone(),
            user_type: self.user_type.clone(),
            role_ids: self.role_ids.0.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A user with PII decrypted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub user_type: String,
    pub role_ids: Vec<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn default_user_type() -> String {
    USER_TYPE_MENTEE.to_string()
}

/// DTO for registering a user. Plaintext; encrypted before it reaches a repo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub last_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 7, max = 16, message = "must be 7-16 characters"))]
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    #[serde(default = "default_user_type")]
    pub user_type: String,
    #[serde(default)]
    pub role_ids: Vec<DbId>,
}

/// DTO for patching a user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 7, max = 16, message = "must be 7-16 characters"))]
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub role_ids: Option<Vec<DbId>>,
    pub is_active: Option<bool>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.designation.is_none()
            && self.department.is_none()
            && self.role_ids.is_none()
            && self.is_active.is_none()
    }
}

/// Column values for an insert, PII already encrypted.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub user_type: String,
    pub role_ids: Vec<DbId>,
}

impl NewUserRecord {
    /// Encrypt the PII fields of a validated create DTO. Emails are
    /// lowercased first so lookups on the ciphertext are case-insensitive.
    pub fn encrypt(input: &CreateUser, cipher: &PiiCipher) -> Self {
        Self {
            first_name: cipher.encrypt(input.first_name.trim()),
            last_name: cipher.encrypt(input.last_name.trim()),
            email: cipher.encrypt(&input.email.trim().to_lowercase()),
            phone: cipher.encrypt_opt(input.phone.as_deref()),
            designation: input.designation.clone(),
            department: input.department.clone(),
            user_type: input.user_type.clone(),
            role_ids: input.role_ids.clone(),
        }
    }
}

/// Column values for a patch, PII already encrypted.
#[derive(Debug, Clone, Default)]
pub struct UserRecordPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub role_ids: Option<Vec<DbId>>,
    pub is_active: Option<bool>,
}

impl UserRecordPatch {
    pub fn encrypt(input: &UpdateUser, cipher: &PiiCipher) -> Self {
        Self {
            first_name: input.first_name.as_deref().map(|v| cipher.encrypt(v.trim())),
            last_name: input.last_name.as_deref().map(|v| cipher.encrypt(v.trim())),
            email: input
                .email
                .as_deref()
                .map(|v| cipher.encrypt(&v.trim().to_lowercase())),
            phone: cipher.encrypt_opt(input.phone.as_deref()),
            designation: input.designation.clone(),
            department: input.department.clone(),
            role_ids: input.role_ids.clone(),
            is_active: input.is_active,
        }
    }
}

/// Request body of `POST /users/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkRegisterUsers {
    #[validate(length(min = 1, message = "must contain at least one user"), nested)]
    pub users: Vec<CreateUser>,
}

/// Id/email pair reported by bulk registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: DbId,
    pub email: String,
}

/// Result of `POST /users/bulk`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkRegisterResult {
    pub registered: Vec<UserRef>,
    pub existing: Vec<UserRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateUser {
        serde_json::from_value(serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "Ada@Example.com",
        }))
        .unwrap()
    }

    #[test]
    fn user_type_defaults_to_mentee() {
        let input = create();
        assert_eq!(input.user_type, USER_TYPE_MENTEE);
        assert!(input.role_ids.is_empty());
    }

    #[test]
    fn encrypted_record_lowercases_email() {
        let cipher = PiiCipher::new("k");
        let record = NewUserRecord::encrypt(&create(), &cipher);
        assert_eq!(record.email, cipher.encrypt("ada@example.com"));
        assert_ne!(record.first_name, "Ada");
    }

    #[test]
    fn decrypt_restores_plaintext() {
        let cipher = PiiCipher::new("k");
        let record = NewUserRecord::encrypt(&create(), &cipher);
        let now = chrono::Utc::now();
        let row = User {
            id: 9,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            phone: None,
            designation: None,
            department: None,
            user_type: record.user_type,
            role_ids: Json(vec![1, 2]),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let view = row.decrypt(&cipher).unwrap();
        assert_eq!(view.first_name, "Ada");
        assert_eq!(view.email, "ada@example.com");
        assert_eq!(view.role_ids, vec![1, 2]);
    }
}
