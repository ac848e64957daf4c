//! User registration and RBAC resolution.
//!
//! PII is encrypted before any lookup, so uniqueness and existence checks
//! compare ciphertexts.

use std::collections::HashSet;

use coachhub_core::error::CoreError;
use coachhub_core::rbac::effective_permissions;
use coachhub_core::types::DbId;
use coachhub_core::validation::{ensure_non_empty_patch, validate_dto};
use coachhub_db::models::user::{
    BulkRegisterResult, BulkRegisterUsers, CreateUser, NewUserRecord, UpdateUser, UserRecordPatch,
    UserRef, UserView,
};
use coachhub_db::repositories::{RoleRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Roles and the union of their permissions for one user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissions {
    pub user_id: DbId,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

pub async fn create(state: &AppState, input: &CreateUser) -> AppResult<UserView> {
    validate_dto(input)?;
    let record = NewUserRecord::encrypt(input, &state.cipher);

    if UserRepo::email_exists(&state.pool, &record.email, None).await? {
        return Err(CoreError::Conflict(format!(
            "User with email '{}' already exists",
            input.email.trim().to_lowercase()
        ))
        .into());
    }

    let mut conn = state.pool.acquire().await?;
    let user = UserRepo::create(&mut conn, &record).await?;
    tracing::info!(user_id = user.id, user_type = %user.user_type, "User created");
    Ok(user.decrypt(&state.cipher)?)
}

pub async fn find(state: &AppState, id: DbId) -> AppResult<UserView> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(user.decrypt(&state.cipher)?)
}

pub async fn list(state: &AppState, limit: i64, offset: i64) -> AppResult<Vec<UserView>> {
    let users = UserRepo::list(&state.pool, limit, offset).await?;
    users
        .iter()
        .map(|u| u.decrypt(&state.cipher).map_err(AppError::from))
        .collect()
}

pub async fn update(state: &AppState, id: DbId, patch: &UpdateUser) -> AppResult<UserView> {
    ensure_non_empty_patch(patch.is_empty())?;
    validate_dto(patch)?;
    let record = UserRecordPatch::encrypt(patch, &state.cipher);

    if let Some(ref email) = record.email {
        if UserRepo::email_exists(&state.pool, email, Some(id)).await? {
            return Err(CoreError::Conflict("Another user already uses this email".to_string()).into());
        }
    }

    let user = UserRepo::update(&state.pool, id, &record)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(user.decrypt(&state.cipher)?)
}

pub async fn remove(state: &AppState, id: DbId) -> AppResult<()> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("User", id));
    }
    tracing::info!(user_id = id, "User deleted");
    Ok(())
}

/// Register a batch of users, skipping emails that already exist.
///
/// Inserts run one by one in request order on a single connection. The
/// first failed insert aborts the batch and is returned; users inserted
/// before it stay registered.
pub async fn bulk_register(
    state: &AppState,
    input: &BulkRegisterUsers,
) -> AppResult<BulkRegisterResult> {
    validate_dto(input)?;

    let mut conn = state.pool.acquire().await?;
    let mut result = BulkRegisterResult::default();
    let mut seen = HashSet::new();

    for user in &input.users {
        let email = user.email.trim().to_lowercase();
        if !seen.insert(email.clone()) {
            continue;
        }

        let record = NewUserRecord::encrypt(user, &state.cipher);
        if let Some(existing) = UserRepo::find_by_email(&mut conn, &record.email).await? {
            result.existing.push(UserRef {
                id: existing.id,
                email,
            });
            continue;
        }

        let created = UserRepo::create(&mut conn, &record).await.inspect_err(|e| {
            tracing::error!(
                error = %e,
                registered = result.registered.len(),
                "Bulk registration stopped"
            );
        })?;
        result.registered.push(UserRef {
            id: created.id,
            email,
        });
    }

    tracing::info!(
        registered = result.registered.len(),
        existing = result.existing.len(),
        "Bulk registration finished"
    );
    Ok(result)
}

/// Resolve the permission slugs granted to a user through their roles.
pub async fn permissions(state: &AppState, id: DbId) -> AppResult<UserPermissions> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;

    let roles = RoleRepo::find_by_ids(&state.pool, &user.role_ids.0).await?;
    let granted = effective_permissions(roles.iter().map(|r| r.permissions.0.as_slice()));

    Ok(UserPermissions {
        user_id: id,
        roles: roles.into_iter().map(|r| r.slug).collect(),
        permissions: granted.into_iter().collect(),
    })
}
