//! User management handlers

use crate::api::models::{AdminUpdateUserRequest, UserActionResponse, UsersListResponse};
use crate::auth::models::UserInfo;
use crate::auth::password::hash_password;
use crate::core::error::{Result, WardenError};
use crate::db::repository::Repository;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use super::AppState;

/// Handler for GET /api/auth - List all users
///
/// Guarded but not admin-restricted; every authenticated user may list
/// the directory. All records are stripped of their password hashes.
pub async fn list_users(
    State(state): State<AppState>,
    user: crate::auth::middleware::AuthUser,
) -> Result<impl IntoResponse> {
    tracing::debug!(user_id = %user.id, "Listing users");

    let users: Vec<UserInfo> = state
        .user_repo
        .find_all()
        .await?
        .into_iter()
        .map(UserInfo::from)
        .collect();

    let total = state.user_repo.count().await? as usize;
    Ok(Json(UsersListResponse { users, total }))
}

/// Handler for PATCH /api/users/:id - Update user (admin only)
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    admin: crate::auth::middleware::AuthUser,
    Json(req): Json<AdminUpdateUserRequest>,
) -> Result<impl IntoResponse> {
    if !admin.has_role("admin") {
        return Err(WardenError::PermissionDenied(
            "Admin access required".to_string(),
        ));
    }

    let mut user = state
        .user_repo
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| WardenError::NotFound(format!("User {} not found", user_id)))?;

    if let Some(name) = req.name {
        if !name.is_empty() {
            user.name = name;
        }
    }

    if let Some(password) = req.password {
        if !password.is_empty() {
            let password_hash = hash_password(&password, state.bcrypt_cost)?;
            state
                .user_repo
                .update_password(&user.id, &password_hash)
                .await?;
            user.password_hash = password_hash;
        }
    }

    if let Some(roles) = req.roles {
        if roles.is_empty() {
            return Err(WardenError::ValidationError(
                "roles cannot be empty".to_string(),
            ));
        }
        user.roles = roles.join(",");
    }

    if let Some(is_active) = req.is_active {
        user.is_active = if is_active { 1 } else { 0 };
    }

    state.user_repo.update(&user).await?;

    tracing::info!(user_id = %user.id, admin_id = %admin.id, "User updated by admin");

    Ok(Json(UserActionResponse {
        message: "User updated successfully".to_string(),
        user: Some(UserInfo::from(user)),
    }))
}

/// Handler for DELETE /api/users/:id - Delete user (admin only)
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    admin: crate::auth::middleware::AuthUser,
) -> Result<impl IntoResponse> {
    if !admin.has_role("admin") {
        return Err(WardenError::PermissionDenied(
            "Admin access required".to_string(),
        ));
    }

    if admin.id == user_id {
        return Err(WardenError::ValidationError(
            "Cannot delete your own account".to_string(),
        ));
    }

    state
        .user_repo
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| WardenError::NotFound(format!("User {} not found", user_id)))?;

    state.user_repo.delete(&user_id).await?;

    tracing::info!(user_id = %user_id, admin_id = %admin.id, "User deleted by admin");

    Ok(Json(UserActionResponse {
        message: "User deleted successfully".to_string(),
        user: None,
    }))
}
