//! User management API models

use crate::auth::models::UserInfo;
use serde::{Deserialize, Serialize};

/// Response for the user list
#[derive(Debug, Serialize, Deserialize)]
pub struct UsersListResponse {
    pub users: Vec<UserInfo>,
    pub total: usize,
}

/// Request body for updating a user (admin)
#[derive(Debug, Deserialize)]
pub struct AdminUpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Response for user update/delete actions
#[derive(Debug, Serialize)]
pub struct UserActionResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}
