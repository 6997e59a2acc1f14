//! Authentication request/response models

use crate::db::models::User;
use serde::{Deserialize, Serialize};

/// Request body for creating a user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Register request (same shape as create; additionally issues a token)
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserInfo,
    pub token: String,
}

/// User info projection with the password hash stripped
///
/// Every user object leaving the service goes through this type; the
/// password hash never appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub is_active: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        let roles = user.role_list();
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            roles,
            is_active: user.is_active != 0,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Request body for updating the current user
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_strips_password_hash() {
        let user = User {
            id: "u1".to_string(),
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            roles: "admin,user".to_string(),
            is_active: 1,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            last_login_at: None,
        };

        let info = UserInfo::from(user);
        let json = serde_json::to_string(&info).unwrap();

        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
        assert_eq!(info.roles, vec!["admin", "user"]);
        assert!(info.is_active);
    }

    #[test]
    fn test_last_login_omitted_when_absent() {
        let info = UserInfo {
            id: "u1".to_string(),
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            roles: vec!["user".to_string()],
            is_active: true,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            last_login_at: None,
        };

        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("last_login_at"));
    }
}
