//! Database models
//!
//! Data structures representing database tables

use serde::{Deserialize, Serialize};

/// User record in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    /// Comma-joined role list, e.g. "user" or "admin,user"
    pub roles: String,
    pub is_active: i32, // 0 or 1
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl User {
    /// Split the stored role string into individual roles
    pub fn role_list(&self) -> Vec<String> {
        self.roles
            .split(',')
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect()
    }
}
