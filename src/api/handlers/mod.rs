pub mod users;

pub use users::*;

use crate::db::repository::UserRepository;
use std::sync::Arc;

/// Shared application state for handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<UserRepository>,
    pub jwt_secret: Arc<String>,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}
