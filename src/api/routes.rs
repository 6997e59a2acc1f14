//! API routes

use crate::api::handlers::{delete_user, list_users, update_user, AppState};
use crate::auth::handlers::{check_token, create_user, get_me, login, register, update_me};
use crate::auth::middleware::authenticate;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// Build the API routes
pub fn build_api_routes(state: AppState) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/auth", post(create_user))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/api/auth", get(list_users))
        .route("/api/auth/check-token", get(check_token))
        .route("/api/me", get(get_me).patch(update_me))
        .route("/api/users/:id", axum::routing::patch(update_user).delete(delete_user))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public_routes.merge(protected_routes).with_state(state)
}
