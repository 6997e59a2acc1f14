//! Authentication API handlers

use crate::api::handlers::AppState;
use crate::auth::jwt::generate_token;
use crate::auth::models::{
    CreateUserRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateMeRequest, UserInfo,
};
use crate::auth::password::{hash_password, verify_password};
use crate::core::error::{Result, WardenError};
use crate::db::models::User;
use crate::db::repository::Repository;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

/// Insert a new user record with a hashed password.
///
/// The first user in the store receives the admin role; everyone after
/// that is a plain user. A duplicate email maps to a 400 response.
async fn insert_user(state: &AppState, email: &str, name: &str, password: &str) -> Result<User> {
    let password_hash = hash_password(password, state.bcrypt_cost)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        name: name.to_string(),
        password_hash,
        roles: "user".to_string(),
        is_active: 1,
        created_at: chrono::Utc::now().to_rfc3339(),
        last_login_at: None,
    };

    // The UNIQUE constraint on email is the final arbiter; a racing insert
    // surfaces here as a constraint violation and is reported as a duplicate.
    match state.user_repo.create_bootstrapped(user).await {
        Ok(user) => {
            tracing::info!(
                user_id = %user.id,
                email = %user.email,
                roles = %user.roles,
                "User created"
            );
            Ok(user)
        }
        Err(WardenError::DatabaseError(rusqlite::Error::SqliteFailure(e, msg)))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            tracing::warn!(email = %email, error = ?msg, "User creation failed: duplicate email");
            Err(WardenError::InvalidRequest(format!(
                "{} already exists",
                email
            )))
        }
        Err(e) => {
            tracing::error!(email = %email, error = %e, "User creation failed");
            Err(e)
        }
    }
}

/// Handler for POST /api/auth - Create user
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(email = %req.email, "User creation attempt");

    let user = insert_user(&state, &req.email, &req.name, &req.password).await?;

    Ok((StatusCode::CREATED, Json(UserInfo::from(user))))
}

/// Handler for POST /api/auth/register - User registration
///
/// Performs the same insertion as create and additionally issues a token,
/// so the caller is logged in immediately.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!(email = %req.email, "User registration attempt");

    let user = insert_user(&state, &req.email, &req.name, &req.password).await?;
    let token = generate_token(&user.id, &state.jwt_secret, state.token_ttl_hours)?;

    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            user: UserInfo::from(user),
            token,
        }),
    ))
}

/// Handler for POST /api/auth/login - User login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    tracing::info!(email = %req.email, "Login attempt");

    // A uniform 401 for unknown email, bad password, and deactivated
    // accounts; the distinction only shows up in the logs.
    let user = state
        .user_repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!(email = %req.email, "Login failed: unknown email");
            WardenError::AuthenticationError("Invalid credentials".to_string())
        })?;

    let is_valid = verify_password(&req.password, &user.password_hash)?;
    if !is_valid {
        tracing::warn!(email = %req.email, "Login failed: invalid password");
        return Err(WardenError::AuthenticationError(
            "Invalid credentials".to_string(),
        ));
    }

    if user.is_active == 0 {
        tracing::warn!(email = %req.email, "Login failed: account deactivated");
        return Err(WardenError::AuthenticationError(
            "Invalid credentials".to_string(),
        ));
    }

    state.user_repo.touch_last_login(&user.id).await?;

    let token = generate_token(&user.id, &state.jwt_secret, state.token_ttl_hours)?;

    tracing::info!(user_id = %user.id, email = %user.email, "Login successful");

    Ok(Json(LoginResponse {
        user: UserInfo::from(user),
        token,
    }))
}

/// Handler for GET /api/auth/check-token - Validate a token and issue a fresh one
///
/// The guard has already validated the incoming token and resolved the user;
/// this handler only re-signs a token for the same identity.
pub async fn check_token(
    State(state): State<AppState>,
    user: crate::auth::middleware::AuthUser,
) -> Result<Json<LoginResponse>> {
    tracing::debug!(user_id = %user.id, "Token refresh");

    let db_user = state
        .user_repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| WardenError::AuthenticationError("User not found".to_string()))?;

    let token = generate_token(&db_user.id, &state.jwt_secret, state.token_ttl_hours)?;

    Ok(Json(LoginResponse {
        user: UserInfo::from(db_user),
        token,
    }))
}

/// Handler for GET /api/me - Get current user info
pub async fn get_me(
    State(state): State<AppState>,
    user: crate::auth::middleware::AuthUser,
) -> Result<Json<UserInfo>> {
    let db_user = state
        .user_repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| WardenError::AuthenticationError("User not found".to_string()))?;

    Ok(Json(UserInfo::from(db_user)))
}

/// Handler for PATCH /api/me - Update current user info
pub async fn update_me(
    State(state): State<AppState>,
    user: crate::auth::middleware::AuthUser,
    Json(req): Json<UpdateMeRequest>,
) -> Result<Json<UserInfo>> {
    tracing::info!(user_id = %user.id, "Updating current user info");

    let mut db_user = state
        .user_repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| WardenError::AuthenticationError("User not found".to_string()))?;

    if let Some(new_name) = req.name {
        if !new_name.is_empty() {
            db_user.name = new_name;
        }
    }
    state.user_repo.update(&db_user).await?;

    if let Some(new_password) = req.password {
        if !new_password.is_empty() {
            let password_hash = hash_password(&new_password, state.bcrypt_cost)?;
            state
                .user_repo
                .update_password(&db_user.id, &password_hash)
                .await?;
            db_user.password_hash = password_hash;
        }
    }

    tracing::info!(user_id = %user.id, "User info updated");

    Ok(Json(UserInfo::from(db_user)))
}
