//! Authentication middleware

use crate::auth::jwt::validate_token;
use crate::core::error::{Result, WardenError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Extension to store authenticated user info in request
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl AuthUser {
    /// Check whether the authenticated user carries the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Authentication middleware
///
/// Validates the bearer token, resolves the user it names, and attaches
/// the identity to the request. Deactivated or deleted users are rejected
/// even when their token is still formally valid.
pub async fn authenticate(
    State(state): State<crate::api::handlers::AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    use axum::http::header;

    // Token from the Authorization header, with a query-parameter fallback
    // for clients that cannot set headers.
    let token_from_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer ").map(|t| t.to_string()));

    let token = token_from_header.or_else(|| {
        request.uri().query().and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == "token")
                .map(|(_, v)| v.to_string())
        })
    });

    let token = match token {
        Some(t) => t,
        None => {
            let error =
                WardenError::AuthenticationError("Missing authentication token".to_string());
            return error.into_response();
        }
    };

    let claims = match validate_token(&token, &state.jwt_secret) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    use crate::db::repository::Repository;
    let user_result = state.user_repo.find_by_id(&claims.sub).await;

    let user = match user_result {
        Ok(Some(u)) => u,
        Ok(None) => {
            let error = WardenError::AuthenticationError("User not found".to_string());
            return error.into_response();
        }
        Err(e) => return e.into_response(),
    };

    if user.is_active == 0 {
        let error = WardenError::AuthenticationError("Account deactivated".to_string());
        return error.into_response();
    }

    let roles = user.role_list();
    request.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
        name: user.name,
        roles,
    });

    next.run(request).await
}

// Implement FromRequestParts for AuthUser to enable extraction in handlers
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = WardenError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| WardenError::AuthenticationError("User not authenticated".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_role() {
        let user = AuthUser {
            id: "u1".to_string(),
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            roles: vec!["admin".to_string(), "user".to_string()],
        };

        assert!(user.has_role("admin"));
        assert!(user.has_role("user"));
        assert!(!user.has_role("root"));
    }
}
