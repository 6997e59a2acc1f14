//! JWT token generation and validation

use crate::core::error::{Result, WardenError};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims structure
///
/// The subject is always the user id; nothing else is encoded in the payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Generate a JWT token for a user
pub fn generate_token(user_id: &str, secret: &str, ttl_hours: i64) -> Result<String> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(ttl_hours))
        .ok_or_else(|| {
            WardenError::AuthenticationError("Failed to calculate expiration".to_string())
        })?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| WardenError::AuthenticationError(format!("Failed to generate token: {}", e)))
}

/// Validate a JWT token and extract claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| WardenError::AuthenticationError(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_round_trip() {
        let token = generate_token("user-123", SECRET, 6).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "user-123");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = generate_token("user-123", SECRET, 6).unwrap();
        let result = validate_token(&token, "other-secret");
        assert!(matches!(result, Err(WardenError::AuthenticationError(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = validate_token("not.a.token", SECRET);
        assert!(matches!(result, Err(WardenError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // TTL in the past
        let token = generate_token("user-123", SECRET, -1).unwrap();
        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(WardenError::AuthenticationError(_))));
    }
}
